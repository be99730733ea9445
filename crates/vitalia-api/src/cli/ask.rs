//! The `vita ask` command: one-shot question with a streamed answer.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use vitalia_core::chat::run_exchange;
use vitalia_types::chat::ImageAttachment;
use vitalia_types::panel::PanelKind;

use crate::state::AppState;

/// Parse a panel argument, defaulting to the wellness assistant.
pub fn parse_panel(arg: Option<&str>) -> anyhow::Result<PanelKind> {
    match arg {
        Some(s) => s
            .parse::<PanelKind>()
            .map_err(|e| anyhow::anyhow!("{e} (expected wellness, body-systems or food-analysis)")),
        None => Ok(PanelKind::Wellness),
    }
}

/// Guess the MIME type for an image path from its extension.
fn media_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Read an image file into an attachment.
async fn load_image(path: &Path) -> anyhow::Result<ImageAttachment> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;
    Ok(ImageAttachment::new(media_type_for(path), data))
}

/// Run one exchange and stream the answer to stdout.
pub async fn ask(
    state: &AppState,
    query: &str,
    panel_arg: Option<&str>,
    image_path: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let kind = parse_panel(panel_arg)?;
    let image = match image_path {
        Some(path) => Some(load_image(path).await?),
        None => None,
    };

    let mut panel = state.panel(kind);
    let cancel = CancellationToken::new();

    let turn = run_exchange(&mut panel, query, image, &cancel, |delta| {
        if !json {
            print!("{delta}");
            let _ = std::io::stdout().flush();
        }
    })
    .await?;

    match turn {
        Some(turn) if json => {
            println!("{}", serde_json::to_string_pretty(&turn)?);
        }
        Some(_) => {
            println!();
        }
        None => {
            anyhow::bail!("the assistant returned no text");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_panel_default() {
        assert_eq!(parse_panel(None).unwrap(), PanelKind::Wellness);
    }

    #[test]
    fn test_parse_panel_kebab_case() {
        assert_eq!(
            parse_panel(Some("body-systems")).unwrap(),
            PanelKind::BodySystems
        );
        assert_eq!(
            parse_panel(Some("food-analysis")).unwrap(),
            PanelKind::FoodAnalysis
        );
    }

    #[test]
    fn test_parse_panel_unknown() {
        assert!(parse_panel(Some("pharmacy")).is_err());
    }

    #[test]
    fn test_media_type_for_extensions() {
        assert_eq!(media_type_for(Path::new("meal.JPG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("meal.png")), "image/png");
        assert_eq!(media_type_for(Path::new("meal")), "application/octet-stream");
    }
}

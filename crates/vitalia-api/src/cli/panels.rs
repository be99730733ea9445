//! The `vita panels` command: list panels and their capabilities.

use console::style;

use vitalia_types::panel::PanelKind;

/// Print the available panels, styled or as JSON.
pub fn list_panels(json: bool) {
    if json {
        let panels: Vec<_> = PanelKind::ALL
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "panel": kind.to_string(),
                    "title": kind.title(),
                    "endpoint": kind.endpoint(),
                    "accepts_image": kind.accepts_image(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&panels).expect("panel listing serializes")
        );
        return;
    }

    println!();
    for kind in PanelKind::ALL {
        let image_note = if kind.accepts_image() {
            format!("  {}", style("(accepts --image)").dim())
        } else {
            String::new()
        };
        println!(
            "  {} {}{}",
            style(format!("{:<14}", kind.to_string())).cyan().bold(),
            style(kind.title()).bold(),
            image_note
        );
        println!("  {}", style(format!("  posts to {}", kind.endpoint())).dim());
        println!();
    }
}

//! The `vita status` command: show configuration and gateway details.

use console::style;
use secrecy::ExposeSecret;

use crate::state::AppState;

/// Print the resolved configuration, styled or as JSON.
pub async fn status(state: &AppState, json: bool) -> anyhow::Result<()> {
    let config_path = state.data_dir.join("config.toml");
    let config_exists = tokio::fs::try_exists(&config_path).await.unwrap_or(false);
    let key_configured = !state
        .config
        .gateway
        .publishable_key
        .expose_secret()
        .is_empty();

    if json {
        let status = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "config_file": config_exists,
            "gateway_url": state.gateway_url(),
            "publishable_key_configured": key_configured,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("\u{2713}").green())
        } else {
            format!("{}", style("\u{2717}").red())
        }
    };

    println!();
    println!(
        "  {}  {}",
        style("Data dir:").bold(),
        style(state.data_dir.display()).dim()
    );
    println!("  {} config.toml present", check_mark(config_exists));
    println!(
        "  {} publishable key configured",
        check_mark(key_configured)
    );
    println!(
        "  {}  {}",
        style("Gateway:").bold(),
        style(state.gateway_url()).dim()
    );
    println!();

    Ok(())
}

//! Configuration loader for Vitalia.
//!
//! Reads `config.toml` from the data directory (`~/.vitalia/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to
//! defaults when the file is missing or malformed. The
//! `VITALIA_PUBLISHABLE_KEY` environment variable overrides the
//! configured key at load time -- downstream code only ever sees the
//! injected config.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use vitalia_types::config::AppConfig;

/// Resolve the data directory: `VITALIA_DATA_DIR` override, then
/// `~/.vitalia`, then `./.vitalia` as a last resort.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("VITALIA_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".vitalia");
    }

    PathBuf::from(".vitalia")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
/// - Otherwise: the parsed config, with environment overrides applied.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return apply_env_overrides(AppConfig::default());
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return apply_env_overrides(AppConfig::default());
        }
    };

    let config = match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    };

    apply_env_overrides(config)
}

/// Environment variables are the highest-priority config source.
fn apply_env_overrides(mut config: AppConfig) -> AppConfig {
    if let Ok(key) = std::env::var("VITALIA_PUBLISHABLE_KEY") {
        config.gateway.publishable_key = SecretString::from(key);
    }
    config
}

//! Configuration types for Vitalia.
//!
//! `AppConfig` represents the top-level `config.toml`. The gateway
//! section is injected into the edge-gateway client at construction --
//! nothing downstream of config loading reads the environment.

use secrecy::SecretString;
use serde::Deserialize;

/// Top-level configuration, loaded from `~/.vitalia/config.toml`.
///
/// All fields have defaults suitable for a local development gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
        }
    }
}

/// Connection settings for the assistant edge gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL the edge function names are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Publishable API key sent as a bearer token. Wrapped in
    /// [`SecretString`] so it never appears in Debug output or logs.
    #[serde(default = "default_publishable_key")]
    pub publishable_key: SecretString,
}

fn default_base_url() -> String {
    "http://localhost:54321/functions/v1".to_string()
}

fn default_publishable_key() -> SecretString {
    SecretString::from("")
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            publishable_key: default_publishable_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(
            config.gateway.base_url,
            "http://localhost:54321/functions/v1"
        );
        assert!(config.gateway.publishable_key.expose_secret().is_empty());
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(
            config.gateway.base_url,
            "http://localhost:54321/functions/v1"
        );
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
[gateway]
base_url = "https://wplzebmxfgbrkuwwaeto.supabase.co/functions/v1"
publishable_key = "sb_publishable_abc123"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.gateway.base_url,
            "https://wplzebmxfgbrkuwwaeto.supabase.co/functions/v1"
        );
        assert_eq!(
            config.gateway.publishable_key.expose_secret(),
            "sb_publishable_abc123"
        );
    }

    #[test]
    fn test_publishable_key_redacted_in_debug() {
        let toml_str = r#"
[gateway]
publishable_key = "sb_publishable_abc123"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sb_publishable_abc123"));
    }
}

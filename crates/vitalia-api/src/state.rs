//! Application state for the CLI.
//!
//! AppState holds the loaded configuration and builds gateway-backed
//! panels on demand. The gateway config is injected into the client at
//! construction -- command handlers never touch the environment.

use std::path::PathBuf;

use vitalia_core::chat::ChatPanel;
use vitalia_core::gateway::BoxAssistantGateway;
use vitalia_infra::config::{load_app_config, resolve_data_dir};
use vitalia_infra::gateway::EdgeGateway;
use vitalia_types::config::AppConfig;
use vitalia_types::panel::PanelKind;

/// Shared application state for CLI commands.
pub struct AppState {
    pub config: AppConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve the data directory and
    /// load configuration.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;
        let config = load_app_config(&data_dir).await;

        Ok(Self { config, data_dir })
    }

    /// Build a fresh chat panel backed by the configured edge gateway.
    pub fn panel(&self, kind: PanelKind) -> ChatPanel {
        let gateway = EdgeGateway::new(self.config.gateway.clone());
        ChatPanel::new(kind, BoxAssistantGateway::new(gateway))
    }

    /// Base URL of the configured gateway (for banners and listings).
    pub fn gateway_url(&self) -> &str {
        &self.config.gateway.base_url
    }
}

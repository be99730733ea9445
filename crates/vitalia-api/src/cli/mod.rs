//! CLI command definitions and dispatch for the `vita` binary.
//!
//! Uses clap derive macros for argument parsing. Panels are accepted as
//! kebab-case strings (`wellness`, `body-systems`, `food-analysis`) and
//! parsed into [`vitalia_types::panel::PanelKind`] by the handlers.

pub mod ask;
pub mod chat;
pub mod panels;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with the Vitalia wellness assistants.
#[derive(Parser)]
#[command(name = "vita", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export trace spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Panel to chat with (wellness, body-systems, food-analysis).
        #[arg(long)]
        panel: Option<String>,
    },

    /// Ask a single question and stream the answer to stdout.
    Ask {
        /// The question to send.
        query: String,

        /// Panel to ask (wellness, body-systems, food-analysis).
        #[arg(long)]
        panel: Option<String>,

        /// Image file to attach (food-analysis panel only).
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// List the assistant panels and their capabilities.
    Panels,

    /// Show resolved configuration and gateway details.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

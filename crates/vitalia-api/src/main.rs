//! Vitalia CLI entry point.
//!
//! Binary name: `vita`
//!
//! Parses CLI arguments, loads configuration, then dispatches to the
//! appropriate command handler.

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

mod cli;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,vitalia=debug",
        _ => "trace",
    };
    if let Err(e) = vitalia_observe::tracing_setup::init_tracing(filter, cli.otel) {
        eprintln!("Warning: could not initialize tracing: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "vita", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat { panel } => {
            cli::chat::run_chat_loop(&state, panel.as_deref()).await?;
        }

        Commands::Ask {
            query,
            panel,
            image,
        } => {
            cli::ask::ask(&state, &query, panel.as_deref(), image.as_deref(), cli.json).await?;
        }

        Commands::Panels => {
            cli::panels::list_panels(cli.json);
        }

        Commands::Status => {
            cli::status::status(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    vitalia_observe::tracing_setup::shutdown_tracing();
    Ok(())
}

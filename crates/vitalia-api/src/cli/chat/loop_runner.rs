//! Main chat loop orchestration.
//!
//! Coordinates the session lifecycle: panel resolution, welcome banner,
//! greeting, the input loop with streamed responses, slash commands,
//! and cancellation of an in-flight answer. While an answer is
//! streaming the send affordance is disabled -- typed lines are ignored
//! and only Ctrl+C (cancel) is honored.

use std::io::Write;
use std::time::{Duration, Instant};

use console::style;
use tokio_util::sync::CancellationToken;
use tracing::info;

use vitalia_core::chat::run_exchange;
use vitalia_types::chat::TurnRole;
use vitalia_types::panel::PanelKind;

use crate::cli::ask::parse_panel;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Canned intro line per panel, shown when the panel opens.
fn greeting(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::BodySystems => {
            "Hi! Ask me how any body system works -- digestion, circulation, immunity and more."
        }
        PanelKind::Wellness => {
            "Hello! I can help with general wellness, nutrition and lifestyle questions."
        }
        PanelKind::FoodAnalysis => {
            "Describe a meal and I'll estimate its nutrition. Photos work too, via `vita ask --image`."
        }
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState, panel_arg: Option<&str>) -> anyhow::Result<()> {
    let kind = parse_panel(panel_arg)?;
    let mut panel = state.panel(kind);

    print_welcome_banner(kind, state.gateway_url());
    info!(panel = %kind, "chat session started");

    let renderer = ChatRenderer::new();
    println!("  {}", renderer.render_final(greeting(kind)).trim());
    println!();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                // Slash commands
                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => {
                            commands::print_help();
                            continue;
                        }
                        ChatCommand::Clear => {
                            chat_input.clear();
                            continue;
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Panel(name) => {
                            match name.parse::<PanelKind>() {
                                Ok(new_kind) if new_kind == panel.kind() => {
                                    println!(
                                        "\n  {}\n",
                                        style(format!("Already chatting with {}.", new_kind.title()))
                                            .dim()
                                    );
                                }
                                Ok(new_kind) => {
                                    panel = state.panel(new_kind);
                                    print_welcome_banner(new_kind, state.gateway_url());
                                    println!(
                                        "  {}",
                                        renderer.render_final(greeting(new_kind)).trim()
                                    );
                                    println!();
                                }
                                Err(e) => {
                                    println!("\n  {} {e}\n", style("!").yellow().bold());
                                }
                            }
                            continue;
                        }
                        ChatCommand::History => {
                            println!();
                            for turn in panel.transcript().turns() {
                                let role_label = match turn.role {
                                    TurnRole::User => format!("{}", style("You").green()),
                                    TurnRole::Assistant => {
                                        format!("{}", style(panel.kind().title()).cyan())
                                    }
                                };
                                let preview: String = if turn.text.chars().count() > 100 {
                                    format!("{}...", turn.text.chars().take(97).collect::<String>())
                                } else {
                                    turn.text.clone()
                                };
                                println!("  {} {}", style(role_label).bold(), preview);
                            }
                            println!();
                            continue;
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                            continue;
                        }
                    }
                }

                // Thinking spinner until the first token arrives
                let spinner = indicatif::ProgressBar::new_spinner();
                spinner.set_style(
                    indicatif::ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {msg}")
                        .unwrap(),
                );
                spinner.set_message("thinking...");
                spinner.enable_steady_tick(Duration::from_millis(80));

                let start_time = Instant::now();
                let cancel = CancellationToken::new();
                let panel_title = panel.kind().title();
                let mut delta_count: u32 = 0;
                let mut first_token = false;

                let result = {
                    let exchange =
                        run_exchange(&mut panel, &text, None, &cancel, |delta| {
                            if !first_token {
                                spinner.finish_and_clear();
                                first_token = true;
                                print!("\n  {} ", style(panel_title).cyan().bold());
                                let _ = std::io::stdout().flush();
                            }
                            renderer.print_streaming_token(delta);
                            delta_count += 1;
                        });
                    tokio::pin!(exchange);

                    loop {
                        tokio::select! {
                            result = &mut exchange => break result,
                            event = chat_input.read_line() => {
                                if matches!(event, InputEvent::Interrupted | InputEvent::Eof) {
                                    cancel.cancel();
                                    break exchange.await;
                                }
                                // Send is disabled while streaming: typed lines are dropped.
                            }
                        }
                    }
                };

                if !first_token {
                    spinner.finish_and_clear();
                }

                match result {
                    Ok(Some(_turn)) => {
                        let response_ms = start_time.elapsed().as_millis() as u64;
                        println!();
                        renderer.print_stats_footer(delta_count, response_ms, panel_title);
                        println!();
                    }
                    Ok(None) => {
                        println!("\n  {}\n", style("Response cancelled.").dim());
                    }
                    Err(err) => {
                        // One dismissible notification; the prompt below
                        // is the re-enabled send control.
                        eprintln!("\n  {} {err}", style("!").red().bold());
                        eprintln!(
                            "  {}\n",
                            style("Your message was not answered; send it again to retry.").dim()
                        );
                    }
                }
            }
        }
    }

    info!(turns = panel.transcript().len(), "chat session ended");
    Ok(())
}

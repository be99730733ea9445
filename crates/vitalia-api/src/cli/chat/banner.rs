//! Welcome banner display for chat sessions.

use console::style;

use vitalia_types::panel::PanelKind;

/// Print the banner at the start of a chat session: panel identity,
/// edge function, gateway, and the slash-command hint.
pub fn print_welcome_banner(panel: PanelKind, gateway_url: &str) {
    println!();
    println!("  {}", style(panel.title()).cyan().bold());
    println!(
        "  {}",
        style(format!("{} \u{00b7} {}", panel.endpoint(), gateway_url)).dim()
    );
    if panel.accepts_image() {
        println!(
            "  {}",
            style("This panel accepts meal photos via `vita ask --image`.").dim()
        );
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

//! Terminal rendering for streamed and final assistant messages.
//!
//! During streaming, tokens are printed raw as they arrive; once the
//! full response is assembled it is re-rendered as markdown through
//! `termimad` (assistant answers are prose with headers and lists, so
//! no code highlighting is involved).

use std::io::Write;

use termimad::MadSkin;

/// Terminal markdown renderer for assistant messages.
pub struct ChatRenderer {
    skin: MadSkin,
}

impl ChatRenderer {
    /// Create a renderer with the default dark skin and yellow inline code.
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        Self { skin }
    }

    /// Render a complete markdown response.
    pub fn render_final(&self, markdown: &str) -> String {
        format!("{}", self.skin.term_text(markdown))
    }

    /// Print a single streaming token (raw, no formatting).
    pub fn print_streaming_token(&self, token: &str) {
        print!("{token}");
        let _ = std::io::stdout().flush();
    }

    /// Print the stats footer after an assistant response.
    ///
    /// Format: "| {deltas} deltas . {time}s . {panel}"
    pub fn print_stats_footer(&self, deltas: u32, response_ms: u64, panel: &str) {
        let seconds = response_ms as f64 / 1000.0;
        let footer = format!(
            "\n  {} {} deltas {} {:.1}s {} {}",
            console::style("|").dim(),
            console::style(deltas).dim(),
            console::style("\u{00b7}").dim(),
            console::style(seconds).dim(),
            console::style("\u{00b7}").dim(),
            console::style(panel).dim(),
        );
        println!("{footer}");
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

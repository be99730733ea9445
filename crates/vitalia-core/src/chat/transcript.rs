//! Append-only conversation transcript.
//!
//! The transcript is the durable (session-lifetime) record of a panel
//! conversation. Turns are appended fully formed and never mutated;
//! the assistant turn for a streamed response is appended only once the
//! stream has fully assembled.

use vitalia_types::chat::{ChatTurn, ImageAttachment};

/// Ordered, append-only sequence of [`ChatTurn`]s.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn, returning a reference to it.
    pub fn push_user(
        &mut self,
        text: impl Into<String>,
        image: Option<ImageAttachment>,
    ) -> &ChatTurn {
        let turn = match image {
            Some(image) => ChatTurn::user_with_image(text, image),
            None => ChatTurn::user(text),
        };
        self.turns.push(turn);
        self.turns.last().expect("just pushed")
    }

    /// Append an assistant turn, returning a reference to it.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> &ChatTurn {
        self.turns.push(ChatTurn::assistant(text));
        self.turns.last().expect("just pushed")
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript holds no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }
}

//! Per-exchange streaming state.
//!
//! A `StreamSession` exists only while one assistant response is being
//! streamed: created when the request starts, mutated only by the single
//! loop consuming that response, destroyed when the stream ends or the
//! request fails. The accumulated text grows monotonically -- deltas are
//! appended in arrival order and nothing is ever removed.

use std::time::Instant;

/// Accumulator for one in-flight assistant response.
#[derive(Debug)]
pub struct StreamSession {
    accumulated: String,
    delta_count: u32,
    started_at: Instant,
}

impl StreamSession {
    /// Start a new session with an empty buffer.
    pub fn new() -> Self {
        Self {
            accumulated: String::new(),
            delta_count: 0,
            started_at: Instant::now(),
        }
    }

    /// Append one delta to the accumulated text.
    pub fn apply_delta(&mut self, text: &str) {
        self.accumulated.push_str(text);
        self.delta_count += 1;
    }

    /// Text assembled so far.
    pub fn text(&self) -> &str {
        &self.accumulated
    }

    /// Number of deltas applied.
    pub fn delta_count(&self) -> u32 {
        self.delta_count
    }

    /// Milliseconds since the session started.
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    /// Consume the session, yielding the assembled text.
    pub fn into_text(self) -> String {
        self.accumulated
    }
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_assemble_in_order() {
        let mut session = StreamSession::new();
        session.apply_delta("Turm");
        session.apply_delta("eric helps.");
        assert_eq!(session.text(), "Turmeric helps.");
        assert_eq!(session.delta_count(), 2);
    }

    #[test]
    fn test_accumulated_length_is_monotonic() {
        let mut session = StreamSession::new();
        let mut prev_len = 0;
        for delta in ["a", "", "bc", "d"] {
            session.apply_delta(delta);
            assert!(session.text().len() >= prev_len);
            prev_len = session.text().len();
        }
        assert_eq!(session.into_text(), "abcd");
    }
}

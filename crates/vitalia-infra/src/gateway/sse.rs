//! Incremental SSE delta decoder.
//!
//! Turns a chunked byte stream of `data: {json}` events into text
//! deltas, tolerant of chunk boundaries that split UTF-8 sequences or
//! JSON payloads. This is the one decoder shared by every panel.
//!
//! The subtle part is recovery when a `data:` payload fails to parse:
//! the line is pushed back onto the front of the buffer (with its
//! newline) and extraction stops until more bytes arrive. Parse failure
//! usually means the payload straddles two network chunks -- discarding
//! the line would silently lose that delta. A payload that stays
//! unparsable is re-tried on every chunk and finally discarded at end
//! of stream; capping the retries instead would make the emitted deltas
//! depend on how the bytes were chunked.

use tracing::{debug, trace};

use super::types::ChatCompletionChunk;
use super::utf8::StreamingUtf8Decoder;

/// Prefix of an SSE data line, including the separating space.
const DATA_PREFIX: &str = "data: ";

/// End-of-stream sentinel payload.
const DONE_SENTINEL: &str = "[DONE]";

/// Chunk-fed SSE decoder producing text deltas in arrival order.
///
/// State spans chunk boundaries: an incomplete UTF-8 sequence, an
/// incomplete (or re-buffered) line, and the `[DONE]` latch. Once the
/// sentinel is seen no further deltas are ever produced, regardless of
/// what else arrives.
#[derive(Debug, Default)]
pub struct DeltaDecoder {
    utf8: StreamingUtf8Decoder,
    buffer: String,
    done: bool,
}

impl DeltaDecoder {
    /// Create a fresh decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one chunk of bytes, returning the deltas it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut deltas = Vec::new();
        if self.done {
            return deltas;
        }

        self.buffer.push_str(&self.utf8.decode(chunk));

        while let Some(newline) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=newline).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }

            // SSE comments / keep-alives and blank separators are inert.
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                trace!(line = %line, "ignoring non-data SSE line");
                continue;
            };
            let payload = payload.trim();

            if payload == DONE_SENTINEL {
                self.done = true;
                break;
            }

            match serde_json::from_str::<ChatCompletionChunk>(payload) {
                Ok(parsed) => {
                    if let Some(text) = parsed.into_delta() {
                        if !text.is_empty() {
                            deltas.push(text);
                        }
                    }
                }
                Err(err) => {
                    // Likely truncated mid-chunk: put the line back and
                    // resume once more bytes arrive.
                    trace!(error = %err, "re-buffering unparsable data line");
                    self.buffer.insert(0, '\n');
                    self.buffer.insert_str(0, &line);
                    break;
                }
            }
        }

        deltas
    }

    /// Finish at end of stream, discarding whatever could not complete.
    pub fn finish(self) {
        let remainder = self.buffer.trim();
        if !self.done && !remainder.is_empty() {
            debug!(
                len = remainder.len(),
                "stream ended with an unprocessed partial line"
            );
        }
    }
}

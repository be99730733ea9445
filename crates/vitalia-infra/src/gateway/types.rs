//! Wire payload types for the edge gateway.
//!
//! The edge functions mirror a chat-completions streaming format: each
//! SSE `data:` payload is a chunk whose text delta sits at
//! `choices[0].delta.content`. Unknown fields are ignored and every
//! level is optional -- a chunk without a delta simply contributes
//! nothing.

use serde::Deserialize;

/// One streamed chunk from the gateway.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

impl ChatCompletionChunk {
    /// The text delta carried by this chunk, if any.
    pub fn into_delta(self) -> Option<String> {
        self.choices.into_iter().next()?.delta.content
    }
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error body returned by the edge functions on failure.
#[derive(Debug, Deserialize)]
pub struct GatewayErrorBody {
    pub error: String,
}

//! Edge gateway client and the SSE decoding pipeline under it.
//!
//! `client` implements the `AssistantGateway` port over reqwest.
//! `sse` turns raw byte chunks into text deltas; `utf8` handles the
//! streaming UTF-8 decode it sits on; `types` holds the wire payloads.

pub mod client;
pub mod sse;
pub mod types;
pub mod utf8;

pub use client::EdgeGateway;
pub use sse::DeltaDecoder;

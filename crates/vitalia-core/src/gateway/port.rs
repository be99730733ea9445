//! AssistantGateway trait definition.
//!
//! This is the seam between the chat core and the HTTP edge-function
//! client in `vitalia-infra`. The gateway owns everything transport:
//! request framing, authentication, status classification, and SSE
//! decoding. The core only ever sees an ordered stream of
//! [`StreamEvent`]s.

use std::pin::Pin;

use futures_util::Stream;

use vitalia_types::assistant::{AssistantError, AssistantRequest, StreamEvent};

/// Ordered stream of events from one assistant exchange.
///
/// The stream is pull-based: dropping it stops reading and releases the
/// underlying connection, which is how consumer teardown cancels an
/// in-flight response.
pub type EventStream =
    Pin<Box<dyn Stream<Item = Result<StreamEvent, AssistantError>> + Send + 'static>>;

/// Trait for assistant edge-gateway backends.
///
/// Implementations live in `vitalia-infra` (e.g., `EdgeGateway`). The
/// stream method returns a boxed stream so the trait stays object-safe
/// for [`super::BoxAssistantGateway`].
pub trait AssistantGateway: Send + Sync {
    /// Human-readable gateway name (e.g., "edge").
    fn name(&self) -> &str;

    /// Send a streaming request to the named edge function.
    ///
    /// Events arrive in strict order: one `Connected`, zero or more
    /// `TextDelta`s in arrival order, then `Done`. A transport failure
    /// yields a single `Err` and ends the stream.
    fn stream(&self, endpoint: &str, request: AssistantRequest) -> EventStream;
}

//! The exchange loop: drive one streamed response to completion.
//!
//! Single-threaded and cooperative -- the loop suspends only while
//! awaiting the next event. Deltas are applied to the panel's session in
//! strict arrival order, and the caller's `on_delta` hook fires after
//! each one so a front-end can reflect the growing text.

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use vitalia_types::assistant::StreamEvent;
use vitalia_types::chat::{ChatTurn, ImageAttachment};
use vitalia_types::panel::PanelError;

use super::panel::ChatPanel;

/// Run one full exchange on a panel.
///
/// Begins the exchange (appending the user turn), pulls events until the
/// stream finishes, then completes the session and returns the assistant
/// turn (`None` when the response carried no text).
///
/// Cancellation: when `cancel` fires between chunks the loop stops
/// pulling -- dropping the stream releases the connection -- the session
/// is aborted with no assistant turn, and `Ok(None)` is returned. No
/// `on_delta` calls happen after teardown.
///
/// Errors: a transport failure aborts the session (no assistant turn,
/// send re-enabled) and is returned for the caller to surface as a
/// single notification.
pub async fn run_exchange(
    panel: &mut ChatPanel,
    query: &str,
    image: Option<ImageAttachment>,
    cancel: &CancellationToken,
    mut on_delta: impl FnMut(&str),
) -> Result<Option<ChatTurn>, PanelError> {
    let mut stream = panel.begin(query, image)?;

    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                drop(stream);
                panel.abort();
                debug!(panel = %panel.kind(), "exchange cancelled by consumer teardown");
                return Ok(None);
            }
            event = stream.next() => event,
        };

        match event {
            Some(Ok(StreamEvent::Connected)) => {}
            Some(Ok(StreamEvent::TextDelta { text })) => {
                panel.apply_delta(&text);
                on_delta(&text);
            }
            Some(Ok(StreamEvent::Done)) | None => break,
            Some(Err(err)) => {
                drop(stream);
                panel.abort();
                return Err(err.into());
            }
        }
    }

    Ok(panel.complete())
}

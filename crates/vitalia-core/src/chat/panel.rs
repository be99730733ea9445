//! Chat panel state machine.
//!
//! One panel owns one transcript, one gateway handle, and at most one
//! active [`StreamSession`]. The single-active-stream rule is the only
//! shared-mutable-resource rule in the system: `begin` refuses a second
//! send while a response is still streaming, which is what keeps the
//! send affordance disabled in any front-end built on top.

use tracing::debug;

use vitalia_types::assistant::AssistantRequest;
use vitalia_types::chat::{ChatTurn, ImageAttachment};
use vitalia_types::panel::{PanelError, PanelKind};

use crate::gateway::{BoxAssistantGateway, EventStream};

use super::stream_session::StreamSession;
use super::transcript::Transcript;

/// A single assistant chat panel.
pub struct ChatPanel {
    kind: PanelKind,
    gateway: BoxAssistantGateway,
    transcript: Transcript,
    session: Option<StreamSession>,
}

impl ChatPanel {
    /// Create a panel backed by the given gateway.
    pub fn new(kind: PanelKind, gateway: BoxAssistantGateway) -> Self {
        Self {
            kind,
            gateway,
            transcript: Transcript::new(),
            session: None,
        }
    }

    /// Which panel this is.
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    /// The conversation so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Whether a response stream is currently active.
    pub fn is_streaming(&self) -> bool {
        self.session.is_some()
    }

    /// Text accumulated by the active session, if one exists.
    pub fn accumulated(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.text())
    }

    /// Start an exchange: append the user turn, open a stream session,
    /// and return the gateway's event stream for the caller to drive.
    ///
    /// Fails with [`PanelError::StreamActive`] while a previous stream
    /// is still in flight, and with [`PanelError::ImageNotSupported`]
    /// when an image is attached to a panel that takes none. The request
    /// carries the panel's default query type.
    pub fn begin(
        &mut self,
        query: &str,
        image: Option<ImageAttachment>,
    ) -> Result<EventStream, PanelError> {
        if self.session.is_some() {
            return Err(PanelError::StreamActive);
        }
        if image.is_some() && !self.kind.accepts_image() {
            return Err(PanelError::ImageNotSupported(self.kind));
        }

        let mut request = AssistantRequest::new(query);
        if let Some(query_type) = self.kind.query_type() {
            request = request.with_type(query_type);
        }
        if let Some(attachment) = &image {
            request = request.with_image(attachment.to_data_url());
        }

        self.transcript.push_user(query, image);
        self.session = Some(StreamSession::new());
        debug!(panel = %self.kind, endpoint = self.kind.endpoint(), "assistant exchange started");

        Ok(self.gateway.stream(self.kind.endpoint(), request))
    }

    /// Apply one text delta to the active session.
    ///
    /// A delta arriving with no active session (after an abort) is
    /// dropped -- teardown means no further updates.
    pub fn apply_delta(&mut self, text: &str) {
        if let Some(session) = &mut self.session {
            session.apply_delta(text);
        }
    }

    /// Finish the active session normally.
    ///
    /// Appends the assembled assistant turn to the transcript and
    /// returns it. A session that produced no text appends nothing.
    pub fn complete(&mut self) -> Option<ChatTurn> {
        let session = self.session.take()?;
        let delta_count = session.delta_count();
        let elapsed_ms = session.elapsed_ms();
        let text = session.into_text();

        if text.is_empty() {
            debug!(panel = %self.kind, "stream completed with no text, no assistant turn recorded");
            return None;
        }

        debug!(panel = %self.kind, delta_count, elapsed_ms, "assistant exchange completed");
        Some(self.transcript.push_assistant(text).clone())
    }

    /// Discard the active session without recording an assistant turn
    /// (fatal error or cancellation). The panel is immediately ready for
    /// the next send.
    pub fn abort(&mut self) {
        if self.session.take().is_some() {
            debug!(panel = %self.kind, "assistant exchange aborted, no assistant turn recorded");
        }
    }

    /// Stats for the active session: (deltas applied, elapsed ms).
    pub fn session_stats(&self) -> Option<(u32, u64)> {
        self.session
            .as_ref()
            .map(|s| (s.delta_count(), s.elapsed_ms()))
    }
}

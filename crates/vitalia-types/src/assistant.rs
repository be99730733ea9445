//! Assistant gateway wire types for Vitalia.
//!
//! These types model the request body sent to the edge functions, the
//! events emitted while a streamed response is consumed, and the error
//! taxonomy for a single exchange.

use serde::{Deserialize, Serialize};

/// Request body for an assistant edge function.
///
/// Serializes to `{"query": ..., "type": ..., "image": ...}` with the
/// optional fields omitted entirely when absent (never `null`). The
/// `image` value is a data URL string produced by
/// [`crate::chat::ImageAttachment::to_data_url`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub query: String,

    /// Query category hint, e.g. "body-systems". Panel-dependent.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub query_type: Option<String>,

    /// Image as a data URL string (food analysis panel only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image: Option<String>,
}

impl AssistantRequest {
    /// Create a text-only request with no category hint.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            query_type: None,
            image: None,
        }
    }

    /// Set the query category hint.
    pub fn with_type(mut self, query_type: impl Into<String>) -> Self {
        self.query_type = Some(query_type.into());
        self
    }

    /// Attach an image as a data URL string.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Events emitted while consuming one streamed assistant response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The response stream was opened successfully.
    Connected,

    /// An incremental fragment of assistant text, in arrival order.
    TextDelta { text: String },

    /// The stream completed normally.
    Done,
}

/// Errors from one assistant exchange.
///
/// A single malformed SSE line is NOT represented here: it is recovered
/// locally by the decoder (re-buffered until more bytes arrive) and
/// never surfaced. Only transport-level failures abort a session.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("request failed (HTTP {status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("response had no readable body")]
    EmptyBody,

    #[error("rate limited, try again shortly")]
    RateLimited,

    #[error("AI usage quota exceeded")]
    QuotaExceeded,

    #[error("stream interrupted: {0}")]
    TransportInterrupted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_without_optional_fields() {
        let request = AssistantRequest::new("How does the digestive system work?");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"query":"How does the digestive system work?"}"#);
    }

    #[test]
    fn test_request_serializes_with_type() {
        let request =
            AssistantRequest::new("How does the digestive system work?").with_type("body-systems");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"query":"How does the digestive system work?","type":"body-systems"}"#
        );
    }

    #[test]
    fn test_request_serializes_with_image() {
        let request = AssistantRequest::new("What is in this meal?")
            .with_image("data:image/jpeg;base64,AAAA");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""image":"data:image/jpeg;base64,AAAA""#));
        assert!(!json.contains(r#""type""#));
    }

    #[test]
    fn test_request_deserialize_defaults() {
        let request: AssistantRequest = serde_json::from_str(r#"{"query":"hi"}"#).unwrap();
        assert_eq!(request.query, "hi");
        assert!(request.query_type.is_none());
        assert!(request.image.is_none());
    }

    #[test]
    fn test_stream_event_serde() {
        let event = StreamEvent::TextDelta {
            text: "Turm".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"text_delta","text":"Turm"}"#);
        let parsed: StreamEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_error_display() {
        let err = AssistantError::RequestFailed {
            status: 500,
            message: "upstream unavailable".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("upstream unavailable"));

        assert_eq!(
            AssistantError::RateLimited.to_string(),
            "rate limited, try again shortly"
        );
    }
}

//! Chat turn and image attachment types for Vitalia.
//!
//! A conversation with an assistant panel is an ordered, append-only
//! sequence of [`ChatTurn`]s. Turns are never mutated after creation and
//! live only for the process lifetime (no persistence).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a turn in a panel conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message (user or assistant) in a panel conversation transcript.
///
/// Turns are created fully formed and never mutated afterwards. The
/// assistant turn for a streamed response is only created once the
/// stream has fully assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub id: Uuid,
    pub role: TurnRole,
    pub text: String,
    /// Image attached by the user (food analysis panel only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attached_image: Option<ImageAttachment>,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a user turn with no attachment.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: TurnRole::User,
            text: text.into(),
            attached_image: None,
            created_at: Utc::now(),
        }
    }

    /// Create a user turn carrying an image attachment.
    pub fn user_with_image(text: impl Into<String>, image: ImageAttachment) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: TurnRole::User,
            text: text.into(),
            attached_image: Some(image),
            created_at: Utc::now(),
        }
    }

    /// Create an assistant turn from fully assembled response text.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role: TurnRole::Assistant,
            text: text.into(),
            attached_image: None,
            created_at: Utc::now(),
        }
    }
}

/// Errors from image attachment encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("not a data URL: missing 'data:' scheme")]
    MissingScheme,

    #[error("unsupported data URL encoding: expected ';base64,'")]
    NotBase64,

    #[error("base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// An image attached to a user turn.
///
/// On the wire the image travels as a data URL
/// (`data:<media_type>;base64,<payload>`), the "binary-as-text" form the
/// edge functions accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// MIME type, e.g. "image/jpeg".
    pub media_type: String,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl ImageAttachment {
    /// Create an attachment from raw bytes and a MIME type.
    pub fn new(media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            data,
        }
    }

    /// Encode as a data URL string for the request body.
    pub fn to_data_url(&self) -> String {
        use base64::Engine;
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{payload}", self.media_type)
    }

    /// Parse a data URL string back into an attachment.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        use base64::Engine;

        let rest = url.strip_prefix("data:").ok_or(ImageError::MissingScheme)?;
        let (media_type, payload) = rest.split_once(";base64,").ok_or(ImageError::NotBase64)?;
        let data = base64::engine::general_purpose::STANDARD.decode(payload)?;

        Ok(Self {
            media_type: media_type.to_string(),
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Assistant] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_serde() {
        let json = serde_json::to_string(&TurnRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: TurnRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TurnRole::Assistant);
    }

    #[test]
    fn test_user_turn_has_no_attachment() {
        let turn = ChatTurn::user("hello");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.text, "hello");
        assert!(turn.attached_image.is_none());
    }

    #[test]
    fn test_assistant_turn() {
        let turn = ChatTurn::assistant("Turmeric helps.");
        assert_eq!(turn.role, TurnRole::Assistant);
        assert_eq!(turn.text, "Turmeric helps.");
    }

    #[test]
    fn test_turn_serialize_omits_absent_image() {
        let turn = ChatTurn::user("hi");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(!json.contains("attached_image"));
    }

    #[test]
    fn test_data_url_roundtrip() {
        let image = ImageAttachment::new("image/png", vec![0x89, 0x50, 0x4e, 0x47]);
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/png;base64,"));

        let parsed = ImageAttachment::from_data_url(&url).unwrap();
        assert_eq!(parsed, image);
    }

    #[test]
    fn test_data_url_missing_scheme() {
        let err = ImageAttachment::from_data_url("image/png;base64,AAAA").unwrap_err();
        assert!(matches!(err, ImageError::MissingScheme));
    }

    #[test]
    fn test_data_url_not_base64() {
        let err = ImageAttachment::from_data_url("data:image/png;hex,00ff").unwrap_err();
        assert!(matches!(err, ImageError::NotBase64));
    }

    #[test]
    fn test_data_url_bad_payload() {
        let err = ImageAttachment::from_data_url("data:image/png;base64,!!!").unwrap_err();
        assert!(matches!(err, ImageError::Decode(_)));
    }
}

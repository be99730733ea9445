//! Assistant panel definitions for Vitalia.
//!
//! Three chat panels share two edge functions: the body-systems tutor
//! and the general wellness assistant both talk to `health-assistant`,
//! while food analysis talks to `analyze-food` and accepts an image.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::assistant::AssistantError;

/// The three assistant chat panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelKind {
    /// Anatomy/physiology tutor ("How does the digestive system work?").
    BodySystems,
    /// General health and wellness assistant.
    Wellness,
    /// Meal photo / description analysis.
    FoodAnalysis,
}

impl PanelKind {
    /// All panels, in display order.
    pub const ALL: [PanelKind; 3] = [
        PanelKind::Wellness,
        PanelKind::BodySystems,
        PanelKind::FoodAnalysis,
    ];

    /// Edge function name this panel posts to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            PanelKind::BodySystems | PanelKind::Wellness => "health-assistant",
            PanelKind::FoodAnalysis => "analyze-food",
        }
    }

    /// Default `type` field for this panel's request bodies.
    pub fn query_type(&self) -> Option<&'static str> {
        match self {
            PanelKind::BodySystems => Some("body-systems"),
            PanelKind::Wellness | PanelKind::FoodAnalysis => None,
        }
    }

    /// Whether this panel accepts an image attachment.
    pub fn accepts_image(&self) -> bool {
        matches!(self, PanelKind::FoodAnalysis)
    }

    /// Human-readable panel title for banners and listings.
    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::BodySystems => "Body Systems Tutor",
            PanelKind::Wellness => "Wellness Assistant",
            PanelKind::FoodAnalysis => "Food Analysis",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelKind::BodySystems => write!(f, "body-systems"),
            PanelKind::Wellness => write!(f, "wellness"),
            PanelKind::FoodAnalysis => write!(f, "food-analysis"),
        }
    }
}

impl FromStr for PanelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "body-systems" => Ok(PanelKind::BodySystems),
            "wellness" => Ok(PanelKind::Wellness),
            "food-analysis" => Ok(PanelKind::FoodAnalysis),
            other => Err(format!("invalid panel: '{other}'")),
        }
    }
}

/// Errors from panel-level operations.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// At most one response stream may be active per panel; the send
    /// affordance is disabled while one is.
    #[error("a response stream is already active for this panel")]
    StreamActive,

    #[error("panel '{0}' does not accept image attachments")]
    ImageNotSupported(PanelKind),

    #[error(transparent)]
    Assistant(#[from] AssistantError),
}

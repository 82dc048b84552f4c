//! Draft Models
//!
//! A draft is a generated, not-yet-published candidate reply tied to one
//! source feedback/question/chat item. `drafted` is the only state that
//! accepts mutations; `published` and `rejected` are terminal.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Draft lifecycle state
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    /// Generated, awaiting review
    #[default]
    Drafted,
    /// Approved and published; terminal
    Published,
    /// Archived without publishing; terminal
    Rejected,
}

impl DraftStatus {
    /// Get the string form for wire payloads
    pub fn as_str(&self) -> &str {
        match self {
            Self::Drafted => "drafted",
            Self::Published => "published",
            Self::Rejected => "rejected",
        }
    }

    /// Parse from string; unrecognized input yields `None`
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drafted" => Some(Self::Drafted),
            "published" => Some(Self::Published),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether the draft still accepts approve/reject/regenerate/edit
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Drafted)
    }

    /// Terminal states never transition again
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

/// Unrecognized remote statuses decode to the initial state rather than
/// failing the whole listing.
impl<'de> Deserialize<'de> for DraftStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(Self::from_str)
            .unwrap_or(Self::Drafted))
    }
}

/// One generated-reply artifact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Draft {
    pub id: i64,
    pub shop_id: i64,
    /// Source feedback/question/chat item id
    #[serde(default)]
    pub source_id: Option<i64>,
    #[serde(default)]
    pub status: DraftStatus,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Draft {
    /// Whether this draft still accepts mutations
    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }
}

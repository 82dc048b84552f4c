//! Signature Models
//!
//! Brand-scoped text fragments appended to generated replies. Signatures are
//! deduplicated by `(brand, type, text)` with brand and text compared
//! case-insensitively.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which reply surface a signature applies to
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignatureKind {
    /// Applies everywhere
    #[default]
    All,
    /// Review replies only
    Review,
    /// Question replies only
    Question,
    /// Chat replies only
    Chat,
}

impl SignatureKind {
    /// Get the string form for wire payloads and storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Review => "review",
            Self::Question => "question",
            Self::Chat => "chat",
        }
    }

    /// Parse from string; unrecognized input yields `None`
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "review" => Some(Self::Review),
            "question" => Some(Self::Question),
            "chat" => Some(Self::Chat),
            _ => None,
        }
    }
}

/// Legacy payloads carry arbitrary strings here; anything unrecognized
/// falls back to `All`.
impl<'de> Deserialize<'de> for SignatureKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value
            .as_str()
            .and_then(Self::from_str)
            .unwrap_or(Self::All))
    }
}

/// Normalize signature text: trim and collapse internal whitespace runs
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize a brand name: trim; empty means the "all" scope
pub fn normalize_brand(brand: &str) -> String {
    let trimmed = brand.trim();
    if trimmed.is_empty() {
        "all".to_string()
    } else {
        trimmed.to_string()
    }
}

/// One signature entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignatureItem {
    /// Signature text, trimmed and non-empty
    pub text: String,
    /// Reply surface this signature applies to
    #[serde(rename = "type", default)]
    pub kind: SignatureKind,
    /// Brand scope; "all" applies to every brand
    #[serde(default = "default_brand")]
    pub brand: String,
    /// Inactive signatures are kept but not appended
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Creation timestamp (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn default_brand() -> String {
    "all".to_string()
}

fn default_is_active() -> bool {
    true
}

impl SignatureItem {
    /// Build a normalized signature stamped with the current time
    pub fn new(text: &str, kind: SignatureKind, brand: &str) -> Self {
        Self {
            text: normalize_text(text),
            kind,
            brand: normalize_brand(brand),
            is_active: true,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    /// Uniqueness key: `(brand, type, text)`, brand and text lowercased
    pub fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}",
            normalize_brand(&self.brand).to_lowercase(),
            self.kind.as_str(),
            normalize_text(&self.text).to_lowercase()
        )
    }

    /// Lenient decode of one persisted entry. Legacy blobs store bare
    /// strings; objects with empty text are dropped.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let text = normalize_text(s);
                if text.is_empty() {
                    return None;
                }
                Some(Self {
                    text,
                    kind: SignatureKind::All,
                    brand: "all".to_string(),
                    is_active: true,
                    created_at: None,
                })
            }
            Value::Object(object) => {
                let text = normalize_text(object.get("text")?.as_str()?);
                if text.is_empty() {
                    return None;
                }
                let kind = object
                    .get("type")
                    .and_then(Value::as_str)
                    .and_then(SignatureKind::from_str)
                    .unwrap_or(SignatureKind::All);
                let brand = object
                    .get("brand")
                    .and_then(Value::as_str)
                    .map(normalize_brand)
                    .unwrap_or_else(default_brand);
                let is_active = object
                    .get("is_active")
                    .and_then(Value::as_bool)
                    .unwrap_or(true);
                let created_at = object
                    .get("created_at")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                Some(Self {
                    text,
                    kind,
                    brand,
                    is_active,
                    created_at,
                })
            }
            _ => None,
        }
    }
}

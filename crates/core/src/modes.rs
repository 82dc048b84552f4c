//! Work Mode Policy
//!
//! The per-rating automation matrix (1-5 stars -> manual/semi/auto) and the
//! pure mapping between it and the three aggregate work modes. The control
//! matrix shape is a product policy constant held on `WorkModePolicy`, so a
//! caller can skew it without touching the derivation rules.

use std::collections::BTreeMap;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Automation policy for a single star rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// No automation: replies are written by hand
    Manual,
    /// A draft is generated automatically but published by hand
    Semi,
    /// Drafted and published without intervention
    Auto,
}

impl ReplyMode {
    /// Get the display label for this mode
    pub fn label(&self) -> &str {
        match self {
            Self::Manual => "Manual",
            Self::Semi => "Semi-automatic",
            Self::Auto => "Automatic",
        }
    }

    /// Get the string form for wire payloads and storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => "manual",
            Self::Semi => "semi",
            Self::Auto => "auto",
        }
    }

    /// Parse from string; unrecognized input yields `None` so the caller
    /// supplies its own fallback
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Some(Self::Manual),
            "semi" => Some(Self::Semi),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }

    /// The `(auto_draft, auto_publish)` flag pair this mode stands for
    pub fn draft_publish_flags(&self) -> (bool, bool) {
        match self {
            Self::Manual => (false, false),
            Self::Semi => (true, false),
            Self::Auto => (true, true),
        }
    }
}

/// Aggregate automation stance derived from the rating map
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    /// Every rating is handled by hand
    Manual,
    /// Mixed policy: drafts are reviewed before publishing at least somewhere
    Control,
    /// Every rating is fully automated
    Autopilot,
}

impl WorkMode {
    /// Get the display label for this mode
    pub fn label(&self) -> &str {
        match self {
            Self::Manual => "Manual",
            Self::Control => "Control",
            Self::Autopilot => "Autopilot",
        }
    }

    /// Get the string form for wire payloads and storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => "manual",
            Self::Control => "control",
            Self::Autopilot => "autopilot",
        }
    }

    /// Parse from string; unrecognized input yields `None`
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Some(Self::Manual),
            "control" => Some(Self::Control),
            "autopilot" => Some(Self::Autopilot),
            _ => None,
        }
    }

    /// The per-review `reply_mode` value this aggregate mode mirrors
    pub fn reply_mode(&self) -> ReplyMode {
        match self {
            Self::Manual => ReplyMode::Manual,
            Self::Control => ReplyMode::Semi,
            Self::Autopilot => ReplyMode::Auto,
        }
    }
}

/// Automation policy per star rating. Keys are exactly the integers 1..=5;
/// the type enforces that by construction.
///
/// Wire format is a string-keyed object (`{"1":"manual",...,"5":"auto"}`).
/// Decoding is lenient: missing or unrecognized entries keep the documented
/// default for that rating instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingModeMap {
    modes: [ReplyMode; 5],
}

impl Default for RatingModeMap {
    /// The documented default: negative ratings by hand, middling ones
    /// reviewed, positive ones automated
    fn default() -> Self {
        Self::new([
            ReplyMode::Manual,
            ReplyMode::Manual,
            ReplyMode::Semi,
            ReplyMode::Auto,
            ReplyMode::Auto,
        ])
    }
}

impl RatingModeMap {
    /// Build a map from modes for ratings 1..=5 in order
    pub fn new(modes: [ReplyMode; 5]) -> Self {
        Self { modes }
    }

    /// Build a map with the same mode for every rating
    pub fn uniform(mode: ReplyMode) -> Self {
        Self::new([mode; 5])
    }

    /// Get the mode for a rating; `None` outside 1..=5
    pub fn get(&self, rating: u8) -> Option<ReplyMode> {
        if (1..=5).contains(&rating) {
            Some(self.modes[(rating - 1) as usize])
        } else {
            None
        }
    }

    /// Set the mode for a rating; out-of-range ratings are ignored
    pub fn set(&mut self, rating: u8, mode: ReplyMode) {
        if (1..=5).contains(&rating) {
            self.modes[(rating - 1) as usize] = mode;
        }
    }

    /// Iterate `(rating, mode)` pairs in ascending rating order
    pub fn entries(&self) -> impl Iterator<Item = (u8, ReplyMode)> + '_ {
        self.modes
            .iter()
            .enumerate()
            .map(|(i, mode)| (i as u8 + 1, *mode))
    }

    /// Whether every rating uses the given mode
    pub fn is_uniform(&self, mode: ReplyMode) -> bool {
        self.modes.iter().all(|m| *m == mode)
    }

    /// Lenient decode from an arbitrary JSON value. Non-object input yields
    /// the default map; object entries with an invalid key or value keep the
    /// default for that rating.
    pub fn from_value(value: &Value) -> Self {
        let mut map = Self::default();
        if let Some(object) = value.as_object() {
            for (key, raw) in object {
                let Ok(rating) = key.trim().parse::<u8>() else {
                    continue;
                };
                let Some(mode) = raw.as_str().and_then(ReplyMode::from_str) else {
                    continue;
                };
                map.set(rating, mode);
            }
        }
        map
    }

    /// The wire shape (`{"1":"manual",...}`) as an owned JSON value
    pub fn to_value(&self) -> Value {
        let object: BTreeMap<String, String> = self
            .entries()
            .map(|(rating, mode)| (rating.to_string(), mode.as_str().to_string()))
            .collect();
        serde_json::to_value(object).unwrap_or(Value::Null)
    }
}

impl Serialize for RatingModeMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(5))?;
        for (rating, mode) in self.entries() {
            map.serialize_entry(&rating.to_string(), mode.as_str())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RatingModeMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Pure mapping between the rating map and the aggregate work mode.
///
/// Selecting a mode overwrites the entire map via `matrix_for_mode`; editing
/// one rating afterwards silently lands the map back in `Control` on the next
/// derivation. That soft policy is intentional, there is no mode locking.
#[derive(Debug, Clone)]
pub struct WorkModePolicy {
    control_matrix: RatingModeMap,
}

impl Default for WorkModePolicy {
    /// Balanced control shape: 1-3 stars reviewed, 4-5 stars automated
    fn default() -> Self {
        Self {
            control_matrix: RatingModeMap::new([
                ReplyMode::Semi,
                ReplyMode::Semi,
                ReplyMode::Semi,
                ReplyMode::Auto,
                ReplyMode::Auto,
            ]),
        }
    }
}

impl WorkModePolicy {
    /// Create a policy with a custom control matrix.
    ///
    /// A uniform all-auto or all-manual matrix is rejected: it would derive
    /// back to `Autopilot`/`Manual` and break the mode round trip for
    /// `Control`.
    pub fn new(control_matrix: RatingModeMap) -> CoreResult<Self> {
        if control_matrix.is_uniform(ReplyMode::Auto) || control_matrix.is_uniform(ReplyMode::Manual) {
            return Err(CoreError::validation(
                "control matrix must stay mixed so it derives back to control",
            ));
        }
        Ok(Self { control_matrix })
    }

    /// The matrix `matrix_for_mode(Control)` hands out
    pub fn control_matrix(&self) -> &RatingModeMap {
        &self.control_matrix
    }

    /// Derive the aggregate mode from a rating map. Total: any map maps to
    /// exactly one mode.
    pub fn derive_mode(&self, map: &RatingModeMap) -> WorkMode {
        if map.is_uniform(ReplyMode::Auto) {
            WorkMode::Autopilot
        } else if map.is_uniform(ReplyMode::Manual) {
            WorkMode::Manual
        } else {
            WorkMode::Control
        }
    }

    /// The canonical rating map for an aggregate mode
    pub fn matrix_for_mode(&self, mode: WorkMode) -> RatingModeMap {
        match mode {
            WorkMode::Autopilot => RatingModeMap::uniform(ReplyMode::Auto),
            WorkMode::Manual => RatingModeMap::uniform(ReplyMode::Manual),
            WorkMode::Control => self.control_matrix.clone(),
        }
    }
}

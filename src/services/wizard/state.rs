//! Wizard State
//!
//! The fixed step sequence and the persisted progress blob. Restore never
//! fails: unknown steps, malformed rating maps, and legacy signature shapes
//! all fall back to defaults, and a blob written by an older build resumes
//! at a valid step.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use replydesk_core::modes::{RatingModeMap, WorkMode};

use crate::models::settings::{AddressForm, ResponseLength, ResponseStyle};
use crate::models::signature::SignatureItem;
use crate::services::signatures;

/// Onboarding steps in wizard order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    /// Connect the marketplace account with an integration token
    Connection,
    /// Choose the automation work mode
    Mode,
    /// Fine-tune the per-rating reply matrix
    Ratings,
    /// Pick the reply tone
    Tone,
    /// Collect at least one signature, per brand if desired
    Brands,
    /// Adjust response style details
    ResponseStyle,
    /// Everything saved; wrap up
    Complete,
}

impl WizardStep {
    /// Get the display label for this step
    pub fn label(&self) -> &str {
        match self {
            Self::Connection => "Connection",
            Self::Mode => "Work mode",
            Self::Ratings => "Ratings",
            Self::Tone => "Tone",
            Self::Brands => "Brands",
            Self::ResponseStyle => "Response style",
            Self::Complete => "Complete",
        }
    }

    /// Get the step index (0-based) for progress calculation
    pub fn index(&self) -> usize {
        match self {
            Self::Connection => 0,
            Self::Mode => 1,
            Self::Ratings => 2,
            Self::Tone => 3,
            Self::Brands => 4,
            Self::ResponseStyle => 5,
            Self::Complete => 6,
        }
    }

    /// Total number of steps (excluding Complete)
    pub fn total_steps() -> usize {
        6
    }

    /// Get the next step
    pub fn next(&self) -> Self {
        match self {
            Self::Connection => Self::Mode,
            Self::Mode => Self::Ratings,
            Self::Ratings => Self::Tone,
            Self::Tone => Self::Brands,
            Self::Brands => Self::ResponseStyle,
            Self::ResponseStyle => Self::Complete,
            Self::Complete => Self::Complete,
        }
    }

    /// Get the previous step
    pub fn prev(&self) -> Self {
        match self {
            Self::Connection => Self::Connection,
            Self::Mode => Self::Connection,
            Self::Ratings => Self::Mode,
            Self::Tone => Self::Ratings,
            Self::Brands => Self::Tone,
            Self::ResponseStyle => Self::Brands,
            Self::Complete => Self::ResponseStyle,
        }
    }

    /// Steps that may be skipped without completing them
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Ratings | Self::ResponseStyle)
    }

    /// Get the string form used in the persisted blob
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connection => "connection",
            Self::Mode => "mode",
            Self::Ratings => "ratings",
            Self::Tone => "tone",
            Self::Brands => "brands",
            Self::ResponseStyle => "responseStyle",
            Self::Complete => "complete",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "connection" => Some(Self::Connection),
            "mode" => Some(Self::Mode),
            "ratings" => Some(Self::Ratings),
            "tone" => Some(Self::Tone),
            "brands" => Some(Self::Brands),
            "responseStyle" => Some(Self::ResponseStyle),
            "complete" => Some(Self::Complete),
            _ => None,
        }
    }
}

/// Everything the wizard has collected so far, persisted whole after every
/// mutation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub completed_steps: Vec<WizardStep>,

    pub shop_id: Option<i64>,
    pub store_connected: bool,
    pub store_name: String,
    pub token: String,
    pub is_token_valid: bool,

    pub automation_mode: Option<WorkMode>,
    pub rating_modes: RatingModeMap,
    pub tone: String,
    pub signatures: Vec<SignatureItem>,
    pub response_style: ResponseStyle,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: WizardStep::Connection,
            completed_steps: Vec::new(),
            shop_id: None,
            store_connected: false,
            store_name: String::new(),
            token: String::new(),
            is_token_valid: false,
            automation_mode: None,
            rating_modes: RatingModeMap::default(),
            tone: "none".to_string(),
            signatures: Vec::new(),
            response_style: ResponseStyle::default(),
        }
    }
}

impl WizardState {
    /// Rebuild state from a persisted blob, salvaging whatever fields are
    /// usable. An unknown current step restarts from the first step.
    pub fn from_value(raw: &Value) -> Self {
        let mut state = Self::default();
        let Some(doc) = raw.as_object() else {
            return state;
        };

        if let Some(step) = doc
            .get("current_step")
            .and_then(Value::as_str)
            .and_then(WizardStep::from_str)
        {
            state.current_step = step;
        }
        if let Some(steps) = doc.get("completed_steps").and_then(Value::as_array) {
            for entry in steps {
                if let Some(step) = entry.as_str().and_then(WizardStep::from_str) {
                    state.mark_completed(step);
                }
            }
        }

        state.shop_id = doc.get("shop_id").and_then(Value::as_i64);
        if let Some(v) = doc.get("store_connected").and_then(Value::as_bool) {
            state.store_connected = v;
        }
        if let Some(name) = doc.get("store_name").and_then(Value::as_str) {
            state.store_name = name.to_string();
        }
        if let Some(token) = doc.get("token").and_then(Value::as_str) {
            state.token = token.trim().to_string();
        }
        if let Some(v) = doc.get("is_token_valid").and_then(Value::as_bool) {
            state.is_token_valid = v;
        }

        state.automation_mode = doc
            .get("automation_mode")
            .and_then(Value::as_str)
            .and_then(WorkMode::from_str);
        if let Some(map) = doc.get("rating_modes") {
            state.rating_modes = RatingModeMap::from_value(map);
        }
        if let Some(tone) = doc.get("tone").and_then(Value::as_str) {
            let tone = tone.trim();
            if !tone.is_empty() {
                state.tone = tone.to_string();
            }
        }

        if let Some(raw_list) = doc.get("signatures") {
            state.signatures = signatures::normalize_list(raw_list);
        }
        // Older blobs kept signatures under "brands"
        if state.signatures.is_empty() {
            if let Some(legacy) = doc.get("brands") {
                state.signatures = signatures::normalize_list(legacy);
            }
        }

        if let Some(style) = doc.get("response_style").and_then(Value::as_object) {
            if let Some(form) = style
                .get("address_form")
                .and_then(|v| serde_json::from_value::<AddressForm>(v.clone()).ok())
            {
                state.response_style.address_form = form;
            }
            if let Some(v) = style.get("use_customer_name").and_then(Value::as_bool) {
                state.response_style.use_customer_name = v;
            }
            if let Some(v) = style.get("use_emoji").and_then(Value::as_bool) {
                state.response_style.use_emoji = v;
            }
            if let Some(length) = style
                .get("response_length")
                .and_then(|v| serde_json::from_value::<ResponseLength>(v.clone()).ok())
            {
                state.response_style.response_length = length;
            }
        }

        state
    }

    pub fn mark_completed(&mut self, step: WizardStep) {
        if !self.completed_steps.contains(&step) {
            self.completed_steps.push(step);
        }
    }

    pub fn is_completed(&self, step: WizardStep) -> bool {
        self.completed_steps.contains(&step)
    }
}

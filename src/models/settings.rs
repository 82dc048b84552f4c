//! Settings Models
//!
//! The per-shop configuration document. Fields mirror the remote settings
//! contract; `config` stays a free-form nested map and is only ever updated
//! through path-based setters so unrelated subsections survive a save.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use replydesk_core::modes::{RatingModeMap, ReplyMode, WorkMode, WorkModePolicy};
use replydesk_core::{get_path, set_path};

use crate::models::signature::SignatureItem;

/// How generated replies address the customer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AddressForm {
    /// Polite second person, capitalized
    #[default]
    FormalYou,
    /// Polite second person, lowercase
    InformalYou,
    /// Familiar second person
    Casual,
}

impl AddressForm {
    /// The `config.advanced.address_format` wire value
    pub fn wire_format(&self) -> &str {
        match self {
            Self::FormalYou => "vy_caps",
            Self::InformalYou => "vy_lower",
            Self::Casual => "ty",
        }
    }
}

/// Target length for generated replies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseLength {
    Short,
    #[serde(rename = "default")]
    #[default]
    Standard,
    Long,
}

impl ResponseLength {
    /// The `config.advanced.answer_length` wire value
    pub fn as_str(&self) -> &str {
        match self {
            Self::Short => "short",
            Self::Standard => "default",
            Self::Long => "long",
        }
    }
}

/// Response-style options collected by the wizard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseStyle {
    #[serde(default)]
    pub address_form: AddressForm,
    #[serde(default = "default_true")]
    pub use_customer_name: bool,
    #[serde(default = "default_true")]
    pub use_emoji: bool,
    #[serde(default)]
    pub response_length: ResponseLength,
}

impl Default for ResponseStyle {
    fn default() -> Self {
        Self {
            address_form: AddressForm::FormalYou,
            use_customer_name: true,
            use_emoji: true,
            response_length: ResponseLength::Standard,
        }
    }
}

/// The full per-shop settings document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShopSettings {
    #[serde(default)]
    pub shop_id: i64,

    #[serde(default)]
    pub automation_enabled: bool,
    #[serde(default = "default_true")]
    pub auto_sync: bool,
    #[serde(default = "default_true")]
    pub auto_draft: bool,
    #[serde(default)]
    pub auto_publish: bool,

    /// Mirrors the aggregate work mode for reviews
    #[serde(default = "default_reply_mode")]
    pub reply_mode: ReplyMode,
    #[serde(default)]
    pub rating_mode_map: RatingModeMap,
    /// Floor below which nothing is auto-published even on an `auto` rating
    #[serde(default = "default_min_rating")]
    pub min_rating_to_autopublish: u8,

    // Questions carry their own policy set, independent of reviews
    #[serde(default = "default_questions_mode")]
    pub questions_reply_mode: ReplyMode,
    #[serde(default)]
    pub questions_auto_draft: bool,
    #[serde(default)]
    pub questions_auto_publish: bool,

    #[serde(default = "default_language")]
    pub language: String,
    /// Tone identifier; unknown values pass through to the generator
    #[serde(default = "default_tone")]
    pub tone: String,
    /// 0 means unlimited
    #[serde(default)]
    pub auto_draft_limit_per_sync: i64,

    #[serde(default = "default_true")]
    pub chat_enabled: bool,
    #[serde(default)]
    pub chat_auto_reply: bool,

    /// Legacy single-signature slot; always null once `signatures` is used
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub signatures: Vec<SignatureItem>,

    #[serde(default)]
    pub blacklist_keywords: Vec<String>,
    #[serde(default)]
    pub whitelist_keywords: Vec<String>,
    #[serde(default = "default_object")]
    pub templates: Value,

    /// Free-form nested map (`advanced.*`, `chat.*`, `onboarding.*`, ...)
    #[serde(default = "default_object")]
    pub config: Value,
}

fn default_true() -> bool {
    true
}

fn default_reply_mode() -> ReplyMode {
    ReplyMode::Semi
}

fn default_questions_mode() -> ReplyMode {
    ReplyMode::Manual
}

fn default_min_rating() -> u8 {
    4
}

fn default_language() -> String {
    "ru".to_string()
}

fn default_tone() -> String {
    "polite".to_string()
}

fn default_object() -> Value {
    json!({})
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            shop_id: 0,
            automation_enabled: false,
            auto_sync: true,
            auto_draft: true,
            auto_publish: false,
            reply_mode: default_reply_mode(),
            rating_mode_map: RatingModeMap::default(),
            min_rating_to_autopublish: default_min_rating(),
            questions_reply_mode: default_questions_mode(),
            questions_auto_draft: false,
            questions_auto_publish: false,
            language: default_language(),
            tone: default_tone(),
            auto_draft_limit_per_sync: 0,
            chat_enabled: true,
            chat_auto_reply: false,
            signature: None,
            signatures: Vec::new(),
            blacklist_keywords: Vec::new(),
            whitelist_keywords: Vec::new(),
            templates: default_object(),
            config: default_object(),
        }
    }
}

impl ShopSettings {
    /// Overwrite the whole review policy from an aggregate work mode.
    ///
    /// The entire rating map is replaced; a manual per-rating edit afterwards
    /// lands the document back in `Control` on the next derivation.
    pub fn apply_work_mode(&mut self, mode: WorkMode, policy: &WorkModePolicy) {
        self.rating_mode_map = policy.matrix_for_mode(mode);
        self.reply_mode = mode.reply_mode();
        self.automation_enabled = mode == WorkMode::Autopilot;
        self.auto_draft = mode != WorkMode::Manual;
        self.auto_publish = mode == WorkMode::Autopilot;
    }

    /// The aggregate work mode the current rating map derives to
    pub fn derived_work_mode(&self, policy: &WorkModePolicy) -> WorkMode {
        policy.derive_mode(&self.rating_mode_map)
    }

    /// Set the questions policy from a single mode selector
    pub fn set_questions_mode(&mut self, mode: ReplyMode) {
        let (auto_draft, auto_publish) = mode.draft_publish_flags();
        self.questions_reply_mode = mode;
        self.questions_auto_draft = auto_draft;
        self.questions_auto_publish = auto_publish;
    }

    /// Read one nested config value by dot-separated path
    pub fn config_value(&self, path: &str) -> Option<&Value> {
        get_path(&self.config, path)
    }

    /// Write one nested config value by dot-separated path, preserving
    /// sibling subsections
    pub fn set_config_value(&mut self, path: &str, value: Value) {
        set_path(&mut self.config, path, value);
    }
}

//! Settings Store
//!
//! Loads, normalizes, and saves the per-shop settings document. Loading
//! joins the settings, shop, and brand calls concurrently; only the
//! settings call is required, the other two degrade to empty data. Saving
//! projects the mutable field subset and round-trips `config` as a whole
//! object so nested keys owned by other features survive a partial write.

use std::sync::Arc;

use serde_json::{json, Value};

use replydesk_core::modes::{RatingModeMap, ReplyMode};
use replydesk_core::{coerce_bool, coerce_i64, coerce_string, coerce_u8, get_path, remove_path, set_path};

use crate::api::BackendApi;
use crate::models::settings::ShopSettings;
use crate::models::shop::ShopInfo;
use crate::services::signatures;
use crate::utils::error::AppResult;

/// Config paths holding booleans that arrive in sloppy shapes
const BOOL_CONFIG_PATHS: &[&str] = &[
    "advanced.use_buyer_name",
    "advanced.mention_product_name",
    "advanced.emoji_enabled",
    "advanced.photo_reaction_enabled",
    "chat.confirm_send",
    "chat.confirm_ai_insert",
    "recommendations.enabled",
];

/// Everything a settings load produces. The shop and brand halves are
/// optional: their calls failing never discards the settings document.
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
    pub settings: ShopSettings,
    pub shop: Option<ShopInfo>,
    pub brands: Vec<String>,
}

pub struct SettingsStore {
    api: Arc<dyn BackendApi>,
}

impl SettingsStore {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self { api }
    }

    /// Fetch and normalize everything the settings surface needs.
    pub async fn load(&self, shop_id: i64) -> AppResult<SettingsSnapshot> {
        let (settings, shop, brands) = tokio::join!(
            self.api.get_settings(shop_id),
            self.api.get_shop(shop_id),
            self.api.shop_brands(shop_id),
        );
        let raw = settings?;

        let shop = match shop {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!("[SettingsStore] Shop metadata unavailable: {}", e);
                None
            }
        };
        let brands = match brands {
            Ok(list) => signatures::normalize_brand_list(list),
            Err(e) => {
                tracing::warn!("[SettingsStore] Brand list unavailable: {}", e);
                Vec::new()
            }
        };

        let settings = normalize_remote(shop_id, &raw, &brands);
        Ok(SettingsSnapshot {
            settings,
            shop,
            brands,
        })
    }

    /// Push the mutable subset in one call, then reload so server-derived
    /// fields come back authoritative. No optimistic merge.
    pub async fn save(&self, settings: &ShopSettings) -> AppResult<SettingsSnapshot> {
        let payload = build_save_payload(settings);
        self.api
            .update_settings(settings.shop_id, payload)
            .await?;
        tracing::info!("[SettingsStore] Settings saved for shop {}", settings.shop_id);
        self.load(settings.shop_id).await
    }
}

// ============================================================================
// Load normalization
// ============================================================================

/// Turn a raw remote settings document into a typed one.
///
/// Every field is optional and sloppily typed on the wire; unrecognized
/// values fall back to the documented defaults instead of failing the load.
pub fn normalize_remote(shop_id: i64, raw: &Value, brands: &[String]) -> ShopSettings {
    let mut settings = ShopSettings {
        shop_id,
        ..ShopSettings::default()
    };
    let Some(doc) = raw.as_object() else {
        return settings;
    };

    if let Some(v) = doc.get("automation_enabled").and_then(coerce_bool) {
        settings.automation_enabled = v;
    }
    if let Some(v) = doc.get("auto_sync").and_then(coerce_bool) {
        settings.auto_sync = v;
    }
    if let Some(v) = doc.get("auto_draft").and_then(coerce_bool) {
        settings.auto_draft = v;
    }
    if let Some(v) = doc.get("auto_publish").and_then(coerce_bool) {
        settings.auto_publish = v;
    }

    if let Some(mode) = doc
        .get("reply_mode")
        .and_then(Value::as_str)
        .and_then(ReplyMode::from_str)
    {
        settings.reply_mode = mode;
    }
    if let Some(map) = doc.get("rating_mode_map") {
        settings.rating_mode_map = RatingModeMap::from_value(map);
    }
    if let Some(min) = doc.get("min_rating_to_autopublish").and_then(coerce_u8) {
        settings.min_rating_to_autopublish = min.clamp(1, 5);
    }

    if let Some(mode) = doc
        .get("questions_reply_mode")
        .and_then(Value::as_str)
        .and_then(ReplyMode::from_str)
    {
        settings.questions_reply_mode = mode;
    }
    if let Some(v) = doc.get("questions_auto_draft").and_then(coerce_bool) {
        settings.questions_auto_draft = v;
    }
    if let Some(v) = doc.get("questions_auto_publish").and_then(coerce_bool) {
        settings.questions_auto_publish = v;
    }

    if let Some(language) = doc.get("language").and_then(coerce_string) {
        settings.language = language;
    }
    if let Some(tone) = doc.get("tone").and_then(coerce_string) {
        settings.tone = tone;
    }
    if let Some(limit) = doc.get("auto_draft_limit_per_sync").and_then(coerce_i64) {
        settings.auto_draft_limit_per_sync = limit.max(0);
    }

    if let Some(v) = doc.get("chat_enabled").and_then(coerce_bool) {
        settings.chat_enabled = v;
    }
    if let Some(v) = doc.get("chat_auto_reply").and_then(coerce_bool) {
        settings.chat_auto_reply = v;
    }

    settings.signature = doc.get("signature").and_then(coerce_string);
    if let Some(raw_list) = doc.get("signatures") {
        settings.signatures = signatures::normalize_list(raw_list);
        signatures::canonicalize_brands(&mut settings.signatures, brands);
    }

    settings.blacklist_keywords = string_list(doc.get("blacklist_keywords"));
    settings.whitelist_keywords = string_list(doc.get("whitelist_keywords"));

    if let Some(templates) = doc.get("templates").filter(|v| v.is_object()) {
        settings.templates = templates.clone();
    }
    if let Some(config) = doc.get("config").filter(|v| v.is_object()) {
        settings.config = config.clone();
    }

    settings
}

fn string_list(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = raw else {
        return Vec::new();
    };
    entries.iter().filter_map(coerce_string).collect()
}

// ============================================================================
// Save projection
// ============================================================================

/// Project the mutable settings subset into the update payload.
///
/// `config` always travels whole, normalized for the API; the legacy
/// `signature` slot is forced to null once structured signatures exist.
pub fn build_save_payload(settings: &ShopSettings) -> Value {
    let legacy_signature = if settings.signatures.is_empty() {
        settings.signature.clone()
    } else {
        None
    };

    json!({
        "automation_enabled": settings.automation_enabled,
        "auto_sync": settings.auto_sync,
        "auto_draft": settings.auto_draft,
        "auto_publish": settings.auto_publish,
        "reply_mode": settings.reply_mode,
        "rating_mode_map": settings.rating_mode_map,
        "min_rating_to_autopublish": settings.min_rating_to_autopublish,
        "questions_reply_mode": settings.questions_reply_mode,
        "questions_auto_draft": settings.questions_auto_draft,
        "questions_auto_publish": settings.questions_auto_publish,
        "language": settings.language,
        "tone": settings.tone,
        "auto_draft_limit_per_sync": settings.auto_draft_limit_per_sync,
        "chat_enabled": settings.chat_enabled,
        "chat_auto_reply": settings.chat_auto_reply,
        "signature": legacy_signature,
        "signatures": settings.signatures,
        "blacklist_keywords": settings.blacklist_keywords,
        "whitelist_keywords": settings.whitelist_keywords,
        "templates": settings.templates,
        "config": normalize_config_for_api(&settings.config),
    })
}

/// Clean the nested config for the outgoing document. The stored draft is
/// left as-is; only the payload copy is normalized.
pub fn normalize_config_for_api(config: &Value) -> Value {
    let mut doc = if config.is_object() {
        config.clone()
    } else {
        json!({})
    };

    if let Some(raw) = get_path(&doc, "advanced.address_format").cloned() {
        match canonical_address_format(&raw) {
            Some(format) => set_path(&mut doc, "advanced.address_format", Value::String(format)),
            None => {
                remove_path(&mut doc, "advanced.address_format");
            }
        }
    }

    for path in BOOL_CONFIG_PATHS {
        let Some(raw) = get_path(&doc, path).cloned() else {
            continue;
        };
        match coerce_bool(&raw) {
            Some(flag) => set_path(&mut doc, path, Value::Bool(flag)),
            None => {
                remove_path(&mut doc, path);
            }
        }
    }

    if let Some(map) = doc.as_object_mut() {
        map.retain(|_, value| value.as_object().map_or(true, |o| !o.is_empty()));
    }
    doc
}

/// Resolve the stored address-format value, accepting the legacy aliases
/// and `{value: ...}` wrappers older builds wrote.
fn canonical_address_format(raw: &Value) -> Option<String> {
    let raw = match raw {
        Value::Object(map) => map.get("value")?,
        other => other,
    };
    let normalized = raw.as_str()?.trim().to_lowercase();
    match normalized.as_str() {
        "vy" | "vycaps" | "vy-caps" | "vy_upper" | "vy_caps" => Some("vy_caps".to_string()),
        "vy_lowercase" | "vy_lower" => Some("vy_lower".to_string()),
        "ty" => Some("ty".to_string()),
        _ => None,
    }
}

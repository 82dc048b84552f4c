//! Settings Store Integration Tests
//!
//! Covers the load path (concurrent fetch, normalization, tolerance for
//! unavailable shop metadata and brand lists) and the save path (payload
//! projection, config cleanup, authoritative reload).

use std::sync::Arc;

use serde_json::{json, Value};

use replydesk::{AppError, BackendApi, ReplyMode, SettingsStore, WorkMode};

use crate::support::ScriptedBackend;

// ============ Helpers ============

fn scripted_store() -> (Arc<ScriptedBackend>, SettingsStore) {
    let backend = Arc::new(ScriptedBackend::new());
    let api: Arc<dyn BackendApi> = backend.clone();
    (backend, SettingsStore::new(api))
}

// ============ Load Tests ============

#[tokio::test]
async fn test_load_normalizes_remote_document() {
    let (backend, store) = scripted_store();
    backend.add_shop(7, "Teapot Palace");
    backend.set_brands(&["zeta", "Acme"]);
    backend.set_settings(
        7,
        json!({
            "automation_enabled": "1",
            "auto_publish": 1,
            "reply_mode": "auto",
            "min_rating_to_autopublish": "7",
            "tone": "friendly",
            "signatures": [{"text": "Team Acme", "brand": "acme"}],
            "config": {"onboarding": {"done": true}},
        }),
    );

    let snapshot = store.load(7).await.unwrap();

    assert_eq!(snapshot.settings.shop_id, 7);
    assert!(snapshot.settings.automation_enabled);
    assert!(snapshot.settings.auto_publish);
    assert_eq!(snapshot.settings.reply_mode, ReplyMode::Auto);
    assert_eq!(snapshot.settings.min_rating_to_autopublish, 5);
    assert_eq!(snapshot.settings.tone, "friendly");
    assert_eq!(snapshot.settings.signatures.len(), 1);
    // Brand casing comes from the shop's brand list, not the stored value.
    assert_eq!(snapshot.settings.signatures[0].brand, "Acme");
    assert_eq!(
        snapshot.settings.config_value("onboarding.done"),
        Some(&json!(true))
    );

    assert_eq!(snapshot.shop.as_ref().map(|s| s.name.as_str()), Some("Teapot Palace"));
    assert_eq!(snapshot.brands, vec!["Acme".to_string(), "zeta".to_string()]);
}

#[tokio::test]
async fn test_load_survives_missing_shop_and_brands() {
    let (backend, store) = scripted_store();
    backend.set_settings(3, json!({"tone": "official"}));
    backend.fail("get_shop");
    backend.fail("shop_brands");

    let snapshot = store.load(3).await.unwrap();

    assert_eq!(snapshot.settings.tone, "official");
    assert!(snapshot.shop.is_none());
    assert!(snapshot.brands.is_empty());
}

#[tokio::test]
async fn test_load_fails_when_settings_call_fails() {
    let (backend, store) = scripted_store();
    backend.add_shop(3, "Still Here");
    backend.fail("get_settings");

    let result = store.load(3).await;

    assert!(matches!(result, Err(AppError::Api(_))));
}

#[tokio::test]
async fn test_load_defaults_for_empty_document() {
    let (_, store) = scripted_store();

    let snapshot = store.load(11).await.unwrap();

    let settings = &snapshot.settings;
    assert_eq!(settings.shop_id, 11);
    assert!(settings.auto_sync);
    assert!(settings.auto_draft);
    assert!(!settings.auto_publish);
    assert_eq!(settings.reply_mode, ReplyMode::Semi);
    assert_eq!(settings.derived_work_mode(&Default::default()), WorkMode::Control);
}

// ============ Save Tests ============

#[tokio::test]
async fn test_save_projects_payload_and_reloads() {
    let (backend, store) = scripted_store();
    backend.add_shop(5, "Brandless");
    backend.set_settings(5, json!({"tone": "polite"}));

    let snapshot = store.load(5).await.unwrap();
    let mut settings = snapshot.settings;
    settings.tone = "friendly".to_string();
    settings.auto_publish = true;
    settings.set_config_value("advanced.address_format", json!("vy"));
    settings.set_config_value("advanced.emoji_enabled", json!("1"));

    let saved = store.save(&settings).await.unwrap();

    let (shop_id, payload) = backend.last_update().unwrap();
    assert_eq!(shop_id, 5);
    let doc = payload.as_object().unwrap();
    assert!(doc.get("shop_id").is_none());
    assert_eq!(doc.get("tone"), Some(&json!("friendly")));
    assert_eq!(doc.get("auto_publish"), Some(&json!(true)));
    // The config copy in the payload is cleaned up for the API.
    assert_eq!(
        payload.pointer("/config/advanced/address_format"),
        Some(&json!("vy_caps"))
    );
    assert_eq!(
        payload.pointer("/config/advanced/emoji_enabled"),
        Some(&json!(true))
    );

    // The returned snapshot comes from a fresh load of the stored document.
    assert_eq!(saved.settings.tone, "friendly");
    assert!(saved.settings.auto_publish);
    assert_eq!(backend.call_count("get_settings"), 2);
}

#[tokio::test]
async fn test_save_nulls_legacy_signature_once_structured_exist() {
    let (backend, store) = scripted_store();
    backend.set_settings(
        8,
        json!({
            "signature": "Yours, old shop",
            "signatures": ["Team signature"],
        }),
    );

    let snapshot = store.load(8).await.unwrap();
    store.save(&snapshot.settings).await.unwrap();

    let (_, payload) = backend.last_update().unwrap();
    assert_eq!(payload.get("signature"), Some(&Value::Null));
    assert_eq!(payload.pointer("/signatures/0/text"), Some(&json!("Team signature")));
}

#[tokio::test]
async fn test_save_propagates_update_failure() {
    let (backend, store) = scripted_store();
    backend.set_settings(2, json!({}));
    let snapshot = store.load(2).await.unwrap();
    backend.fail("update_settings");

    let result = store.save(&snapshot.settings).await;

    assert!(result.is_err());
    assert!(backend.recorded_updates().is_empty());
}

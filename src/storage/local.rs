//! Local State Files
//!
//! Wizard progress and the remembered shop id live as small JSON files in
//! the app data directory. A missing or corrupt file reads as absent,
//! never as an error, and the worst a broken cache can do is restart
//! onboarding.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::utils::error::AppResult;
use crate::utils::paths::{
    ensure_dir, ensure_replydesk_dir, selected_shop_path, wizard_state_path,
};

#[derive(Debug, Clone)]
pub struct LocalStore {
    wizard_path: PathBuf,
    shop_path: PathBuf,
}

impl LocalStore {
    /// Open the store at the default per-user location, creating the data
    /// directory if needed.
    pub fn new() -> AppResult<Self> {
        ensure_replydesk_dir()?;
        Ok(Self {
            wizard_path: wizard_state_path()?,
            shop_path: selected_shop_path()?,
        })
    }

    /// Open the store rooted at a custom directory.
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            wizard_path: dir.join("setup-wizard.json"),
            shop_path: dir.join("selected-shop.json"),
        }
    }

    // ------------------------------------------------------------------
    // Wizard blob
    // ------------------------------------------------------------------

    /// Persist the whole wizard state as one blob.
    pub fn save_wizard_state<T: Serialize>(&self, state: &T) -> AppResult<()> {
        self.write_json(&self.wizard_path, state)
    }

    /// Read the wizard blob back, if a readable one exists.
    pub fn load_wizard_state(&self) -> Option<Value> {
        Self::read_json(&self.wizard_path)
    }

    /// Forget saved wizard progress.
    pub fn clear_wizard_state(&self) -> AppResult<()> {
        Self::remove(&self.wizard_path)
    }

    // ------------------------------------------------------------------
    // Remembered shop
    // ------------------------------------------------------------------

    pub fn set_selected_shop(&self, shop_id: i64) -> AppResult<()> {
        self.write_json(&self.shop_path, &serde_json::json!({ "shop_id": shop_id }))
    }

    pub fn selected_shop_id(&self) -> Option<i64> {
        Self::read_json(&self.shop_path)?
            .get("shop_id")?
            .as_i64()
    }

    pub fn clear_selected_shop(&self) -> AppResult<()> {
        Self::remove(&self.shop_path)
    }

    // ------------------------------------------------------------------
    // File plumbing
    // ------------------------------------------------------------------

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let content = serde_json::to_string_pretty(value)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn read_json(path: &Path) -> Option<Value> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn remove(path: &Path) -> AppResult<()> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

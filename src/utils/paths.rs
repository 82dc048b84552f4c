//! Cross-Platform Path Utilities
//!
//! Functions for resolving the application data directory and the local
//! cache files kept inside it.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the platform data directory (e.g. ~/.local/share on Linux)
pub fn data_dir() -> AppResult<PathBuf> {
    dirs::data_dir().ok_or_else(|| AppError::config("Could not determine data directory"))
}

/// Get the ReplyDesk data directory (<data_dir>/replydesk/)
pub fn replydesk_dir() -> AppResult<PathBuf> {
    Ok(data_dir()?.join("replydesk"))
}

/// Get the persisted wizard-progress file path
pub fn wizard_state_path() -> AppResult<PathBuf> {
    Ok(replydesk_dir()?.join("setup-wizard.json"))
}

/// Get the remembered-shop file path
pub fn selected_shop_path() -> AppResult<PathBuf> {
    Ok(replydesk_dir()?.join("selected-shop.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the ReplyDesk data directory, creating if it doesn't exist
pub fn ensure_replydesk_dir() -> AppResult<PathBuf> {
    let path = replydesk_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}

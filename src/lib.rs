//! ReplyDesk - Marketplace Reply Automation Core
//!
//! This library provides the client-side core for a marketplace
//! reply-automation tool. It includes:
//! - Per-shop settings load/save with lenient normalization
//! - Signature collection rules with brand and reply-surface scoping
//! - A paginated pending-draft queue with the draft lifecycle operations
//! - Sync job submission and cancellable status polling
//! - A resumable setup wizard that commits one settings document at the end

pub mod api;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export the service layer
pub use services::{
    DraftQueue, PollHandle, SettingsSnapshot, SettingsStore, SetupWizard, SyncJobPoller,
    WizardState, WizardStep,
};
// Re-export models used at the API boundary
pub use models::draft::{Draft, DraftStatus};
pub use models::job::{Job, JobStatus};
pub use models::settings::{AddressForm, ResponseLength, ResponseStyle, ShopSettings};
pub use models::shop::{NewShop, ShopInfo, TokenCheck};
pub use models::signature::{SignatureItem, SignatureKind};
pub use models::tone::ToneOption;
pub use api::{BackendApi, HttpBackend};
pub use state::AppState;
pub use storage::LocalStore;
pub use utils::error::{AppError, AppResult};
// Policy types live in the core crate
pub use replydesk_core::modes::{RatingModeMap, ReplyMode, WorkMode, WorkModePolicy};

//! Services
//!
//! Business logic over the backend API: settings load/save normalization,
//! signature collection rules, the draft queue, sync job polling, and the
//! setup wizard.

pub mod drafts;
pub mod jobs;
pub mod settings;
pub mod signatures;
pub mod wizard;

pub use drafts::DraftQueue;
pub use jobs::{PollHandle, SyncJobPoller};
pub use settings::{SettingsSnapshot, SettingsStore};
pub use wizard::{SetupWizard, WizardState, WizardStep};

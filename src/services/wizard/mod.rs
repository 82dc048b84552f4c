//! Setup Wizard Service
//!
//! Guided first-run onboarding with resumable, locally persisted progress.
//!
//! ## Architecture
//! - `state.rs` - Step sequence and the persisted progress blob with lenient restore
//! - `machine.rs` - Navigation rules, per-step side effects, and the final settings commit

pub mod machine;
pub mod state;

pub use machine::SetupWizard;
pub use state::{WizardState, WizardStep};

//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod draft;
pub mod job;
pub mod settings;
pub mod shop;
pub mod signature;
pub mod tone;

pub use draft::*;
pub use job::*;
pub use settings::*;
pub use shop::*;
pub use signature::*;
pub use tone::*;

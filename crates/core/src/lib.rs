//! ReplyDesk Core
//!
//! Foundational error types, the work-mode policy, and lenient data helpers
//! for the ReplyDesk workspace. This crate has zero dependencies on
//! application-level code (HTTP client, storage, services).
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `modes` - Rating map and work-mode policy (`ReplyMode`, `WorkMode`, `RatingModeMap`, `WorkModePolicy`)
//! - `coerce` - Total coercion helpers for loosely-typed values
//! - `json` - Structural path helpers over `serde_json::Value`
//!
//! ## Design Principles
//!
//! 1. **Zero external dependencies beyond serde/thiserror** - keeps build times minimal
//! 2. **Total functions over partial ones** - malformed persisted data coerces to defaults, never panics
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod coerce;
pub mod error;
pub mod json;
pub mod modes;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Work-Mode Policy ───────────────────────────────────────────────────
pub use modes::{RatingModeMap, ReplyMode, WorkMode, WorkModePolicy};

// ── Coercion Helpers ───────────────────────────────────────────────────
pub use coerce::{coerce_bool, coerce_i64, coerce_string, coerce_u8};

// ── JSON Path Helpers ──────────────────────────────────────────────────
pub use json::{get_path, remove_path, set_path};

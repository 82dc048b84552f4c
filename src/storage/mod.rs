//! Storage Layer
//!
//! Local persistence: small JSON state files in the per-user data directory.

pub mod local;

pub use local::*;

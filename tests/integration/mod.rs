//! Integration Tests Module
//!
//! This module contains integration tests for the ReplyDesk core.
//! Tests cover the settings store, the pending-draft queue, sync job
//! polling, and the setup wizard flow, all against a scripted backend.

// Shared scripted backend
mod support;

// Settings load/save tests
mod settings_test;


// Sync job polling tests
mod jobs_test;

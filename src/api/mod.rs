//! Backend API Surface
//!
//! Every remote contract the core consumes, behind one async trait so
//! services can run against the HTTP client or a scripted test double.
//!
//! ## Architecture
//!
//! - `BackendApi` - the trait listing each request contract
//! - `client` - `HttpBackend`, the reqwest implementation

pub mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{Draft, Job, NewShop, ShopInfo, TokenCheck, ToneOption};
use crate::utils::error::AppResult;

/// The remote contracts this core depends on.
///
/// Settings documents travel as raw JSON: the server owns the schema and the
/// store normalizes leniently on load, so nothing is lost to a strict decode.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Fetch the raw settings document for a shop
    async fn get_settings(&self, shop_id: i64) -> AppResult<Value>;

    /// Replace the mutable settings fields in one atomic call
    async fn update_settings(&self, shop_id: i64, payload: Value) -> AppResult<Value>;

    /// Fetch shop identity/metadata
    async fn get_shop(&self, shop_id: i64) -> AppResult<ShopInfo>;

    /// Create a shop from a validated integration token
    async fn create_shop(&self, payload: NewShop) -> AppResult<ShopInfo>;

    /// Canonical brand list for signature scoping
    async fn shop_brands(&self, shop_id: i64) -> AppResult<Vec<String>>;

    /// Check an integration credential without creating anything
    async fn verify_token(&self, token: &str) -> AppResult<TokenCheck>;

    /// Remote tone catalog; may legitimately be empty
    async fn tone_options(&self) -> AppResult<Vec<ToneOption>>;

    /// Pending drafts, paginated
    async fn list_pending_drafts(
        &self,
        shop_id: i64,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Draft>>;

    /// One draft by id
    async fn get_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft>;

    /// Replace the draft text without changing its status
    async fn update_draft_text(&self, shop_id: i64, draft_id: i64, text: &str)
        -> AppResult<Draft>;

    /// Publish a pending draft
    async fn approve_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft>;

    /// Archive a pending draft without publishing
    async fn reject_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft>;

    /// Regenerate a pending draft in place
    async fn regenerate_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft>;

    /// Queue a marketplace sync job, returning its id
    async fn submit_sync(&self, shop_id: i64) -> AppResult<i64>;

    /// Current status of a background job
    async fn job_status(&self, job_id: i64) -> AppResult<Job>;
}

pub use client::HttpBackend;

//! Draft Queue
//!
//! Paginated view over a shop's pending drafts plus the four lifecycle
//! operations: approve, reject, regenerate, edit. Every operation is a
//! single remote call; the local list is never merged optimistically, the
//! caller refreshes after a successful mutation.

use std::sync::Arc;

use crate::api::BackendApi;
use crate::models::draft::Draft;
use crate::utils::error::{AppError, AppResult};

/// Drafts fetched per page
pub const PAGE_SIZE: u32 = 20;

pub struct DraftQueue {
    api: Arc<dyn BackendApi>,
    shop_id: i64,
    drafts: Vec<Draft>,
    /// Offset of the next page to fetch
    next_offset: u32,
    has_more: bool,
}

impl DraftQueue {
    pub fn new(api: Arc<dyn BackendApi>, shop_id: i64) -> Self {
        Self {
            api,
            shop_id,
            drafts: Vec::new(),
            next_offset: 0,
            has_more: false,
        }
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    /// Whether another page is likely available. Inferred from the last
    /// page being full, so the final fetch can come back empty.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Replace the in-memory list with the first page. Resets pagination.
    pub async fn refresh(&mut self) -> AppResult<usize> {
        let page = self
            .api
            .list_pending_drafts(self.shop_id, PAGE_SIZE, 0)
            .await?;
        let fetched = page.len();
        self.has_more = fetched as u32 == PAGE_SIZE;
        self.next_offset = PAGE_SIZE;
        self.drafts = page;
        Ok(fetched)
    }

    /// Append the next page. A no-op once the queue is exhausted.
    pub async fn load_more(&mut self) -> AppResult<usize> {
        if !self.has_more {
            return Ok(0);
        }
        let page = self
            .api
            .list_pending_drafts(self.shop_id, PAGE_SIZE, self.next_offset)
            .await?;
        let fetched = page.len();
        self.has_more = fetched as u32 == PAGE_SIZE;
        self.next_offset += PAGE_SIZE;
        self.drafts.extend(page);
        Ok(fetched)
    }

    /// Publish a pending draft.
    pub async fn approve(&self, draft_id: i64) -> AppResult<Draft> {
        self.pending_draft(draft_id)?;
        let draft = self.api.approve_draft(self.shop_id, draft_id).await?;
        tracing::info!("[DraftQueue] Draft {} published", draft_id);
        Ok(draft)
    }

    /// Archive a pending draft without publishing it.
    pub async fn reject(&self, draft_id: i64) -> AppResult<Draft> {
        self.pending_draft(draft_id)?;
        let draft = self.api.reject_draft(self.shop_id, draft_id).await?;
        tracing::info!("[DraftQueue] Draft {} rejected", draft_id);
        Ok(draft)
    }

    /// Ask the generator for a fresh text. The draft keeps its id and
    /// stays pending.
    pub async fn regenerate(&self, draft_id: i64) -> AppResult<Draft> {
        self.pending_draft(draft_id)?;
        let draft = self.api.regenerate_draft(self.shop_id, draft_id).await?;
        tracing::info!("[DraftQueue] Draft {} regenerated", draft_id);
        Ok(draft)
    }

    /// Replace the reply text by hand. Only pending drafts are editable.
    pub async fn edit(&self, draft_id: i64, text: &str) -> AppResult<Draft> {
        self.pending_draft(draft_id)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::validation("reply text must not be empty"));
        }
        self.api
            .update_draft_text(self.shop_id, draft_id, text)
            .await
    }

    /// The listed drafts are the source of truth for what is operable:
    /// unknown ids and already-settled drafts are rejected locally before
    /// any network traffic.
    fn pending_draft(&self, draft_id: i64) -> AppResult<&Draft> {
        let draft = self
            .drafts
            .iter()
            .find(|d| d.id == draft_id)
            .ok_or_else(|| {
                AppError::not_found(format!("draft {} is not in the loaded list", draft_id))
            })?;
        if !draft.is_pending() {
            return Err(AppError::validation(format!(
                "draft {} is no longer pending",
                draft_id
            )));
        }
        Ok(draft)
    }
}

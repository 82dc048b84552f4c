//! Scripted Backend for Integration Tests
//!
//! In-memory stand-in for the remote service. Every test seeds the state it
//! needs (settings documents, shops, drafts, job scripts) and can inject
//! failures per endpoint or inspect recorded calls afterwards.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use replydesk::{
    AppError, AppResult, BackendApi, Draft, DraftStatus, Job, JobStatus, NewShop, ShopInfo,
    TokenCheck, ToneOption,
};

// ============ Scripted Backend ============

pub struct ScriptedBackend {
    settings: Mutex<HashMap<i64, Value>>,
    updates: Mutex<Vec<(i64, Value)>>,
    shops: Mutex<HashMap<i64, ShopInfo>>,
    brands: Mutex<Vec<String>>,
    valid_tokens: Mutex<HashMap<String, String>>,
    tones: Mutex<Vec<ToneOption>>,
    drafts: Mutex<Vec<Draft>>,
    job_scripts: Mutex<HashMap<i64, VecDeque<Job>>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
    next_shop_id: AtomicI64,
    next_job_id: AtomicI64,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            settings: Mutex::new(HashMap::new()),
            updates: Mutex::new(Vec::new()),
            shops: Mutex::new(HashMap::new()),
            brands: Mutex::new(Vec::new()),
            valid_tokens: Mutex::new(HashMap::new()),
            tones: Mutex::new(Vec::new()),
            drafts: Mutex::new(Vec::new()),
            job_scripts: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            next_shop_id: AtomicI64::new(100),
            next_job_id: AtomicI64::new(500),
        }
    }

    // ============ Seeding ============

    pub fn set_settings(&self, shop_id: i64, doc: Value) {
        self.settings.lock().unwrap().insert(shop_id, doc);
    }

    pub fn add_shop(&self, id: i64, name: &str) {
        self.shops.lock().unwrap().insert(
            id,
            ShopInfo {
                id,
                name: name.to_string(),
                my_role: None,
            },
        );
    }

    pub fn set_brands(&self, brands: &[&str]) {
        *self.brands.lock().unwrap() = brands.iter().map(|b| b.to_string()).collect();
    }

    pub fn allow_token(&self, token: &str, shop_name: &str) {
        self.valid_tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), shop_name.to_string());
    }

    pub fn set_tones(&self, tones: Vec<ToneOption>) {
        *self.tones.lock().unwrap() = tones;
    }

    pub fn seed_drafts(&self, shop_id: i64, count: i64) {
        let mut drafts = self.drafts.lock().unwrap();
        for id in 1..=count {
            drafts.push(Draft {
                id,
                shop_id,
                source_id: Some(id + 1000),
                status: DraftStatus::Drafted,
                text: format!("Draft reply {}", id),
                created_at: Some("2026-01-10T10:00:00Z".to_string()),
            });
        }
    }

    pub fn push_draft(&self, draft: Draft) {
        self.drafts.lock().unwrap().push(draft);
    }

    /// Settles a draft out from under a client, as a concurrent session would.
    pub fn settle_draft(&self, draft_id: i64, status: DraftStatus) {
        if let Some(draft) = self
            .drafts
            .lock()
            .unwrap()
            .iter_mut()
            .find(|d| d.id == draft_id)
        {
            draft.status = status;
        }
    }

    /// Scripts job_status responses: `pending_polls` Pending answers followed
    /// by a terminal status. The terminal answer repeats on further polls.
    pub fn script_job(&self, job_id: i64, pending_polls: usize, terminal: JobStatus) {
        self.script_job_with_error(job_id, pending_polls, terminal, None);
    }

    pub fn script_job_with_error(
        &self,
        job_id: i64,
        pending_polls: usize,
        terminal: JobStatus,
        last_error: Option<&str>,
    ) {
        let mut script = VecDeque::new();
        for _ in 0..pending_polls {
            script.push_back(Job {
                id: job_id,
                job_type: "sync".to_string(),
                status: JobStatus::Pending,
                last_error: None,
            });
        }
        script.push_back(Job {
            id: job_id,
            job_type: "sync".to_string(),
            status: terminal,
            last_error: last_error.map(|e| e.to_string()),
        });
        self.job_scripts.lock().unwrap().insert(job_id, script);
    }

    // ============ Failure Injection ============

    pub fn fail(&self, method: &str) {
        self.failing.lock().unwrap().insert(method.to_string());
    }

    fn check_fail(&self, method: &str) -> AppResult<()> {
        if self.failing.lock().unwrap().contains(method) {
            return Err(AppError::api(format!("{} is scripted to fail", method)));
        }
        Ok(())
    }

    // ============ Inspection ============

    pub fn call_count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == method)
            .count()
    }

    pub fn recorded_updates(&self) -> Vec<(i64, Value)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn last_update(&self) -> Option<(i64, Value)> {
        self.updates.lock().unwrap().last().cloned()
    }

    pub fn draft(&self, draft_id: i64) -> Option<Draft> {
        self.drafts
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == draft_id)
            .cloned()
    }

    fn record(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }
}

#[async_trait]
impl BackendApi for ScriptedBackend {
    async fn get_settings(&self, shop_id: i64) -> AppResult<Value> {
        self.check_fail("get_settings")?;
        self.record("get_settings");
        Ok(self
            .settings
            .lock()
            .unwrap()
            .get(&shop_id)
            .cloned()
            .unwrap_or_else(|| json!({})))
    }

    async fn update_settings(&self, shop_id: i64, payload: Value) -> AppResult<Value> {
        self.check_fail("update_settings")?;
        self.record("update_settings");
        self.updates
            .lock()
            .unwrap()
            .push((shop_id, payload.clone()));
        self.settings
            .lock()
            .unwrap()
            .insert(shop_id, payload.clone());
        Ok(payload)
    }

    async fn get_shop(&self, shop_id: i64) -> AppResult<ShopInfo> {
        self.check_fail("get_shop")?;
        self.record("get_shop");
        self.shops
            .lock()
            .unwrap()
            .get(&shop_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("shop {} does not exist", shop_id)))
    }

    async fn create_shop(&self, payload: NewShop) -> AppResult<ShopInfo> {
        self.check_fail("create_shop")?;
        self.record("create_shop");
        let name = self
            .valid_tokens
            .lock()
            .unwrap()
            .get(&payload.token)
            .cloned()
            .ok_or_else(|| AppError::api("token rejected by the marketplace"))?;
        let shop = ShopInfo {
            id: self.next_shop_id.fetch_add(1, Ordering::SeqCst),
            name: payload.name.unwrap_or(name),
            my_role: None,
        };
        self.shops.lock().unwrap().insert(shop.id, shop.clone());
        Ok(shop)
    }

    async fn shop_brands(&self, _shop_id: i64) -> AppResult<Vec<String>> {
        self.check_fail("shop_brands")?;
        self.record("shop_brands");
        Ok(self.brands.lock().unwrap().clone())
    }

    async fn verify_token(&self, token: &str) -> AppResult<TokenCheck> {
        self.check_fail("verify_token")?;
        self.record("verify_token");
        match self.valid_tokens.lock().unwrap().get(token) {
            Some(name) => Ok(TokenCheck {
                ok: true,
                shop_name: Some(name.clone()),
                error: None,
            }),
            None => Ok(TokenCheck {
                ok: false,
                shop_name: None,
                error: Some("token rejected by the marketplace".to_string()),
            }),
        }
    }

    async fn tone_options(&self) -> AppResult<Vec<ToneOption>> {
        self.check_fail("tone_options")?;
        self.record("tone_options");
        Ok(self.tones.lock().unwrap().clone())
    }

    async fn list_pending_drafts(
        &self,
        shop_id: i64,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Draft>> {
        self.check_fail("list_pending_drafts")?;
        self.record("list_pending_drafts");
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.shop_id == shop_id && d.is_pending())
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft> {
        self.check_fail("get_draft")?;
        self.record("get_draft");
        self.drafts
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.shop_id == shop_id && d.id == draft_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("draft {} does not exist", draft_id)))
    }

    async fn update_draft_text(
        &self,
        shop_id: i64,
        draft_id: i64,
        text: &str,
    ) -> AppResult<Draft> {
        self.check_fail("update_draft_text")?;
        self.record("update_draft_text");
        let mut drafts = self.drafts.lock().unwrap();
        let draft = drafts
            .iter_mut()
            .find(|d| d.shop_id == shop_id && d.id == draft_id)
            .ok_or_else(|| AppError::not_found(format!("draft {} does not exist", draft_id)))?;
        if !draft.is_pending() {
            return Err(AppError::validation("draft is no longer editable"));
        }
        draft.text = text.to_string();
        Ok(draft.clone())
    }

    async fn approve_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft> {
        self.check_fail("approve_draft")?;
        self.record("approve_draft");
        self.transition_draft(shop_id, draft_id, DraftStatus::Published)
    }

    async fn reject_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft> {
        self.check_fail("reject_draft")?;
        self.record("reject_draft");
        self.transition_draft(shop_id, draft_id, DraftStatus::Rejected)
    }

    async fn regenerate_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft> {
        self.check_fail("regenerate_draft")?;
        self.record("regenerate_draft");
        let mut drafts = self.drafts.lock().unwrap();
        let draft = drafts
            .iter_mut()
            .find(|d| d.shop_id == shop_id && d.id == draft_id)
            .ok_or_else(|| AppError::not_found(format!("draft {} does not exist", draft_id)))?;
        if !draft.is_pending() {
            return Err(AppError::validation("draft is no longer pending"));
        }
        draft.text = format!("Fresh text for draft {}", draft_id);
        Ok(draft.clone())
    }

    async fn submit_sync(&self, _shop_id: i64) -> AppResult<i64> {
        self.check_fail("submit_sync")?;
        self.record("submit_sync");
        Ok(self.next_job_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn job_status(&self, job_id: i64) -> AppResult<Job> {
        self.check_fail("job_status")?;
        self.record("job_status");
        let mut scripts = self.job_scripts.lock().unwrap();
        match scripts.get_mut(&job_id) {
            Some(script) if script.len() > 1 => Ok(script.pop_front().unwrap()),
            Some(script) => Ok(script.front().cloned().unwrap()),
            // Unscripted jobs stay pending forever.
            None => Ok(Job {
                id: job_id,
                job_type: "sync".to_string(),
                status: JobStatus::Pending,
                last_error: None,
            }),
        }
    }
}

impl ScriptedBackend {
    fn transition_draft(
        &self,
        shop_id: i64,
        draft_id: i64,
        status: DraftStatus,
    ) -> AppResult<Draft> {
        let mut drafts = self.drafts.lock().unwrap();
        let draft = drafts
            .iter_mut()
            .find(|d| d.shop_id == shop_id && d.id == draft_id)
            .ok_or_else(|| AppError::not_found(format!("draft {} does not exist", draft_id)))?;
        if !draft.is_pending() {
            return Err(AppError::validation("draft is no longer pending"));
        }
        draft.status = status;
        Ok(draft.clone())
    }
}

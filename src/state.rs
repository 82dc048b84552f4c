//! Application State
//!
//! Wires the backend client, local storage, and the work-mode policy into
//! the service layer. An embedding shell constructs one `AppState` and
//! pulls the services it needs from it.

use std::sync::Arc;

use replydesk_core::modes::WorkModePolicy;

use crate::api::{BackendApi, HttpBackend};
use crate::services::drafts::DraftQueue;
use crate::services::jobs::SyncJobPoller;
use crate::services::settings::SettingsStore;
use crate::services::wizard::SetupWizard;
use crate::storage::LocalStore;
use crate::utils::error::AppResult;

pub struct AppState {
    api: Arc<dyn BackendApi>,
    store: LocalStore,
    policy: WorkModePolicy,
    settings: SettingsStore,
}

impl AppState {
    /// Wire the services over any backend implementation.
    pub fn new(api: Arc<dyn BackendApi>, store: LocalStore) -> Self {
        Self {
            settings: SettingsStore::new(api.clone()),
            policy: WorkModePolicy::default(),
            api,
            store,
        }
    }

    /// Wire the services over the HTTP backend and the default local
    /// storage location.
    pub fn connect(base_url: &str, auth_token: Option<String>) -> AppResult<Self> {
        let api: Arc<dyn BackendApi> = match auth_token {
            Some(token) => Arc::new(HttpBackend::with_token(base_url, token)),
            None => Arc::new(HttpBackend::new(base_url)),
        };
        Ok(Self::new(api, LocalStore::new()?))
    }

    pub fn api(&self) -> Arc<dyn BackendApi> {
        self.api.clone()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn local_store(&self) -> &LocalStore {
        &self.store
    }

    pub fn policy(&self) -> &WorkModePolicy {
        &self.policy
    }

    /// The shop the user last worked with, if one is remembered.
    pub fn selected_shop_id(&self) -> Option<i64> {
        self.store.selected_shop_id()
    }

    /// Paginated queue over a shop's pending drafts.
    pub fn draft_queue(&self, shop_id: i64) -> DraftQueue {
        DraftQueue::new(self.api.clone(), shop_id)
    }

    /// Poller for marketplace sync jobs. Each call gets its own
    /// cancellation scope.
    pub fn sync_poller(&self) -> SyncJobPoller {
        SyncJobPoller::new(self.api.clone())
    }

    /// Start (or resume) onboarding.
    pub async fn setup_wizard(&self, new_shop: bool) -> SetupWizard {
        SetupWizard::start(
            self.api.clone(),
            self.store.clone(),
            self.policy.clone(),
            new_shop,
        )
        .await
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish()
    }
}

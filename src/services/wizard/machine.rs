//! Setup Wizard
//!
//! Drives first-run onboarding: connect a shop, choose the automation
//! mode, tune the rating matrix, pick a tone, collect signatures, adjust
//! the response style, then push everything to the backend in one save.
//! Progress persists after every mutation so a closed app resumes
//! mid-flow instead of starting over.

use std::sync::Arc;

use serde_json::json;

use replydesk_core::modes::{ReplyMode, WorkMode, WorkModePolicy};

use crate::api::BackendApi;
use crate::models::settings::{ResponseStyle, ShopSettings};
use crate::models::shop::NewShop;
use crate::models::signature::SignatureItem;
use crate::models::tone::{effective_tone_options, ToneOption};
use crate::services::settings::SettingsStore;
use crate::services::signatures;
use crate::storage::LocalStore;
use crate::utils::error::{AppError, AppResult};

use super::state::{WizardState, WizardStep};

pub struct SetupWizard {
    api: Arc<dyn BackendApi>,
    settings: SettingsStore,
    store: LocalStore,
    policy: WorkModePolicy,
    tones: Vec<ToneOption>,
    state: WizardState,
}

impl SetupWizard {
    /// Resume saved onboarding progress, or begin fresh.
    ///
    /// `new_shop` is the explicit add-another-shop entry: it discards any
    /// saved progress and the remembered shop so the connection step runs
    /// again. Otherwise a remembered, still-accessible shop pre-completes
    /// the connection step.
    pub async fn start(
        api: Arc<dyn BackendApi>,
        store: LocalStore,
        policy: WorkModePolicy,
        new_shop: bool,
    ) -> Self {
        let mut state = if new_shop {
            if let Err(e) = store.clear_wizard_state() {
                tracing::warn!("[SetupWizard] Failed to clear saved progress: {}", e);
            }
            if let Err(e) = store.clear_selected_shop() {
                tracing::warn!("[SetupWizard] Failed to forget shop id: {}", e);
            }
            WizardState::default()
        } else {
            store
                .load_wizard_state()
                .map(|blob| WizardState::from_value(&blob))
                .unwrap_or_default()
        };

        let tones = match api.tone_options().await {
            Ok(remote) => effective_tone_options(remote),
            Err(e) => {
                tracing::warn!("[SetupWizard] Tone catalog unavailable: {}", e);
                effective_tone_options(Vec::new())
            }
        };
        if !tones.iter().any(|t| t.value == state.tone) {
            if let Some(first) = tones.first() {
                state.tone = first.value.clone();
            }
        }

        if !new_shop && state.shop_id.is_none() {
            if let Some(shop_id) = store.selected_shop_id() {
                match api.get_shop(shop_id).await {
                    Ok(shop) => {
                        state.shop_id = Some(shop.id);
                        state.store_connected = true;
                        state.store_name = shop.name;
                        state.is_token_valid = true;
                        state.mark_completed(WizardStep::Connection);
                        if state.current_step == WizardStep::Connection {
                            state.current_step = WizardStep::Mode;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            "[SetupWizard] Remembered shop {} not accessible: {}",
                            shop_id,
                            e
                        );
                    }
                }
            }
        }

        let wizard = Self {
            settings: SettingsStore::new(api.clone()),
            api,
            store,
            policy,
            tones,
            state,
        };
        wizard.persist();
        wizard
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    /// Effective tone catalog: the remote one, or the built-in fallback.
    pub fn tone_options(&self) -> &[ToneOption] {
        &self.tones
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Whether the step's completion predicate currently holds.
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Connection => self.state.is_token_valid || self.state.store_connected,
            WizardStep::Mode => self.state.automation_mode.is_some(),
            WizardStep::Ratings => true,
            WizardStep::Tone => !self.state.tone.is_empty(),
            WizardStep::Brands => !self.state.signatures.is_empty(),
            WizardStep::ResponseStyle => true,
            WizardStep::Complete => true,
        }
    }

    /// Advance to the next step.
    ///
    /// The current step's completion predicate must hold, and the two
    /// side-effecting steps run their effect first: `connection` creates
    /// the shop if none exists yet, `responseStyle` performs the final
    /// settings save. If the effect fails the step does not advance.
    pub async fn next(&mut self) -> AppResult<WizardStep> {
        let step = self.state.current_step;
        if step == WizardStep::Complete {
            return Ok(step);
        }
        if !self.is_step_complete(step) {
            return Err(AppError::validation(format!(
                "the {} step is not finished",
                step.label()
            )));
        }

        match step {
            WizardStep::Connection => self.connect_shop().await?,
            WizardStep::ResponseStyle => self.commit_settings().await?,
            _ => {}
        }

        self.state.mark_completed(step);
        self.state.current_step = step.next();
        self.persist();
        Ok(self.state.current_step)
    }

    /// Go back one step. Allowed everywhere except the first step.
    pub fn prev(&mut self) -> WizardStep {
        let previous = self.state.current_step.prev();
        if previous != self.state.current_step {
            self.state.current_step = previous;
            self.persist();
        }
        self.state.current_step
    }

    /// Skip an optional step, marking it completed.
    pub fn skip(&mut self) -> AppResult<WizardStep> {
        let step = self.state.current_step;
        if !step.is_optional() {
            return Err(AppError::validation(format!(
                "the {} step cannot be skipped",
                step.label()
            )));
        }
        self.state.mark_completed(step);
        self.state.current_step = step.next();
        self.persist();
        Ok(self.state.current_step)
    }

    /// Jump directly to a step. Only steps at or before the current one,
    /// or already-completed steps, are reachable.
    pub fn go_to_step(&mut self, step: WizardStep) -> bool {
        let reachable =
            step.index() <= self.state.current_step.index() || self.state.is_completed(step);
        if reachable {
            self.state.current_step = step;
            self.persist();
        }
        reachable
    }

    // ------------------------------------------------------------------
    // Step data
    // ------------------------------------------------------------------

    /// Check an integration token. Failures come back as a not-ok result
    /// rather than an error so the connection step can show them inline.
    pub async fn verify_token(&mut self, token: &str) -> crate::models::shop::TokenCheck {
        use crate::models::shop::TokenCheck;

        let token = token.trim().to_string();
        if token.is_empty() {
            self.state.token.clear();
            self.state.is_token_valid = false;
            self.persist();
            return TokenCheck {
                ok: false,
                shop_name: None,
                error: Some("token must not be empty".to_string()),
            };
        }

        self.state.token = token.clone();
        let check = match self.api.verify_token(&token).await {
            Ok(check) => check,
            Err(e) => TokenCheck {
                ok: false,
                shop_name: None,
                error: Some(String::from(e)),
            },
        };

        self.state.is_token_valid = check.ok;
        if check.ok {
            if let Some(name) = &check.shop_name {
                self.state.store_name = name.clone();
            }
        }
        self.persist();
        check
    }

    /// Choose the automation mode. The whole rating matrix is overwritten
    /// with the mode's shape; per-rating tweaks happen afterwards on the
    /// ratings step.
    pub fn select_mode(&mut self, mode: WorkMode) {
        self.state.automation_mode = Some(mode);
        self.state.rating_modes = self.policy.matrix_for_mode(mode);
        self.persist();
    }

    /// Override one rating's reply mode. Ratings outside 1..=5 are ignored.
    pub fn set_rating_mode(&mut self, rating: u8, mode: ReplyMode) {
        self.state.rating_modes.set(rating, mode);
        self.persist();
    }

    /// Pick a tone. Empty values are ignored.
    pub fn set_tone(&mut self, tone: &str) {
        let tone = tone.trim();
        if tone.is_empty() {
            return;
        }
        self.state.tone = tone.to_string();
        self.persist();
    }

    /// Add a signature. Duplicates are silently dropped; over-long text is
    /// a validation error.
    pub fn add_signature(&mut self, item: SignatureItem) -> AppResult<bool> {
        let added = signatures::add(&mut self.state.signatures, item)?;
        if added {
            self.persist();
        }
        Ok(added)
    }

    /// Remove the first signature matching text and brand.
    pub fn remove_signature(&mut self, text: &str, brand: &str) -> bool {
        let removed = signatures::remove(&mut self.state.signatures, text, brand);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn set_response_style(&mut self, style: ResponseStyle) {
        self.state.response_style = style;
        self.persist();
    }

    // ------------------------------------------------------------------
    // Completion
    // ------------------------------------------------------------------

    /// Wrap up a finished run: drop the saved progress and remember the
    /// connected shop for the next launch.
    pub fn finish(&mut self) -> AppResult<()> {
        if self.state.current_step != WizardStep::Complete {
            return Err(AppError::validation("onboarding is not finished yet"));
        }
        self.store.clear_wizard_state()?;
        if let Some(shop_id) = self.state.shop_id {
            self.store.set_selected_shop(shop_id)?;
        }
        tracing::info!("[SetupWizard] Onboarding complete");
        Ok(())
    }

    async fn connect_shop(&mut self) -> AppResult<()> {
        if self.state.shop_id.is_some() {
            return Ok(());
        }
        let token = self.state.token.trim().to_string();
        if token.is_empty() {
            return Err(AppError::validation(
                "a verified token is required to connect",
            ));
        }

        let shop = self.api.create_shop(NewShop { name: None, token }).await?;
        tracing::info!("[SetupWizard] Shop {} connected", shop.id);
        self.state.shop_id = Some(shop.id);
        self.state.store_connected = true;
        self.state.store_name = shop.name;
        if let Err(e) = self.store.set_selected_shop(shop.id) {
            tracing::warn!("[SetupWizard] Failed to remember shop id: {}", e);
        }
        Ok(())
    }

    /// Translate everything collected into one settings document and save
    /// it. The current remote document is loaded first so fields the
    /// wizard does not own keep their values.
    async fn commit_settings(&mut self) -> AppResult<()> {
        let Some(shop_id) = self.state.shop_id else {
            return Err(AppError::validation("no shop connected"));
        };
        let snapshot = self.settings.load(shop_id).await?;
        let mut settings = snapshot.settings;
        self.apply_choices(&mut settings)?;
        self.settings.save(&settings).await?;
        Ok(())
    }

    fn apply_choices(&self, settings: &mut ShopSettings) -> AppResult<()> {
        let mode = self
            .state
            .automation_mode
            .ok_or_else(|| AppError::validation("automation mode not chosen"))?;
        let autopilot = mode == WorkMode::Autopilot;
        let reply_mode = mode.reply_mode();
        let tone = self.state.tone.clone();
        let style = &self.state.response_style;

        settings.automation_enabled = autopilot;
        settings.auto_sync = true;
        settings.auto_draft = mode != WorkMode::Manual;
        settings.auto_publish = autopilot;
        settings.reply_mode = reply_mode;
        settings.rating_mode_map = self.state.rating_modes.clone();
        settings.min_rating_to_autopublish = if autopilot { 1 } else { 4 };

        settings.set_questions_mode(reply_mode);

        settings.tone = tone.clone();
        settings.signature = None;
        settings.signatures = self.state.signatures.clone();

        settings.set_config_value("onboarding.done", json!(true));
        settings.set_config_value("onboarding.dashboard_intro_seen", json!(false));
        settings.set_config_value("onboarding.automation_mode", json!(mode.as_str()));

        settings.set_config_value(
            "advanced.address_format",
            json!(style.address_form.wire_format()),
        );
        settings.set_config_value("advanced.use_buyer_name", json!(style.use_customer_name));
        settings.set_config_value("advanced.emoji_enabled", json!(style.use_emoji));
        settings.set_config_value(
            "advanced.answer_length",
            json!(style.response_length.as_str()),
        );
        for sentiment in ["positive", "neutral", "negative", "question"] {
            settings.set_config_value(
                &format!("advanced.tone_of_voice.{}", sentiment),
                json!(tone),
            );
        }

        settings.set_config_value("recommendations.enabled", json!(false));
        settings.set_config_value(
            "setup_wizard.signatures",
            serde_json::to_value(&self.state.signatures)?,
        );
        settings.set_config_value("setup_wizard.automation_mode", json!(mode.as_str()));

        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.store.save_wizard_state(&self.state) {
            tracing::warn!("[SetupWizard] Failed to persist wizard state: {}", e);
        }
    }
}

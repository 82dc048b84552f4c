//! HTTP Backend Client
//!
//! reqwest implementation of `BackendApi` with bearer auth and structured
//! error extraction: failed calls surface the server's `detail` message when
//! the body carries one, otherwise a generic status message.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::BackendApi;
use crate::models::{Draft, Job, NewShop, ShopInfo, TokenCheck, ToneOption};
use crate::utils::error::{AppError, AppResult};

/// Backend API client over HTTP
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

/// Wire shape of the brands endpoint
#[derive(Debug, Deserialize)]
struct BrandList {
    #[serde(default)]
    data: Vec<String>,
}

/// Wire shape of the sync-submit response
#[derive(Debug, Deserialize)]
struct SyncQueued {
    job_id: i64,
}

impl HttpBackend {
    /// Create a client for an anonymous session
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// Create a client carrying a bearer token
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut backend = Self::new(base_url);
        backend.auth_token = Some(token.into());
        backend
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, url);
        if let Some(token) = &self.auth_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Decode a response, turning non-success statuses into `AppError::Api`
    /// with the server's `detail` message when one is present.
    async fn handle<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }
        Ok(response.json::<T>().await?)
    }

    async fn status_error(status: StatusCode, response: Response) -> AppError {
        let detail = response
            .json::<Value>()
            .await
            .ok()
            .as_ref()
            .and_then(|body| body.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_string);
        match detail {
            Some(detail) => AppError::Api(detail),
            None => AppError::Api(format!("status {}", status.as_u16())),
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn get_settings(&self, shop_id: i64) -> AppResult<Value> {
        let response = self
            .request(Method::GET, &format!("/api/settings/{}", shop_id))
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn update_settings(&self, shop_id: i64, payload: Value) -> AppResult<Value> {
        let response = self
            .request(Method::PUT, &format!("/api/settings/{}", shop_id))
            .json(&payload)
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn get_shop(&self, shop_id: i64) -> AppResult<ShopInfo> {
        let response = self
            .request(Method::GET, &format!("/api/shops/{}", shop_id))
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn create_shop(&self, payload: NewShop) -> AppResult<ShopInfo> {
        let response = self
            .request(Method::POST, "/api/shops")
            .json(&payload)
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn shop_brands(&self, shop_id: i64) -> AppResult<Vec<String>> {
        let response = self
            .request(Method::GET, &format!("/api/shops/{}/brands", shop_id))
            .send()
            .await?;
        let brands: BrandList = Self::handle(response).await?;
        Ok(brands.data)
    }

    async fn verify_token(&self, token: &str) -> AppResult<TokenCheck> {
        let response = self
            .request(Method::POST, "/api/shops/verify-token")
            .json(&json!({ "token": token }))
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn tone_options(&self) -> AppResult<Vec<ToneOption>> {
        let response = self
            .request(Method::GET, "/api/prompts/tone-options")
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn list_pending_drafts(
        &self,
        shop_id: i64,
        limit: u32,
        offset: u32,
    ) -> AppResult<Vec<Draft>> {
        let path = format!(
            "/api/shops/{}/drafts/pending?limit={}&offset={}",
            shop_id,
            limit.clamp(1, 200),
            offset
        );
        let response = self.request(Method::GET, &path).send().await?;
        Self::handle(response).await
    }

    async fn get_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft> {
        let path = format!("/api/shops/{}/drafts/{}", shop_id, draft_id);
        let response = self.request(Method::GET, &path).send().await?;
        Self::handle(response).await
    }

    async fn update_draft_text(
        &self,
        shop_id: i64,
        draft_id: i64,
        text: &str,
    ) -> AppResult<Draft> {
        let path = format!("/api/shops/{}/drafts/{}", shop_id, draft_id);
        let response = self
            .request(Method::PUT, &path)
            .json(&json!({ "text": text }))
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn approve_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft> {
        let path = format!("/api/shops/{}/drafts/{}/approve", shop_id, draft_id);
        let response = self.request(Method::POST, &path).send().await?;
        Self::handle(response).await
    }

    async fn reject_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft> {
        let path = format!("/api/shops/{}/drafts/{}/reject", shop_id, draft_id);
        let response = self.request(Method::POST, &path).send().await?;
        Self::handle(response).await
    }

    async fn regenerate_draft(&self, shop_id: i64, draft_id: i64) -> AppResult<Draft> {
        let path = format!("/api/shops/{}/drafts/{}/regenerate", shop_id, draft_id);
        let response = self.request(Method::POST, &path).send().await?;
        Self::handle(response).await
    }

    async fn submit_sync(&self, shop_id: i64) -> AppResult<i64> {
        let path = format!("/api/shops/{}/sync", shop_id);
        let response = self.request(Method::POST, &path).send().await?;
        let queued: SyncQueued = Self::handle(response).await?;
        Ok(queued.job_id)
    }

    async fn job_status(&self, job_id: i64) -> AppResult<Job> {
        let response = self
            .request(Method::GET, &format!("/api/jobs/{}", job_id))
            .send()
            .await?;
        Self::handle(response).await
    }
}

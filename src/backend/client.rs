use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use url::Url;

use super::types::{
    AuthIdentity, BackendMessage, CollectionRecord, HistoryRecord, LoginPayload, NewCollection,
    NewCollectionItem, NewHistoryRecord, ProxyRequest, ProxyResponse, RegisterPayload,
};
use crate::error::AppError;

/// Typed client for the workspace backend. Cheap to clone; every clone
/// shares the same bearer slot, so a login performed through one handle is
/// visible to all stores holding another.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl BackendClient {
    pub fn new(base_url: Url) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .use_rustls_tls()
            .build()
            .expect("Failed to build HTTP client");
        Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("bearer slot poisoned") = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().expect("bearer slot poisoned") = None;
    }

    /// Every outgoing call goes through here so the bearer credential is
    /// attached uniformly whenever a session exists.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.token.read().expect("bearer slot poisoned").as_deref() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Map a non-2xx reply to `AppError::Backend`, preferring the payload's
    /// `message` over the per-endpoint fallback.
    async fn check(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<reqwest::Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<BackendMessage>()
            .await
            .ok()
            .and_then(|m| m.message)
            .unwrap_or_else(|| fallback.to_string());
        Err(AppError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthIdentity, AppError> {
        let response = self
            .request(Method::POST, "/auth/register")?
            .json(&RegisterPayload { name, email, password })
            .send()
            .await?;
        Ok(Self::check(response, "Registration failed").await?.json().await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthIdentity, AppError> {
        let response = self
            .request(Method::POST, "/auth/login")?
            .json(&LoginPayload { email, password })
            .send()
            .await?;
        Ok(Self::check(response, "Login failed").await?.json().await?)
    }

    pub async fn history(&self) -> Result<Vec<HistoryRecord>, AppError> {
        let response = self.request(Method::GET, "/history")?.send().await?;
        Ok(Self::check(response, "Failed to load history").await?.json().await?)
    }

    pub async fn add_history(&self, record: &NewHistoryRecord) -> Result<HistoryRecord, AppError> {
        let response = self
            .request(Method::POST, "/history")?
            .json(record)
            .send()
            .await?;
        Ok(Self::check(response, "Failed to record history").await?.json().await?)
    }

    pub async fn clear_history(&self) -> Result<(), AppError> {
        let response = self.request(Method::DELETE, "/history")?.send().await?;
        Self::check(response, "Failed to clear history").await?;
        Ok(())
    }

    pub async fn collections(&self) -> Result<Vec<CollectionRecord>, AppError> {
        let response = self.request(Method::GET, "/collections")?.send().await?;
        Ok(Self::check(response, "Failed to load collections").await?.json().await?)
    }

    pub async fn create_collection(&self, name: &str) -> Result<CollectionRecord, AppError> {
        let response = self
            .request(Method::POST, "/collections")?
            .json(&NewCollection { name })
            .send()
            .await?;
        Ok(Self::check(response, "Failed to create collection").await?.json().await?)
    }

    pub async fn delete_collection(&self, id: &str) -> Result<(), AppError> {
        let response = self
            .request(Method::DELETE, &format!("/collections/{id}"))?
            .send()
            .await?;
        Self::check(response, "Failed to delete collection").await?;
        Ok(())
    }

    /// Returns the entire updated collection, items included, so callers can
    /// replace their copy wholesale.
    pub async fn add_collection_item(
        &self,
        collection_id: &str,
        item: &NewCollectionItem,
    ) -> Result<CollectionRecord, AppError> {
        let response = self
            .request(Method::POST, &format!("/collections/{collection_id}/items"))?
            .json(item)
            .send()
            .await?;
        Ok(Self::check(response, "Failed to save to collection").await?.json().await?)
    }

    /// Forward a composed request through the backend proxy. The proxy
    /// resolves for every HTTP status of the outbound call; an `Err` here is
    /// a transport-level failure only.
    pub async fn proxy(&self, payload: &ProxyRequest) -> Result<ProxyResponse, AppError> {
        let response = self
            .request(Method::POST, "/proxy")?
            .json(payload)
            .send()
            .await?;
        Ok(response.json().await?)
    }

    /// Connectivity diagnostic against `/debug/echo`; not part of the
    /// workspace contract.
    pub async fn echo(&self, value: &Value) -> Result<Value, AppError> {
        let response = self
            .request(Method::POST, "/debug/echo")?
            .json(value)
            .send()
            .await?;
        Ok(Self::check(response, "Echo failed").await?.json().await?)
    }
}

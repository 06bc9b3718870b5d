//! Wire shapes for the backend REST surface. The backend speaks Mongo-style
//! JSON (`_id`, camelCase outcome fields); everything here maps that onto
//! the crate's state types.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::state::collection::{Collection, CollectionItem};
use crate::state::history::HistoryItem;
use crate::state::request::{HttpMethod, KeyValuePair, RequestState};
use crate::state::response::ResponseState;
use crate::state::session::Session;

/// `{_id, name, email, token}` returned by both auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthIdentity {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl From<AuthIdentity> for Session {
    fn from(identity: AuthIdentity) -> Self {
        Self {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            token: identity.token,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterPayload<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body the backend attaches to rejections; `message` is optional.
#[derive(Debug, Deserialize)]
pub struct BackendMessage {
    pub message: Option<String>,
}

/// History record as stored by the backend: the request fields flattened
/// next to the backend-assigned identity and the dispatch outcome.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub url: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub params: Vec<KeyValuePair>,
    #[serde(default)]
    pub headers: Vec<KeyValuePair>,
    #[serde(default)]
    pub body: String,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub response_time: Option<u64>,
}

impl From<HistoryRecord> for HistoryItem {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.id,
            timestamp: record.created_at,
            request: RequestState {
                url: record.url,
                method: record.method,
                params: record.params,
                headers: record.headers,
                body: record.body,
            },
            status: record.status,
            status_text: record.status_text,
            response_time_ms: record.response_time,
        }
    }
}

/// Payload for `POST /history`; the backend assigns `_id` and `createdAt`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHistoryRecord {
    pub url: String,
    pub method: HttpMethod,
    pub params: Vec<KeyValuePair>,
    pub headers: Vec<KeyValuePair>,
    pub body: String,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub response_time: Option<u64>,
}

impl NewHistoryRecord {
    /// Snapshot one dispatch: the request as composed plus its outcome.
    /// Transport failures record `status = 0` like any other outcome.
    pub fn from_dispatch(request: &RequestState, response: &ResponseState) -> Self {
        Self {
            url: request.url.clone(),
            method: request.method,
            params: request.params.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
            status: Some(response.status),
            status_text: Some(response.status_text.clone()),
            response_time: Some(response.response_time_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<CollectionItemRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionItemRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub url: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub params: Vec<KeyValuePair>,
    #[serde(default)]
    pub headers: Vec<KeyValuePair>,
    #[serde(default)]
    pub body: String,
}

impl From<CollectionRecord> for Collection {
    fn from(record: CollectionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            items: record.items.into_iter().map(CollectionItem::from).collect(),
        }
    }
}

impl From<CollectionItemRecord> for CollectionItem {
    fn from(record: CollectionItemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            request: RequestState {
                url: record.url,
                method: record.method,
                params: record.params,
                headers: record.headers,
                body: record.body,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewCollection<'a> {
    pub name: &'a str,
}

/// Payload for `POST /collections/:id/items`; the backend assigns the item
/// id and answers with the entire updated collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewCollectionItem {
    pub name: String,
    pub url: String,
    pub method: HttpMethod,
    pub params: Vec<KeyValuePair>,
    pub headers: Vec<KeyValuePair>,
    pub body: String,
}

impl NewCollectionItem {
    pub fn from_request(name: impl Into<String>, request: &RequestState) -> Self {
        Self {
            name: name.into(),
            url: request.url.clone(),
            method: request.method,
            params: request.params.clone(),
            headers: request.headers.clone(),
            body: request.body.clone(),
        }
    }
}

/// Payload for the backend proxy: the derived values of the current request,
/// not the raw editor lists.
#[derive(Debug, Clone, Serialize)]
pub struct ProxyRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ProxyRequest {
    pub fn from_request(request: &RequestState) -> Self {
        Self {
            url: request.effective_url(),
            method: request.method,
            headers: request.effective_headers(),
            body: request.method.allows_body().then(|| request.body.clone()),
        }
    }
}

/// `{status, statusText, headers, data}` forwarded by the proxy. Present for
/// every HTTP status of the proxied call; only transport-level failures are
/// errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status: u16,
    pub status_text: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub data: Value,
}

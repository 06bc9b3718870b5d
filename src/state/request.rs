use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request body is sent for this method. GET and DELETE
    /// dispatches drop the body text even if the editor holds some.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl Default for KeyValuePair {
    fn default() -> Self {
        Self {
            key: String::new(),
            value: String::new(),
            enabled: true,
        }
    }
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Disabled rows and rows without a key stay in the editor list but are
    /// excluded from every derived value.
    fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

/// Advisory result of the JSON body check. Never blocks a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonBodyStatus {
    Empty,
    Valid,
    Invalid,
}

/// The request currently being composed in the editor. Exactly one instance
/// exists per workspace, owned by `App`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestState {
    pub url: String,
    pub method: HttpMethod,
    pub params: Vec<KeyValuePair>,
    pub headers: Vec<KeyValuePair>,
    pub body: String,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: HttpMethod::Get,
            params: Vec::new(),
            headers: vec![KeyValuePair::new("Content-Type", "application/json")],
            body: String::new(),
        }
    }
}

/// Partial update merged shallowly into the current request. `None` fields
/// are left untouched.
#[derive(Debug, Clone, Default)]
pub struct RequestUpdate {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    pub params: Option<Vec<KeyValuePair>>,
    pub headers: Option<Vec<KeyValuePair>>,
    pub body: Option<String>,
}

impl RequestState {
    pub fn apply(&mut self, update: RequestUpdate) {
        if let Some(url) = update.url {
            self.url = url;
        }
        if let Some(method) = update.method {
            self.method = method;
        }
        if let Some(params) = update.params {
            self.params = params;
        }
        if let Some(headers) = update.headers {
            self.headers = headers;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
    }

    /// The URL sent on the wire: enabled, non-empty-key params appended as a
    /// URL-encoded query string. `&` joins onto a URL that already carries a
    /// `?`, otherwise `?` starts one.
    pub fn effective_url(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut any = false;
        for param in self.params.iter().filter(|p| p.is_active()) {
            query.append_pair(&param.key, &param.value);
            any = true;
        }
        if !any {
            return self.url.clone();
        }
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, query.finish())
    }

    /// Enabled, non-empty-key headers folded into a flat map. Later
    /// duplicates overwrite earlier ones; the editor list keeps both.
    pub fn effective_headers(&self) -> HashMap<String, String> {
        self.headers
            .iter()
            .filter(|h| h.is_active())
            .map(|h| (h.key.clone(), h.value.clone()))
            .collect()
    }

    pub fn json_body_status(&self) -> JsonBodyStatus {
        if self.body.is_empty() {
            return JsonBodyStatus::Empty;
        }
        match serde_json::from_str::<serde_json::Value>(&self.body) {
            Ok(_) => JsonBodyStatus::Valid,
            Err(_) => JsonBodyStatus::Invalid,
        }
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a dispatch as shown in the response viewer. Transport-level
/// failures are folded into the same shape with `status = 0` so the viewer
/// renders every outcome the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseState {
    pub status: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
    pub response_time_ms: u64,
}

impl ResponseState {
    pub fn transport_failure(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            status: 0,
            status_text: "Error".to_string(),
            headers: HashMap::new(),
            body: serde_json::json!({ "error": message.into() }),
            response_time_ms,
        }
    }

    pub fn is_transport_failure(&self) -> bool {
        self.status == 0
    }
}

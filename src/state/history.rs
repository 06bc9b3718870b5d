use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::request::RequestState;

/// One past dispatch and its outcome. Immutable after creation; the list is
/// ordered newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub request: RequestState,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub response_time_ms: Option<u64>,
}

impl HistoryItem {
    /// The request fields alone; outcome fields are not carried back into
    /// the editor.
    pub fn to_request(&self) -> RequestState {
        self.request.clone()
    }
}

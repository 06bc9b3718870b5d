use serde::{Deserialize, Serialize};

use super::request::RequestState;

/// A user-named grouping of saved request templates. Ids are assigned by the
/// backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub items: Vec<CollectionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    pub id: String,
    pub name: String,
    pub request: RequestState,
}

impl CollectionItem {
    pub fn to_request(&self) -> RequestState {
        self.request.clone()
    }
}

/// Partial update for an item rename; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CollectionItemUpdate {
    pub name: Option<String>,
    pub request: Option<RequestState>,
}

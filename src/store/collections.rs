use tracing::warn;

use super::Mutation;
use crate::backend::BackendClient;
use crate::backend::types::NewCollectionItem;
use crate::error::AppError;
use crate::state::collection::{Collection, CollectionItemUpdate};

/// Backend-synchronized set of named request collections. Collection-level
/// create/delete and item add have server endpoints; item delete and rename
/// do not and mutate the in-memory copy only.
#[derive(Debug)]
pub struct CollectionStore {
    client: BackendClient,
    collections: Vec<Collection>,
}

impl CollectionStore {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            collections: Vec::new(),
        }
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub async fn refresh(&mut self) -> Result<(), AppError> {
        let records = self.client.collections().await?;
        self.collections = records.into_iter().map(Collection::from).collect();
        Ok(())
    }

    /// Create an empty collection; appended once the backend confirms.
    pub async fn create(&mut self, name: &str) -> Result<(), AppError> {
        let record = self.client.create_collection(name).await?;
        self.collections.push(record.into());
        Ok(())
    }

    /// On failure the list is left unchanged.
    pub async fn delete(&mut self, id: &str) -> Result<(), AppError> {
        self.client.delete_collection(id).await?;
        self.collections.retain(|c| c.id != id);
        Ok(())
    }

    /// The backend answers with the entire updated collection, which
    /// replaces the matching entry wholesale. That keeps item identities
    /// backend-assigned and picks up items added through other sessions.
    pub async fn add_item(
        &mut self,
        collection_id: &str,
        item: NewCollectionItem,
    ) -> Result<(), AppError> {
        let updated = Collection::from(self.client.add_collection_item(collection_id, &item).await?);
        if let Some(slot) = self.collections.iter_mut().find(|c| c.id == collection_id) {
            *slot = updated;
        }
        Ok(())
    }

    /// No backend endpoint exists for item deletion; only the in-memory copy
    /// changes and the result says so.
    pub fn delete_item(&mut self, collection_id: &str, item_id: &str) -> Mutation {
        warn!("collection item delete is not persisted by the backend; change is local only");
        if let Some(collection) = self.collections.iter_mut().find(|c| c.id == collection_id) {
            collection.items.retain(|item| item.id != item_id);
        }
        Mutation::LocalOnly
    }

    /// Same backend gap as `delete_item`: in-memory merge only.
    pub fn rename_item(
        &mut self,
        collection_id: &str,
        item_id: &str,
        updates: CollectionItemUpdate,
    ) -> Mutation {
        warn!("collection item rename is not persisted by the backend; change is local only");
        if let Some(item) = self
            .collections
            .iter_mut()
            .find(|c| c.id == collection_id)
            .and_then(|c| c.items.iter_mut().find(|i| i.id == item_id))
        {
            if let Some(name) = updates.name {
                item.name = name;
            }
            if let Some(request) = updates.request {
                item.request = request;
            }
        }
        Mutation::LocalOnly
    }

    /// Drop the in-memory list without touching the backend. Used on session
    /// change.
    pub fn reset(&mut self) {
        self.collections.clear();
    }
}

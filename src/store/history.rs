use tracing::error;

use crate::backend::BackendClient;
use crate::backend::types::NewHistoryRecord;
use crate::error::AppError;
use crate::state::history::HistoryItem;

/// Backend-synchronized log of past dispatches, newest first. Append-only
/// from the client's side apart from the bulk clear.
#[derive(Debug)]
pub struct HistoryStore {
    client: BackendClient,
    items: Vec<HistoryItem>,
}

impl HistoryStore {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    /// Replace the list with the backend's copy.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        let records = self.client.history().await?;
        self.items = records.into_iter().map(HistoryItem::from).collect();
        Ok(())
    }

    /// Record one dispatch outcome. The backend assigns id and timestamp; on
    /// failure the entry is dropped and logged, never retried. The dispatch
    /// itself is not rolled back.
    pub async fn add(&mut self, record: NewHistoryRecord) {
        match self.client.add_history(&record).await {
            Ok(created) => self.items.insert(0, created.into()),
            Err(e) => error!("failed to record history entry: {e}"),
        }
    }

    /// Ask the backend to delete every entry; the in-memory list empties
    /// only once that call succeeds.
    pub async fn clear(&mut self) -> Result<(), AppError> {
        self.client.clear_history().await?;
        self.items.clear();
        Ok(())
    }

    /// Drop the in-memory list without touching the backend. Used on session
    /// change.
    pub fn reset(&mut self) {
        self.items.clear();
    }
}

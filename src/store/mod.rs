pub mod collections;
pub mod history;
pub mod session;

pub use collections::CollectionStore;
pub use history::HistoryStore;
pub use session::SessionStore;

/// Whether a mutation reached the backend or only the in-memory copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "local-only mutations are lost on reload"]
pub enum Mutation {
    Persisted,
    /// Applied to the in-memory copy only; the backend has no endpoint for
    /// this operation, so the change disappears on the next refresh.
    LocalOnly,
}

use std::time::Instant;

use tracing::{debug, error};

use crate::backend::BackendClient;
use crate::backend::types::{NewCollectionItem, NewHistoryRecord, ProxyRequest};
use crate::config::Config;
use crate::error::AppError;
use crate::state::collection::{Collection, CollectionItem, CollectionItemUpdate};
use crate::state::history::HistoryItem;
use crate::state::request::RequestState;
use crate::state::response::ResponseState;
use crate::state::session::Session;
use crate::state::view::View;
use crate::storage::prefs::{Prefs, PrefsStorage};
use crate::storage::session::SessionStorage;
use crate::store::{CollectionStore, HistoryStore, Mutation, SessionStore};

/// Owns every piece of workspace state and coordinates
/// compose -> dispatch -> display against the backend. One `App` per client
/// instance; the stores are created here and torn down together.
pub struct App {
    view: View,
    client: BackendClient,
    session: SessionStore,
    history: HistoryStore,
    collections: CollectionStore,
    prefs_storage: PrefsStorage,
    prefs: Prefs,
    /// The request currently being composed. Mutated directly by the editor.
    pub request: RequestState,
    response: Option<ResponseState>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let client = BackendClient::new(config.base_url.clone());
        let (session_storage, prefs_storage) = match &config.data_dir {
            Some(dir) => (SessionStorage::with_dir(dir), PrefsStorage::with_dir(dir)),
            None => (SessionStorage::new(), PrefsStorage::new()),
        };
        let prefs = prefs_storage.load();
        Self {
            view: View::Loading,
            session: SessionStore::new(client.clone(), session_storage),
            history: HistoryStore::new(client.clone()),
            collections: CollectionStore::new(client.clone()),
            client,
            prefs_storage,
            prefs,
            request: RequestState::default(),
            response: None,
        }
    }

    /// Restore any persisted session and leave `Loading`. Runs once, before
    /// the shell renders anything else.
    pub async fn start(&mut self) {
        if self.session.restore() {
            self.view = View::Workspace;
            self.seed().await;
        } else {
            self.view = View::Login;
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.session()
    }

    pub fn history(&self) -> &[HistoryItem] {
        self.history.items()
    }

    pub fn collections(&self) -> &[Collection] {
        self.collections.collections()
    }

    pub fn response(&self) -> Option<&ResponseState> {
        self.response.as_ref()
    }

    pub fn dark_mode(&self) -> bool {
        self.prefs.dark_mode
    }

    pub fn toggle_dark_mode(&mut self) {
        self.prefs.dark_mode = !self.prefs.dark_mode;
        if let Err(e) = self.prefs_storage.save(&self.prefs) {
            error!("failed to persist preferences: {e}");
        }
    }

    /// Swap between the login and register views. Authenticated states are
    /// left untouched.
    pub fn toggle_auth_view(&mut self) {
        self.view = self.view.toggled_auth();
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AppError> {
        self.session.login(email, password).await?;
        self.enter_workspace().await;
        Ok(())
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AppError> {
        self.session.register(name, email, password).await?;
        self.enter_workspace().await;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.reset_workspace();
        self.view = View::Login;
    }

    async fn enter_workspace(&mut self) {
        self.reset_workspace();
        self.view = View::Workspace;
        self.seed().await;
    }

    /// Drop all per-session state; the next session starts from the
    /// defaults.
    fn reset_workspace(&mut self) {
        self.history.reset();
        self.collections.reset();
        self.request = RequestState::default();
        self.response = None;
    }

    /// Seed history and collections from the backend. The two fetches run
    /// concurrently and settle independently; a failure in one leaves the
    /// other's store populated.
    async fn seed(&mut self) {
        let (history, collections) =
            tokio::join!(self.history.refresh(), self.collections.refresh());
        if let Err(e) = history {
            error!("failed to load history: {e}");
        }
        if let Err(e) = collections {
            error!("failed to load collections: {e}");
        }
    }

    /// Send the current request through the backend proxy. At most one
    /// dispatch is in flight per `App`: the exclusive borrow lasts until the
    /// outcome has been recorded. Transport-level failures surface as a
    /// `status = 0` response, and every dispatch appends exactly one history
    /// entry (which is itself dropped, not retried, if the backend refuses
    /// it).
    pub async fn dispatch(&mut self) -> &ResponseState {
        let payload = ProxyRequest::from_request(&self.request);
        let started = Instant::now();
        let response = match self.client.proxy(&payload).await {
            Ok(proxied) => ResponseState {
                status: proxied.status,
                status_text: proxied.status_text,
                headers: proxied.headers,
                body: proxied.data,
                response_time_ms: started.elapsed().as_millis() as u64,
            },
            Err(e) => {
                ResponseState::transport_failure(e.to_string(), started.elapsed().as_millis() as u64)
            }
        };
        debug!(
            status = response.status,
            elapsed_ms = response.response_time_ms,
            "dispatch settled"
        );
        self.history
            .add(NewHistoryRecord::from_dispatch(&self.request, &response))
            .await;
        self.response.insert(response)
    }

    /// Copy a past request back into the editor, discarding outcome fields.
    pub fn load_from_history(&mut self, item: &HistoryItem) {
        self.request = item.to_request();
    }

    pub fn load_from_collection(&mut self, item: &CollectionItem) {
        self.request = item.to_request();
    }

    pub async fn clear_history(&mut self) -> Result<(), AppError> {
        self.history.clear().await
    }

    pub async fn create_collection(&mut self, name: &str) -> Result<(), AppError> {
        self.collections.create(name).await
    }

    pub async fn delete_collection(&mut self, id: &str) -> Result<(), AppError> {
        self.collections.delete(id).await
    }

    /// Save the current request into a collection under `name`.
    pub async fn save_to_collection(
        &mut self,
        collection_id: &str,
        name: &str,
    ) -> Result<(), AppError> {
        let item = NewCollectionItem::from_request(name, &self.request);
        self.collections.add_item(collection_id, item).await
    }

    pub fn delete_collection_item(&mut self, collection_id: &str, item_id: &str) -> Mutation {
        self.collections.delete_item(collection_id, item_id)
    }

    pub fn rename_collection_item(
        &mut self,
        collection_id: &str,
        item_id: &str,
        updates: CollectionItemUpdate,
    ) -> Mutation {
        self.collections.rename_item(collection_id, item_id, updates)
    }
}

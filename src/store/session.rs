use tracing::error;

use crate::backend::BackendClient;
use crate::error::AppError;
use crate::state::session::Session;
use crate::storage::session::SessionStorage;

/// Owns the authenticated identity and keeps the transport's bearer slot and
/// the persisted record in step with it.
#[derive(Debug)]
pub struct SessionStore {
    client: BackendClient,
    storage: SessionStorage,
    session: Option<Session>,
}

impl SessionStore {
    pub fn new(client: BackendClient, storage: SessionStorage) -> Self {
        Self {
            client,
            storage,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Restore a persisted session, if any. Runs synchronously at startup; a
    /// malformed record behaves exactly as though no session existed.
    pub fn restore(&mut self) -> bool {
        match self.storage.load() {
            Some(session) => {
                self.client.set_token(&session.token);
                self.session = Some(session);
                true
            }
            None => false,
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AppError> {
        let identity = self.client.login(email, password).await?;
        self.install(identity.into());
        Ok(())
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AppError> {
        let identity = self.client.register(name, email, password).await?;
        self.install(identity.into());
        Ok(())
    }

    fn install(&mut self, session: Session) {
        if let Err(e) = self.storage.save(&session) {
            // The in-memory session still carries this run.
            error!("failed to persist session: {e}");
        }
        self.client.set_token(&session.token);
        self.session = Some(session);
    }

    /// Clears memory, the persisted record, and the bearer slot
    /// unconditionally.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.clear() {
            error!("failed to clear persisted session: {e}");
        }
        self.client.clear_token();
        self.session = None;
    }
}

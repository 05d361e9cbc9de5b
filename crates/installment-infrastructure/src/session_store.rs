//! Session persistence on top of a key/value store.

use std::sync::Arc;

use installment_core::error::Result;
use installment_core::session::{SessionStore, StoredSession};
use installment_core::storage::{KeyValueStorage, SESSION_STORAGE_KEY};
use tracing::warn;

/// Keeps the `{token, user}` record as JSON under `installment_admin_auth`.
pub struct StorageSessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl StorageSessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }
}

impl SessionStore for StorageSessionStore {
    /// Missing, unreadable and malformed records all load as anonymous.
    fn load(&self) -> StoredSession {
        let raw = match self.storage.get_item(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return StoredSession::anonymous(),
            Err(e) => {
                warn!("[SessionStore] Failed to read stored session: {}", e);
                return StoredSession::anonymous();
            }
        };

        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("[SessionStore] Ignoring malformed stored session: {}", e);
                StoredSession::anonymous()
            }
        }
    }

    fn save(&self, session: &StoredSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.storage.set_item(SESSION_STORAGE_KEY, &json)
    }
}

//! Persisted session store port.

use super::model::StoredSession;
use crate::error::Result;

/// Durable storage for the `{token, user}` record.
///
/// `load` never fails: a missing or malformed record is the anonymous
/// record. `save` is best-effort; callers log a failed write and move on.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> StoredSession;

    fn save(&self, session: &StoredSession) -> Result<()>;
}

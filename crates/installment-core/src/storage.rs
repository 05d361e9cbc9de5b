//! Key/value storage port.
//!
//! The client persists exactly two plain values: the session record and the
//! theme preference. Neither is versioned or migrated.

use crate::error::Result;

/// Storage key holding the serialized `{token, user}` record.
pub const SESSION_STORAGE_KEY: &str = "installment_admin_auth";

/// Storage key holding `"light"` or `"dark"`.
pub const THEME_STORAGE_KEY: &str = "installment_admin_theme";

/// A durable string-to-string store.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

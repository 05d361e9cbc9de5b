//! In-memory key/value storage.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use installment_core::error::Result;
use installment_core::storage::KeyValueStorage;

/// A process-local store, for tests and for running without a disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `items`.
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: Mutex::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }
}

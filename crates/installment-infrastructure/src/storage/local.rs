//! File-backed key/value storage.

use std::path::{Path, PathBuf};

use installment_core::error::{AdminError, Result};
use installment_core::storage::KeyValueStorage;

use super::atomic_file::{read_optional, remove_if_exists, write_atomic};

/// Stores each key as one file under a directory.
///
/// Keys are restricted to ASCII letters, digits, `_`, `-` and `.` so they
/// map onto file names unchanged.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(AdminError::validation(format!("invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(read_optional(&self.key_path(key)?)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        Ok(write_atomic(&self.key_path(key)?, value.as_bytes())?)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        Ok(remove_if_exists(&self.key_path(key)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("storage"));

        assert_eq!(storage.get_item("installment_admin_theme").unwrap(), None);
        storage.set_item("installment_admin_theme", "dark").unwrap();
        assert_eq!(
            storage.get_item("installment_admin_theme").unwrap().as_deref(),
            Some("dark")
        );

        storage.remove_item("installment_admin_theme").unwrap();
        storage.remove_item("installment_admin_theme").unwrap();
        assert_eq!(storage.get_item("installment_admin_theme").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        for key in ["", "../auth", "a/b", ".hidden"] {
            assert!(storage.set_item(key, "x").is_err(), "key {:?}", key);
        }
    }
}

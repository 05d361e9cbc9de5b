//! Path management for the admin client's files.
//!
//! ```text
//! ~/.config/installment-admin/   # or $INSTALLMENT_ADMIN_HOME
//! ├── config.toml                # gateway + logging configuration
//! └── storage/                   # key/value store, one file per key
//!     ├── installment_admin_auth
//!     └── installment_admin_theme
//! ```

use std::path::{Path, PathBuf};

use installment_core::error::{AdminError, Result};

/// Environment variable that relocates the whole directory.
pub const HOME_ENV: &str = "INSTALLMENT_ADMIN_HOME";

const APP_DIR_NAME: &str = "installment-admin";
const CONFIG_FILE_NAME: &str = "config.toml";
const STORAGE_DIR_NAME: &str = "storage";

/// Resolved locations of the admin client's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPaths {
    root: PathBuf,
}

impl AdminPaths {
    /// Resolves the root from the process environment.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolves the root using `env` for variable lookups.
    ///
    /// A non-empty `INSTALLMENT_ADMIN_HOME` wins; otherwise the platform
    /// config directory is used.
    pub fn resolve_with(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(home) = env(HOME_ENV).filter(|v| !v.trim().is_empty()) {
            return Ok(Self::with_root(home));
        }
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AdminError::config("cannot determine the user config directory"))?;
        Ok(Self::with_root(config_dir.join(APP_DIR_NAME)))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.root.join(STORAGE_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_override() {
        let paths = AdminPaths::resolve_with(|name| {
            (name == HOME_ENV).then(|| "/tmp/admin-home".to_string())
        })
        .unwrap();
        assert_eq!(paths.root(), Path::new("/tmp/admin-home"));
        assert_eq!(paths.config_file(), Path::new("/tmp/admin-home/config.toml"));
        assert_eq!(paths.storage_dir(), Path::new("/tmp/admin-home/storage"));
    }

    #[test]
    fn test_blank_override_is_ignored() {
        if dirs::config_dir().is_none() {
            return;
        }
        let paths = AdminPaths::resolve_with(|_| Some("  ".to_string())).unwrap();
        assert!(paths.root().ends_with(APP_DIR_NAME));
    }
}

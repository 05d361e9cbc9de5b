//! Configuration service.
//!
//! Loads `config.toml` from the admin directory, applies environment
//! overrides and validates the gateway section. A missing file means the
//! built-in defaults.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use installment_core::config::ConfigRoot;
use installment_core::error::{AdminError, Result};
use tracing::debug;

use crate::paths::AdminPaths;
use crate::storage::read_optional;

pub const BASE_URL_ENV: &str = "INSTALLMENT_GATEWAY_BASE_URL";
pub const API_PREFIX_ENV: &str = "INSTALLMENT_GATEWAY_API_PREFIX";
pub const TIMEOUT_ENV: &str = "INSTALLMENT_GATEWAY_TIMEOUT_SECS";
pub const LOG_LEVEL_ENV: &str = "INSTALLMENT_LOG_LEVEL";

/// Loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    config: Arc<RwLock<Option<ConfigRoot>>>,
}

impl ConfigService {
    pub fn new(paths: &AdminPaths) -> Self {
        Self::from_path(paths.config_file())
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<ConfigRoot> {
        {
            let cached = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load_with(|name| std::env::var(name).ok())?;
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces a reload on the next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *cached = None;
    }

    /// Reads the file and applies overrides looked up through `env`.
    pub fn load_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<ConfigRoot> {
        let mut config = match read_optional(&self.path)? {
            Some(content) if !content.trim().is_empty() => {
                toml::from_str::<ConfigRoot>(&content).map_err(|e| {
                    AdminError::config(format!("{}: {}", self.path.display(), e))
                })?
            }
            _ => {
                debug!("[Config] No config file at {}, using defaults", self.path.display());
                ConfigRoot::default()
            }
        };

        apply_env_overrides(&mut config, env)?;
        config.gateway = config.gateway.normalized()?;
        Ok(config)
    }
}

fn apply_env_overrides(
    config: &mut ConfigRoot,
    env: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(base_url) = lookup(BASE_URL_ENV) {
        config.gateway.base_url = base_url;
    }
    if let Some(prefix) = env(API_PREFIX_ENV) {
        // An explicitly empty prefix is meaningful: no prefix at all.
        config.gateway.api_prefix = prefix;
    }
    if let Some(timeout) = lookup(TIMEOUT_ENV) {
        config.gateway.timeout_secs = timeout.trim().parse().map_err(|_| {
            AdminError::config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
        })?;
    }
    if let Some(level) = lookup(LOG_LEVEL_ENV) {
        config.logging.level = level;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use installment_core::config::{DEFAULT_API_PREFIX, DEFAULT_GATEWAY_BASE_URL};
    use std::fs;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::from_path(temp_dir.path().join("config.toml"));
        let config = service.load_with(no_env).unwrap();
        assert_eq!(config.gateway.base_url, DEFAULT_GATEWAY_BASE_URL);
        assert_eq!(config.gateway.api_prefix, DEFAULT_API_PREFIX);
        assert_eq!(config.gateway.timeout_secs, 15);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_file_values_are_normalized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[gateway]\nbase_url = \"https://gw.example.vn/\"\napi_prefix = \"api/v2/\"\n",
        )
        .unwrap();

        let config = ConfigService::from_path(&path).load_with(no_env).unwrap();
        assert_eq!(config.gateway.base_url, "https://gw.example.vn");
        assert_eq!(config.gateway.api_prefix, "/api/v2");
        assert_eq!(config.gateway.timeout_secs, 15);
    }

    #[test]
    fn test_env_overrides_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = ConfigService::from_path(&path)
            .load_with(|name| match name {
                BASE_URL_ENV => Some("http://10.0.0.5:9000".to_string()),
                API_PREFIX_ENV => Some(String::new()),
                TIMEOUT_ENV => Some("30".to_string()),
                LOG_LEVEL_ENV => Some("debug".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.gateway.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.gateway.api_prefix, "");
        assert_eq!(config.gateway.timeout_secs, 30);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::from_path(temp_dir.path().join("config.toml"));

        let bad_timeout = service.load_with(|name| (name == TIMEOUT_ENV).then(|| "soon".to_string()));
        assert!(matches!(bad_timeout, Err(AdminError::Config(_))));

        let zero_timeout = service.load_with(|name| (name == TIMEOUT_ENV).then(|| "0".to_string()));
        assert!(matches!(zero_timeout, Err(AdminError::Config(_))));

        let bad_url =
            service.load_with(|name| (name == BASE_URL_ENV).then(|| "ftp://gw".to_string()));
        assert!(matches!(bad_url, Err(AdminError::Config(_))));

        fs::write(service.path(), "[gateway\n").unwrap();
        assert!(matches!(service.load_with(no_env), Err(AdminError::Config(_))));
    }

    #[test]
    fn test_cache() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::from_path(temp_dir.path().join("config.toml"));
        let first = service.get_config().unwrap();
        fs::write(service.path(), "[logging]\nlevel = \"trace\"\n").unwrap();
        assert_eq!(service.get_config().unwrap(), first);
        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().logging.level, "trace");
    }
}

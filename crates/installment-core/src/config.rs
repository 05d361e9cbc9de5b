//! Client configuration models.
//!
//! The on-disk shape is `config.toml`:
//!
//! ```toml
//! [gateway]
//! base_url = "http://localhost:8080"
//! api_prefix = "/api/v1"
//! timeout_secs = 15
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, Result};

pub const DEFAULT_GATEWAY_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigRoot {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how to reach the API gateway.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_GATEWAY_BASE_URL.to_string()
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    /// Validates the config and returns a normalized copy.
    ///
    /// The base URL loses any trailing `/`, the prefix always starts with a
    /// `/` and never ends with one (an empty prefix stays empty).
    pub fn normalized(&self) -> Result<Self> {
        let base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AdminError::config(format!(
                "gateway base_url must start with http:// or https:// (got '{}')",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(AdminError::config("gateway timeout_secs must be greater than 0"));
        }

        let trimmed = self.api_prefix.trim().trim_matches('/');
        let api_prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };

        Ok(Self {
            base_url,
            api_prefix,
            timeout_secs: self.timeout_secs,
        })
    }

    /// Joins the base URL, the prefix and a resource path.
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}{}/{}", self.base_url, self.api_prefix, path)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

//! Error types for the installment admin client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole client.
///
/// Transport and remote failures are produced by the gateway layer, storage
/// failures by the infrastructure layer, and the local validation variants
/// (`InvalidAction`, `InvalidTransition`, `Validation`) by the controllers
/// before any request leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdminError {
    /// The request never produced a response (connect, DNS, reset, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request exceeded the configured per-request timeout.
    #[error("Request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The gateway answered with a non-success status.
    #[error("Remote error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Remote {
        status: u16,
        /// The `message` field of the structured error body, if any.
        message: Option<String>,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (local storage)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A UI action name that does not map to a remote status.
    #[error("Unknown action: {0}")]
    InvalidAction(String),

    /// A state transition that the client refuses to request.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Form input rejected before it was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdminError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn remote(status: u16, message: Option<String>) -> Self {
        Self::Remote { status, message }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout { .. })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// True for 401/403 answers from the gateway.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Remote { status: 401 | 403, .. })
    }

    /// True when the error was raised locally, before any network call.
    pub fn is_local_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidAction(_) | Self::InvalidTransition(_) | Self::Validation(_)
        )
    }

    /// Text suitable for an inline error message.
    ///
    /// Remote rejections surface the server's `message` when present; local
    /// rejections surface their own description; everything else falls back
    /// to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Remote {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::InvalidAction(_) | Self::InvalidTransition(_) | Self::Validation(_) => {
                self.to_string()
            }
            _ => fallback.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AdminError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AdminError>`.
pub type Result<T> = std::result::Result<T, AdminError>;

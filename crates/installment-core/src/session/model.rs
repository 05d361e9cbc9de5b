//! Session domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the signed-in operator as returned by the identity service.
///
/// Only the fields the client reads are typed; everything else the service
/// sends (ids, timestamps, permissions) is kept in `extra` so the stored
/// record round-trips unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthUser {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    /// Name to show in headers: full name, else email, else "Admin".
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Admin")
    }
}

/// Durable form of the session, stored under a single storage key.
///
/// Both fields default to `None`, so `{}` and `{"token":null,"user":null}`
/// both decode to the anonymous record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StoredSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl StoredSession {
    pub fn new(token: impl Into<String>, user: Option<AuthUser>) -> Self {
        Self {
            token: Some(token.into()),
            user,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Lifecycle phase of the in-memory session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The persisted record has not been read yet.
    Bootstrapping,
    Authenticated,
    Anonymous,
}

/// The in-memory session owned by the session controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
    /// Set once, when the persisted record has been read.
    pub bootstrapped: bool,
}

impl Session {
    /// A session that has not been bootstrapped yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the bootstrapped session from a stored record.
    ///
    /// An empty token string is treated as no token at all.
    pub fn from_stored(stored: StoredSession) -> Self {
        let authenticated = stored.has_token();
        Self {
            token: if authenticated { stored.token } else { None },
            user: if authenticated { stored.user } else { None },
            bootstrapped: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.bootstrapped {
            SessionPhase::Bootstrapping
        } else if self.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }

    pub fn to_stored(&self) -> StoredSession {
        StoredSession {
            token: self.token.clone(),
            user: self.user.clone(),
        }
    }
}

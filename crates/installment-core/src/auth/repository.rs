//! Authentication repository trait.

use async_trait::async_trait;

use super::model::{LoginRequest, LoginResponse};
use crate::error::Result;

/// The identity endpoints behind the gateway.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Exchanges credentials for an access token and the user profile.
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// Invalidates `token` on the server. Callers treat failures as
    /// non-fatal.
    async fn logout(&self, token: &str) -> Result<()>;
}

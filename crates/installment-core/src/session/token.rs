//! Bearer token source read by the remote resource accessors.

use async_trait::async_trait;

/// Supplies the bearer token for authenticated calls.
///
/// Reads are last-write-wins snapshots of the current session; `None`
/// means the request goes out without an `Authorization` header.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Option<String>;
}

/// A fixed token, for tools and tests that bypass the session controller.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

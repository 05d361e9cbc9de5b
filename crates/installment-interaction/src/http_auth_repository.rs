//! Identity endpoints over HTTP.

use async_trait::async_trait;
use installment_core::auth::{AuthRepository, LoginRequest, LoginResponse};
use installment_core::error::Result;
use reqwest::Method;
use serde_json::json;

use crate::gateway_client::GatewayClient;

#[derive(Debug, Clone)]
pub struct HttpAuthRepository {
    gateway: GatewayClient,
}

impl HttpAuthRepository {
    pub fn new(gateway: GatewayClient) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.gateway.post("/auth/authenticate", request, None).await
    }

    async fn logout(&self, token: &str) -> Result<()> {
        self.gateway
            .send_json(Method::POST, "/auth/logout", &json!({}), Some(token))
            .await
    }
}

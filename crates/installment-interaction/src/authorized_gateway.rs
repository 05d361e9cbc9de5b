//! Gateway access on behalf of the signed-in operator.

use std::sync::Arc;

use installment_core::error::Result;
use installment_core::session::TokenSource;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::gateway_client::GatewayClient;

/// A [`GatewayClient`] that attaches the current bearer token to every call.
///
/// The token is read from the [`TokenSource`] at request time, so a login or
/// logout is picked up by the next request without rebuilding anything.
#[derive(Clone)]
pub struct AuthorizedGateway {
    gateway: GatewayClient,
    tokens: Arc<dyn TokenSource>,
}

impl AuthorizedGateway {
    pub fn new(gateway: GatewayClient, tokens: Arc<dyn TokenSource>) -> Self {
        Self { gateway, tokens }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let token = self.tokens.bearer_token().await;
        self.gateway.get(path, query, token.as_deref()).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.tokens.bearer_token().await;
        self.gateway.post(path, body, token.as_deref()).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.tokens.bearer_token().await;
        self.gateway.put(path, body, token.as_deref()).await
    }

    pub async fn put_ignoring_body<B>(&self, path: &str, body: &B) -> Result<()>
    where
        B: Serialize + Sync + ?Sized,
    {
        let token = self.tokens.bearer_token().await;
        self.gateway
            .send_json(Method::PUT, path, body, token.as_deref())
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let token = self.tokens.bearer_token().await;
        self.gateway.delete(path, token.as_deref()).await
    }
}

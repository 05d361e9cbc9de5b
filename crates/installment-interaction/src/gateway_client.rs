//! HTTP client for the API gateway.
//!
//! Every call goes to `{base_url}{api_prefix}{path}` with JSON bodies, an
//! optional bearer token and the configured per-request timeout. Failures
//! are mapped onto [`AdminError`]:
//! - no response at all → `Transport` (or `Timeout` when the deadline hit)
//! - non-2xx → `Remote { status, message }`, `message` taken from a
//!   `{"message": ...}` body when the gateway sends one
//! - an undecodable success body → `Serialization`

use std::time::Duration;

use installment_core::config::GatewayConfig;
use installment_core::error::{AdminError, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Builds a client for `config`. The config is validated and normalized.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let config = config.normalized()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdminError::transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<T> {
        let mut request = self.request(Method::GET, path, token);
        if !query.is_empty() {
            request = request.query(query);
        }
        decode(self.send(request, Method::GET, path).await?).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, token).json(body);
        decode(self.send(request, Method::POST, path).await?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, token: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path, token).json(body);
        decode(self.send(request, Method::PUT, path).await?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let request = self.request(Method::DELETE, path, token);
        decode(self.send(request, Method::DELETE, path).await?).await
    }

    /// Sends a JSON body and ignores whatever the gateway answers on success.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<()> {
        let request = self.request(method.clone(), path, token).json(body);
        self.send(request, method, path).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut request = self.client.request(method, self.config.endpoint(path));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send(&self, request: RequestBuilder, method: Method, path: &str) -> Result<Response> {
        debug!("[Gateway] {} {}", method, path);

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AdminError::Timeout {
                    secs: self.config.timeout_secs,
                }
            } else {
                AdminError::transport(format!("{} {} failed: {}", method, path, e))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        debug!("[Gateway] {} {} -> {} {:?}", method, path, status, message);
        Err(AdminError::remote(status.as_u16(), message))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AdminError::transport(format!("Failed to read response body: {}", e)))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// The `message` of a structured error body, if there is one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

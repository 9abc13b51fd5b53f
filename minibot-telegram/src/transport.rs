//! Reqwest-based [`Transport`] over the Telegram Bot HTTP API.
//!
//! Production implementation of the trait from minibot-core; tests substitute
//! a scripted transport instead.

use std::time::Duration;

use async_trait::async_trait;
use minibot_core::{Transport, TransportError};
use serde_json::Value;

/// Public Bot API host. Overridable per instance for tests or a local server.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP transport bound to one bot token. No total request timeout is set, so
/// the 30-second `getUpdates` long poll is not cut short.
pub struct TelegramTransport {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramTransport {
    /// Builds a transport for the given token, optionally on a custom API base.
    pub fn new(token: &str, api_base: Option<&str>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TransportError::Request(format!("failed to build http client: {e}")))?;
        let base = api_base.unwrap_or(TELEGRAM_API_BASE).trim_end_matches('/');
        Ok(Self {
            http,
            base_url: format!("{base}/bot{token}/"),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Maps an HTTP response to the API body, rejecting non-2xx statuses and
    /// `ok=false` envelopes.
    async fn handle_response(response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;
        if body.get("ok").and_then(Value::as_bool) == Some(false) {
            let description = body
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("request rejected")
                .to_string();
            return Err(TransportError::Api(description));
        }
        Ok(body)
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        let response = self
            .http
            .get(self.url(endpoint))
            .query(params)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Self::handle_response(response).await
    }

    async fn post(&self, endpoint: &str, body: Value) -> Result<Value, TransportError> {
        let response = self
            .http
            .post(self.url(endpoint))
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Self::handle_response(response).await
    }
}

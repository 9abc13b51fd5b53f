//! Transport abstraction for the remote bot API.
//!
//! The core never talks HTTP itself: the poller and the registration surface go
//! through [`Transport`], production code plugs in the reqwest implementation
//! from `minibot-telegram`, tests substitute a scripted one.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// Opaque capability for remote API calls. `endpoint` is the bare method name
/// (`getUpdates`, `sendMessage`, ...); the implementation owns base URL and auth.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a read-style call with query parameters and returns the parsed
    /// API result payload.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value, TransportError>;

    /// Performs a write-style call with a JSON body and returns the parsed API
    /// result payload.
    async fn post(&self, endpoint: &str, body: Value) -> Result<Value, TransportError>;
}

use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::constants::protocol;
use crate::errors::TransportError;

/// Client for an A2A backend's `/a2a` endpoint, usually this same server.
#[derive(Debug, Clone)]
pub struct A2aClient {
    base_url: String,
    client: Client,
}

impl A2aClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ConnectionFailed {
                url: base_url.to_string(),
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self::with_client(client, base_url))
    }

    /// Wraps an existing client; its timeout and connection pool are reused.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `prompt` as a `message/send` envelope and returns the reply text.
    ///
    /// Timeouts, connection errors and non-2xx answers all surface as
    /// [`TransportError`]; a 2xx body without text yields `""`.
    pub async fn invoke_via_local_envelope(&self, prompt: &str) -> Result<String, TransportError> {
        let url = format!("{}/a2a", self.base_url);
        info!("Sending message/send to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&build_send_envelope(prompt))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| TransportError::from_reqwest(&url, e))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| TransportError::from_reqwest(&url, e))?;

        let text = extract_reply_text(&body);
        debug!("Backend {} replied with {} chars", url, text.len());
        Ok(text)
    }
}

pub fn build_send_envelope(prompt: &str) -> Value {
    json!({
        "method": protocol::MESSAGE_SEND,
        "params": {
            "message": {
                "role": "user",
                "messageId": Uuid::new_v4().to_string(),
                "parts": [{ "text": prompt }]
            }
        }
    })
}

/// `body.result` if present, otherwise the body itself; then the first
/// part's `text`.
pub fn extract_reply_text(body: &Value) -> String {
    let message = body.get("result").unwrap_or(body);
    message
        .get("parts")
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

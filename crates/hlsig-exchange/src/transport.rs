//! Delivery of signed requests.
//!
//! [`Transport`] is the seam between signing and the network. Requests are
//! posted once; nothing is retried here.

use std::time::Duration;

use hlsig_registry::BoxFuture;
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::TransportError;

pub type TransportResult<T> = Result<T, TransportError>;

/// Posts a JSON body to an API path and returns the JSON reply.
pub trait Transport: Send + Sync {
    fn post_json<'a>(&'a self, path: &'a str, body: &'a Value)
        -> BoxFuture<'a, TransportResult<Value>>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// * `base_url` - API base URL; `path` is appended per request
    /// * `timeout` - per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> TransportResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            TransportError::HttpClient(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post(&self, path: &str, body: &Value) -> TransportResult<Value> {
        let url = self.url(path);
        debug!(url = %url, "Posting request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn post_json<'a>(
        &'a self,
        path: &'a str,
        body: &'a Value,
    ) -> BoxFuture<'a, TransportResult<Value>> {
        Box::pin(self.post(path, body))
    }
}

/// Keeps every posted body and answers with a fixed reply.
pub struct RecordingTransport {
    reply: Value,
    requests: Mutex<Vec<(String, Value)>>,
}

impl RecordingTransport {
    pub fn new(reply: Value) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies `{"status":"ok"}`.
    pub fn ok() -> Self {
        Self::new(json!({"status": "ok", "response": {"type": "default"}}))
    }

    /// `(path, body)` pairs in posting order.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().clone()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.requests.lock().last().map(|(_, body)| body.clone())
    }
}

impl Transport for RecordingTransport {
    fn post_json<'a>(
        &'a self,
        path: &'a str,
        body: &'a Value,
    ) -> BoxFuture<'a, TransportResult<Value>> {
        self.requests.lock().push((path.to_string(), body.clone()));
        let reply = self.reply.clone();
        Box::pin(async move { Ok(reply) })
    }
}

//! HTTP client for fetching exchange metadata.
//!
//! Posts `{"type": ...}` requests to the info endpoint and decodes the
//! responses into [`crate::meta`] types.

use crate::error::{RegistryError, RegistryResult};
use crate::meta::{PerpDexEntry, PerpMeta, SpotMeta};
use crate::source::{BoxFuture, MetadataSource};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request body for the info endpoint.
#[derive(Debug, Serialize)]
struct InfoRequest<'a> {
    #[serde(rename = "type")]
    request_type: &'a str,
    /// DEX name for builder-deployed perps (e.g., "xyz").
    #[serde(skip_serializing_if = "Option::is_none")]
    dex: Option<&'a str>,
}

impl<'a> InfoRequest<'a> {
    fn new(request_type: &'a str) -> Self {
        Self {
            request_type,
            dex: None,
        }
    }

    fn with_dex(mut self, dex: Option<&'a str>) -> Self {
        self.dex = dex.filter(|d| !d.is_empty());
        self
    }
}

/// Client for fetching exchange metadata.
pub struct MetaClient {
    client: Client,
    info_url: String,
}

impl MetaClient {
    /// Create a new meta client.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g., "https://api.hyperliquid.xyz"); `/info` is appended
    /// * `timeout` - per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> RegistryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RegistryError::HttpClient(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            info_url: format!("{}/info", base_url.trim_end_matches('/')),
        })
    }

    pub fn info_url(&self) -> &str {
        &self.info_url
    }

    async fn post_info<T: DeserializeOwned>(&self, request: &InfoRequest<'_>) -> RegistryResult<T> {
        debug!(
            url = %self.info_url,
            request_type = request.request_type,
            dex = ?request.dex,
            "Posting info request"
        );

        let response = self
            .client
            .post(&self.info_url)
            .json(request)
            .send()
            .await
            .map_err(|e| RegistryError::HttpClient(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RegistryError::HttpClient(format!(
                "{} failed: HTTP {status}: {body}",
                request.request_type
            )));
        }

        response.json().await.map_err(|e| {
            RegistryError::HttpClient(format!(
                "Failed to parse {} response: {e}",
                request.request_type
            ))
        })
    }
}

impl MetadataSource for MetaClient {
    fn perp_meta<'a>(&'a self, dex: Option<&'a str>) -> BoxFuture<'a, RegistryResult<PerpMeta>> {
        Box::pin(async move {
            let meta: PerpMeta = self
                .post_info(&InfoRequest::new("meta").with_dex(dex))
                .await?;
            info!(dex = ?dex, assets = meta.universe.len(), "Fetched perp meta");
            Ok(meta)
        })
    }

    fn spot_meta(&self) -> BoxFuture<'_, RegistryResult<SpotMeta>> {
        Box::pin(async move {
            let meta: SpotMeta = self.post_info(&InfoRequest::new("spotMeta")).await?;
            info!(pairs = meta.universe.len(), "Fetched spot meta");
            Ok(meta)
        })
    }

    fn perp_dexs(&self) -> BoxFuture<'_, RegistryResult<Vec<Option<PerpDexEntry>>>> {
        Box::pin(async move {
            let dexs: Vec<Option<PerpDexEntry>> =
                self.post_info(&InfoRequest::new("perpDexs")).await?;
            info!(dex_count = dexs.len(), "Fetched perpDexs");
            Ok(dexs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_request_serialization() {
        let request = InfoRequest::new("perpDexs");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"type":"perpDexs"}"#);
    }

    #[test]
    fn test_info_request_with_dex() {
        let request = InfoRequest::new("meta").with_dex(Some("xyz"));
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"type":"meta","dex":"xyz"}"#);

        // the default dex is requested without a dex field
        let request = InfoRequest::new("meta").with_dex(Some(""));
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"type":"meta"}"#);
    }

    #[test]
    fn test_info_url() {
        let client = MetaClient::new("https://api.hyperliquid.xyz/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.info_url(), "https://api.hyperliquid.xyz/info");
    }

    #[test]
    fn test_unreachable_endpoint_is_http_error() {
        let client = MetaClient::new("http://127.0.0.1:1", Duration::from_millis(200)).unwrap();
        let result = tokio_test::block_on(client.spot_meta());
        assert!(matches!(result, Err(RegistryError::HttpClient(_))));
    }
}

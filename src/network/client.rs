//! HTTP client for the upstream business-search API

use super::source::BusinessSource;
use crate::config::UpstreamSettings;
use crate::error::SearchError;
use crate::query::RequestSpec;
use crate::results::{BusinessRecord, BusinessSearchResponse};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Bearer-authenticated client for the business-search endpoint
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl UpstreamClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&UpstreamSettings::default())
    }

    /// Create a new client with custom settings
    pub fn with_settings(settings: &UpstreamSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(settings.user_agent.as_str())
            .gzip(true)
            .build()?;

        if settings.api_key.is_none() {
            warn!("No upstream API key configured; requests will be unauthenticated");
        }

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    /// Decode a response body into business records
    pub fn decode_body(status: u16, body: &[u8]) -> Result<Vec<BusinessRecord>, SearchError> {
        if body.is_empty() {
            return Err(SearchError::EmptyResponseBody);
        }

        let envelope: BusinessSearchResponse = serde_json::from_slice(body)
            .map_err(|source| SearchError::DecodeFailure { status, source })?;
        Ok(envelope.businesses)
    }
}

#[async_trait]
impl BusinessSource for UpstreamClient {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, spec: &RequestSpec) -> Result<Vec<BusinessRecord>, SearchError> {
        let url = spec.to_url(&self.base_url)?;
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Self::decode_body(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = UpstreamClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_decode_empty_body() {
        assert!(matches!(
            UpstreamClient::decode_body(200, b""),
            Err(SearchError::EmptyResponseBody)
        ));
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = br#"{"error": {"code": "VALIDATION_ERROR"}}"#;
        match UpstreamClient::decode_body(400, body) {
            Err(SearchError::DecodeFailure { status, .. }) => assert_eq!(status, 400),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_decode_businesses() {
        let body = br#"{"businesses": [{"id": "a", "distance": 10.0}, {"id": "b"}], "total": 2}"#;
        let records = UpstreamClient::decode_body(200, body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id.as_deref(), Some("b"));
    }
}

//! HTTP token-list source
//!
//! One GET per chain against a fixed, chain-specific token-list URL,
//! expected to return a JSON array of raw token entries (some providers
//! wrap the array in a `{"tokens": [...]}` document; both shapes parse).
//! No authentication, no pagination. Transient upstream trouble (429, 5xx)
//! is retried with backoff; everything else surfaces to the catalog cache,
//! which rejects the attempt without poisoning itself.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::RawTokenEntry;
use crate::ports::{TokenSourceError, TokenSourcePort};

/// Configuration for the HTTP token-list source.
#[derive(Debug, Clone)]
pub struct TokenListConfig {
    /// Token-list URL per chain id.
    pub urls: HashMap<u64, String>,
    /// Request timeout
    pub timeout: Duration,
    /// Number of retry attempts
    pub max_retries: u32,
    /// Base delay for backoff (milliseconds)
    pub retry_base_delay_ms: u64,
}

impl Default for TokenListConfig {
    fn default() -> Self {
        Self {
            urls: HashMap::new(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay_ms: 500,
        }
    }
}

impl TokenListConfig {
    /// Builder method to register a chain's token-list URL.
    pub fn with_url(mut self, chain_id: u64, url: impl Into<String>) -> Self {
        self.urls.insert(chain_id, url.into());
        self
    }
}

/// Providers disagree on the outer document: most serve a bare array, some
/// wrap it in an object with a `tokens` field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenListDocument {
    Array(Vec<RawTokenEntry>),
    Object { tokens: Vec<RawTokenEntry> },
}

impl TokenListDocument {
    fn into_entries(self) -> Vec<RawTokenEntry> {
        match self {
            TokenListDocument::Array(entries) => entries,
            TokenListDocument::Object { tokens } => tokens,
        }
    }
}

/// Token-list fetcher over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    config: TokenListConfig,
    http: Client,
}

impl HttpTokenSource {
    pub fn new(config: TokenListConfig) -> Result<Self, TokenSourceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TokenSourceError::Http(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// Execute request with retry logic
    async fn execute_request(&self, url: &str) -> Result<reqwest::Response, TokenSourceError> {
        let mut last_error = None;

        for attempt in 0..self.config.max_retries {
            match self.http.get(url).send().await {
                Ok(response) => {
                    let status = response.status();

                    // Handle rate limiting with exponential backoff
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * 2u64.pow(attempt + 1),
                        );
                        tracing::warn!(
                            "Rate limited (429), backing off for {:?} (attempt {}/{})",
                            backoff,
                            attempt + 1,
                            self.config.max_retries
                        );
                        last_error = Some(TokenSourceError::RateLimited);
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    // Retry on server errors (5xx)
                    if status.is_server_error() {
                        let backoff = Duration::from_millis(
                            self.config.retry_base_delay_ms * (attempt as u64 + 1),
                        );
                        last_error = Some(TokenSourceError::Status(status.as_u16()));
                        tokio::time::sleep(backoff).await;
                        continue;
                    }

                    // Client errors are not retriable
                    if status.is_client_error() {
                        return Err(TokenSourceError::Status(status.as_u16()));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    last_error = Some(TokenSourceError::Http(e.to_string()));
                    let backoff = Duration::from_millis(
                        self.config.retry_base_delay_ms * (attempt as u64 + 1),
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| TokenSourceError::Http("max retries exceeded".to_string())))
    }
}

#[async_trait]
impl TokenSourcePort for HttpTokenSource {
    async fn fetch_token_list(&self, chain_id: u64) -> Result<Vec<RawTokenEntry>, TokenSourceError> {
        let url = self
            .config
            .urls
            .get(&chain_id)
            .ok_or(TokenSourceError::UnknownChain(chain_id))?;

        tracing::info!(chain_id, url = %url, "fetching token list");
        let response = self.execute_request(url).await?;

        let document: TokenListDocument = response
            .json()
            .await
            .map_err(|e| TokenSourceError::Parse(e.to_string()))?;

        Ok(document.into_entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TokenListConfig::default();
        assert!(config.urls.is_empty());
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay_ms, 500);
    }

    #[test]
    fn test_config_with_url() {
        let config = TokenListConfig::default()
            .with_url(137, "https://example.com/polygon.json")
            .with_url(56, "https://example.com/bsc.json");
        assert_eq!(config.urls.len(), 2);
        assert_eq!(
            config.urls.get(&137).map(String::as_str),
            Some("https://example.com/polygon.json")
        );
    }

    #[test]
    fn test_source_creation() {
        assert!(HttpTokenSource::new(TokenListConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_unknown_chain_is_an_error_without_a_request() {
        let source = HttpTokenSource::new(TokenListConfig::default()).unwrap();
        assert!(matches!(
            source.fetch_token_list(137).await,
            Err(TokenSourceError::UnknownChain(137))
        ));
    }

    #[test]
    fn test_document_parses_bare_array() {
        let json = r#"[{"symbol":"USDC","address":"0xA","decimals":6}]"#;
        let document: TokenListDocument = serde_json::from_str(json).unwrap();
        let entries = document.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].info().symbol, "USDC");
    }

    #[test]
    fn test_document_parses_wrapped_object() {
        let json = r#"{"name":"some list","tokens":[{"symbol":"WETH","address":"0xC","decimals":18,"logoURI":"https://x/weth.png"}]}"#;
        let document: TokenListDocument = serde_json::from_str(json).unwrap();
        let entries = document.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].info().logo_uri.as_deref(), Some("https://x/weth.png"));
    }
}

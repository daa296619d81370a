// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page source trait and its reqwest implementation

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Upstream fetch errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// Request timed out
    #[error("Timeout after {timeout_ms}ms fetching: {url}")]
    Timeout { url: String, timeout_ms: u64 },

    /// HTTP non-success status
    #[error("HTTP {status} for: {url}")]
    Status { status: u16, url: String },

    /// Transport or body error
    #[error("Upstream unavailable for {url}: {message}")]
    Unavailable { url: String, message: String },
}

impl UpstreamError {
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. } | Self::Status { url, .. } | Self::Unavailable { url, .. } => {
                url
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Something that can hand back the markup behind a URL
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a page body
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the page
    ///
    /// # Returns
    /// The response body as text, or an error for non-2xx, transport failure
    /// or timeout
    async fn fetch(&self, url: &str) -> Result<String, UpstreamError>;
}

/// reqwest-backed page source
pub struct HttpPageSource {
    client: Client,
    timeout: Duration,
}

impl HttpPageSource {
    /// Create a new page source
    ///
    /// # Arguments
    /// * `timeout` - Bound on a single fetch
    /// * `user_agent` - Identifying user agent sent with every request
    pub fn new(timeout: Duration, user_agent: &str) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, timeout })
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            UpstreamError::Unavailable {
                url: url.to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<String, UpstreamError> {
        debug!("Fetching upstream page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await.map_err(|e| self.classify(url, e))?;

        info!("Fetched {} bytes from: {}", html.len(), url);
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = UpstreamError::Status {
            status: 404,
            url: "https://www.mcmod.cn/class/0.html".to_string(),
        };
        assert!(error.to_string().contains("404"));
        assert_eq!(error.url(), "https://www.mcmod.cn/class/0.html");
        assert!(!error.is_timeout());

        let error = UpstreamError::Timeout {
            url: "https://search.mcmod.cn/s?key=x".to_string(),
            timeout_ms: 10000,
        };
        assert!(error.to_string().contains("10000ms"));
        assert!(error.is_timeout());
    }

    #[test]
    fn test_source_creation() {
        assert!(HttpPageSource::new(Duration::from_secs(10), "mcmod-api/1.0").is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_unavailable() {
        let source = HttpPageSource::new(Duration::from_secs(1), "mcmod-api/1.0").unwrap();
        let result = source.fetch("not a url").await;
        assert!(matches!(result, Err(UpstreamError::Unavailable { .. })));
    }
}

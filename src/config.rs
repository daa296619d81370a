// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the API service

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::extract::RedirectStrategy;

/// Identifying user agent sent upstream
pub const DEFAULT_USER_AGENT: &str = "mcmod-api/1.0 (github.com/zkitefly/mcmod-api)";

/// Configuration for the API service
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen host (default: 0.0.0.0)
    pub host: String,
    /// Listen port (default: 5000)
    pub port: u16,
    /// Wiki host; pages live on `www.` and search on `search.`
    pub source_host: String,
    /// Response cache TTL in seconds (default: 300)
    pub cache_ttl_secs: u64,
    /// Maximum cache entries before eviction (None = unbounded)
    pub max_cache_entries: Option<usize>,
    /// Upstream fetch timeout in seconds (default: 10)
    pub fetch_timeout_secs: u64,
    /// User agent for upstream requests
    pub user_agent: String,
    /// How obfuscated outbound links are resolved
    pub redirect_strategy: RedirectStrategy,
}

impl ApiConfig {
    /// Load configuration from environment variables
    ///
    /// Only the listen address comes from the environment (`API_HOST`,
    /// `API_PORT`); everything else keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("API_HOST").unwrap_or(defaults.host),
            port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            ..defaults
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be non-zero".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be at least 1".to_string());
        }
        if self.source_host.trim().is_empty() {
            return Err("source_host cannot be empty".to_string());
        }
        if self.max_cache_entries == Some(0) {
            return Err("max_cache_entries must be at least 1 when set".to_string());
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// `https://www.<host>/<kind>/<id>.html`
    pub fn detail_url(&self, kind: &str, id: &str) -> String {
        format!("https://www.{}/{}/{}.html", self.source_host, kind, id)
    }

    /// `https://search.<host>/s?<query>`
    pub fn search_url(&self, query: &str) -> String {
        format!("https://search.{}/s?{}", self.source_host, query)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            source_host: "mcmod.cn".to_string(),
            cache_ttl_secs: 300,
            max_cache_entries: Some(1000),
            fetch_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            redirect_strategy: RedirectStrategy::Decode,
        }
    }
}

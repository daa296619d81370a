// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request orchestration
//!
//! Coordinates the response cache, the upstream page source and the
//! extractors. Failed fetches are returned to the caller and never cached.

use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStats, CachedPayload, Clock, ResponseCache, SystemClock};
use crate::config::ApiConfig;
use crate::extract::redirect::is_obfuscated;
use crate::extract::{
    classify, parse_mod_page, parse_search_hits, LinkResolver, ModRecord, RedirectFollower,
    RedirectStrategy, SearchHit, SearchResultItem,
};
use crate::upstream::{PageSource, UpstreamError};

/// Main service that turns requests into structured records
pub struct McmodService {
    source: Arc<dyn PageSource>,
    cache: ResponseCache<CacheKey, CachedPayload>,
    links: LinkResolver,
    follower: Option<RedirectFollower>,
    config: ApiConfig,
}

impl McmodService {
    /// Create a new service on the system clock
    pub fn new(config: ApiConfig, source: Arc<dyn PageSource>) -> Self {
        Self::with_clock(config, source, Arc::new(SystemClock))
    }

    /// Create a new service with an explicit cache clock
    pub fn with_clock(config: ApiConfig, source: Arc<dyn PageSource>, clock: Arc<dyn Clock>) -> Self {
        let cache = ResponseCache::with_clock(config.cache_ttl_secs, config.max_cache_entries, clock);
        let links = LinkResolver::new(config.redirect_strategy);

        let follower = match config.redirect_strategy {
            RedirectStrategy::Decode => None,
            RedirectStrategy::Follow => {
                match RedirectFollower::new(config.fetch_timeout(), &config.user_agent) {
                    Ok(follower) => Some(follower),
                    Err(e) => {
                        warn!("Redirect follower unavailable, links stay unresolved: {}", e);
                        None
                    }
                }
            }
        };

        Self {
            source,
            cache,
            links,
            follower,
            config,
        }
    }

    /// Detail page for `/{kind}/{id}.html`
    pub async fn mod_detail(&self, kind: &str, id: &str) -> Result<ModRecord, UpstreamError> {
        let key = CacheKey::Detail {
            kind: kind.to_string(),
            id: id.to_string(),
        };

        if let Some(CachedPayload::Detail(record)) = self.cache.get(&key) {
            debug!("Cache hit for detail {}/{}", kind, id);
            return Ok(record);
        }

        let start = Instant::now();
        let url = self.config.detail_url(kind, id);
        let html = self.source.fetch(&url).await?;

        let mut record = parse_mod_page(&html, &self.links);
        if let Some(follower) = &self.follower {
            follow_related_links(follower, &mut record).await;
        }

        info!(
            "Extracted detail {}/{} ({} authors, {} loaders) in {}ms",
            kind,
            id,
            record.authors.len(),
            record.supported_versions.len(),
            start.elapsed().as_millis()
        );

        self.cache.insert(key, CachedPayload::Detail(record.clone()));
        Ok(record)
    }

    /// Search results for a raw query string such as `key=Example`
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, UpstreamError> {
        let key = CacheKey::Search(query.to_string());

        if let Some(CachedPayload::Search(results)) = self.cache.get(&key) {
            debug!("Cache hit for search: {}", query);
            return Ok(results);
        }

        let start = Instant::now();
        let url = self.config.search_url(query);
        let html = self.source.fetch(&url).await?;

        // Addresses are final before classification
        let mut hits = parse_search_hits(&html, &self.links);
        if let Some(follower) = &self.follower {
            follow_addresses(follower, &mut hits).await;
        }
        let results = classify(hits);

        info!(
            "Search complete: {} results for '{}' in {}ms",
            results.len(),
            query,
            start.elapsed().as_millis()
        );

        self.cache.insert(key, CachedPayload::Search(results.clone()));
        Ok(results)
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Clear the response cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

async fn follow_related_links(follower: &RedirectFollower, record: &mut ModRecord) {
    let pending: Vec<_> = record
        .related_links
        .iter_mut()
        .filter_map(|link| link.url.as_mut())
        .filter(|url| is_obfuscated(url))
        .collect();

    let resolved = join_all(pending.iter().map(|url| follower.follow(url))).await;
    for (url, target) in pending.into_iter().zip(resolved) {
        *url = target;
    }
}

async fn follow_addresses(follower: &RedirectFollower, hits: &mut [SearchHit]) {
    let pending: Vec<_> = hits
        .iter_mut()
        .map(|hit| &mut hit.address)
        .filter(|address| is_obfuscated(address))
        .collect();

    let resolved = join_all(pending.iter().map(|address| follower.follow(address))).await;
    for (address, target) in pending.into_iter().zip(resolved) {
        *address = target;
    }
}

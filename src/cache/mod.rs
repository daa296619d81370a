// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! TTL-based response caching
//!
//! Holds the most recent extraction result per request for a fixed window.
//! Entries are independent; a concurrent miss on the same key only costs a
//! redundant upstream fetch.

pub mod clock;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::extract::{ModRecord, SearchResultItem};

pub use clock::{Clock, ManualClock, SystemClock};

/// Request identity used as the cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// `/d/{type}/{id}`
    Detail { kind: String, id: String },
    /// `/s/{query}`, raw query string
    Search(String),
}

/// Extraction result stored per key
#[derive(Debug, Clone, PartialEq)]
pub enum CachedPayload {
    Detail(ModRecord),
    Search(Vec<SearchResultItem>),
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    // Insertion sequence; orders eviction even when timestamps tie
    seq: u64,
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Total entries in cache
    pub total: usize,
    /// Expired entries (not yet evicted)
    pub expired: usize,
    /// Maximum cache capacity, if bounded
    pub max: Option<usize>,
}

/// TTL cache with optional capacity, evicting least-recently-inserted entries
pub struct ResponseCache<K, V> {
    cache: RwLock<Inner<K, V>>,
    ttl: Duration,
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
}

struct Inner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    next_seq: u64,
}

impl<K, V> ResponseCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new response cache on the system clock
    ///
    /// # Arguments
    /// * `ttl_secs` - Time-to-live for cache entries in seconds
    /// * `max_entries` - Maximum number of entries to store, if bounded
    pub fn new(ttl_secs: u64, max_entries: Option<usize>) -> Self {
        Self::with_clock(ttl_secs, max_entries, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl_secs: u64, max_entries: Option<usize>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: RwLock::new(Inner {
                entries: HashMap::new(),
                next_seq: 0,
            }),
            ttl: Duration::from_secs(ttl_secs),
            max_entries,
            clock,
        }
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) > self.ttl
    }

    /// Get a cached value
    ///
    /// Returns None if not found or older than the TTL
    pub fn get(&self, key: &K) -> Option<V> {
        let cache = self.cache.read().ok()?;
        let entry = cache.entries.get(key)?;

        if self.is_expired(entry, self.clock.now()) {
            return None; // Expired
        }

        Some(entry.value.clone())
    }

    /// Store a value, overwriting any previous entry for the key
    pub fn insert(&self, key: K, value: V) {
        let mut cache = match self.cache.write() {
            Ok(c) => c,
            Err(_) => return,
        };

        let now = self.clock.now();
        let seq = cache.next_seq;
        cache.next_seq += 1;
        cache.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: now,
                seq,
            },
        );

        if let Some(max) = self.max_entries {
            if cache.entries.len() > max {
                cache.entries.retain(|_, e| !self.is_expired(e, now));
            }
            while cache.entries.len() > max {
                if !Self::evict_oldest(&mut cache.entries) {
                    break;
                }
            }
        }
    }

    /// Clear all cache entries
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.entries.clear();
        }
    }

    /// Remove expired entries from cache
    pub fn cleanup_expired(&self) {
        if let Ok(mut cache) = self.cache.write() {
            let now = self.clock.now();
            cache.entries.retain(|_, e| !self.is_expired(e, now));
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let cache = match self.cache.read() {
            Ok(c) => c,
            Err(_) => {
                return CacheStats {
                    total: 0,
                    expired: 0,
                    max: self.max_entries,
                }
            }
        };

        let now = self.clock.now();
        CacheStats {
            total: cache.entries.len(),
            expired: cache
                .entries
                .values()
                .filter(|e| self.is_expired(e, now))
                .count(),
            max: self.max_entries,
        }
    }

    /// Evict the least recently inserted entry
    fn evict_oldest(entries: &mut HashMap<K, CacheEntry<V>>) -> bool {
        match entries
            .iter()
            .min_by_key(|(_, e)| e.seq)
            .map(|(k, _)| k.clone())
        {
            Some(oldest_key) => {
                entries.remove(&oldest_key);
                true
            }
            None => false,
        }
    }
}

//! Process-local read-through cache with prefix invalidation
//!
//! Entries carry their own expiry and are purged lazily by the read that
//! finds them expired; there is no background sweep and no size bound.
//! Bulk invalidation works on key prefixes, because one write can stale any
//! number of cached list pages whose keys share nothing but that prefix.

pub mod keys;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Serve reads from the cache at all
    pub enabled: bool,

    /// Time-to-live applied when a caller does not pass one
    #[serde(with = "ttl_secs")]
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_ttl: Duration::from_secs(60),
        }
    }
}

impl CacheConfig {
    /// Configuration with caching turned off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

mod ttl_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(ttl.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}

/// Cached value with its expiry
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when `now + ttl` is not representable
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.map_or(false, |at| now >= at)
    }
}

/// Map plus the invalidation generation, guarded together
struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Bumped by every invalidation, matching or not
    generation: u64,
}

/// Key-value cache shared by every concurrently running operation
///
/// `get`, `set`, `remove` and `invalidate_prefix` all go through one coarse
/// lock, so each observes the map either entirely before or entirely after
/// any other.
pub struct ReadThroughCache<V = serde_json::Value> {
    inner: Mutex<Inner<V>>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    invalidations: AtomicU64,
}

impl<V: Clone> ReadThroughCache<V> {
    /// Create an empty cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                generation: 0,
            }),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            expirations: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get a live entry
    ///
    /// An entry whose expiry has been reached is removed and reported absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let mut inner = self.inner.lock();

        let Some(entry) = inner.entries.get(key) else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };

        if !entry.is_expired(now) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Some(entry.value.clone());
        }

        inner.entries.remove(key);
        self.expirations.fetch_add(1, Ordering::Relaxed);
        self.misses.fetch_add(1, Ordering::Relaxed);
        trace!(key, "cache entry expired");
        None
    }

    /// Store `value` under `key` for `ttl`, overwriting any previous entry
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry::new(value, ttl);
        self.inner.lock().entries.insert(key.into(), entry);
    }

    /// Current invalidation generation
    ///
    /// Read it before loading from storage and hand it to
    /// [`ReadThroughCache::set_if_unchanged`] when populating.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Store `value` only if no invalidation happened since `generation`
    ///
    /// A loader that raced a write may hold pre-write data; refusing the
    /// insert keeps that data from outliving the write's invalidation.
    pub fn set_if_unchanged(
        &self,
        key: impl Into<String>,
        value: V,
        ttl: Duration,
        generation: u64,
    ) -> bool {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            return false;
        }
        inner.entries.insert(key.into(), CacheEntry::new(value, ttl));
        true
    }

    /// Store `value` with the configured default TTL
    pub fn put(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.config.default_ttl);
    }

    /// Remove a single exact key
    pub fn remove(&self, key: &str) -> bool {
        let removed = {
            let mut inner = self.inner.lock();
            inner.generation += 1;
            inner.entries.remove(key).is_some()
        };
        if removed {
            self.invalidations.fetch_add(1, Ordering::Relaxed);
        }
        removed
    }

    /// Remove every entry whose key starts with `prefix`
    ///
    /// Returns the number of entries dropped.
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - inner.entries.len();
        drop(inner);

        self.invalidations.fetch_add(removed as u64, Ordering::Relaxed);
        debug!(prefix, removed, "cache prefix invalidated");
        removed
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.entries.clear();
    }

    /// Number of stored entries, expired ones included until read
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub invalidations: u64,
    pub entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

//! Shared TTL Cache
//!
//! TTL-keyed storage for computed results over the store backend, keyed by
//! request fingerprints. Values round-trip through JSON exactly; expired
//! entries are treated as absent, never as a fallback. A store failure or
//! timeout degrades to "treat as miss" and is never surfaced to the caller
//! as an error.
//!
//! The cache provides best-effort de-duplication, not strict single-flight:
//! concurrent misses for the same fingerprint may both invoke the expensive
//! path and both write the result, which is acceptable because the
//! protected operations are idempotent reads.

use gateguard_domain::constants::CACHE_KEY_PREFIX;
use gateguard_domain::error::Result;
use gateguard_domain::ports::StoreProvider;
use gateguard_domain::value_objects::Fingerprint;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::warn;

/// Cache operation statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of live entries in the backing store
    pub entries: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

/// Shared cache over an injected store backend.
#[derive(Clone)]
pub struct SharedCache {
    store: Arc<dyn StoreProvider>,
    store_timeout: Duration,
    enabled: bool,
    stats: Arc<RwLock<CacheStats>>,
}

impl SharedCache {
    /// Create a cache over the given store
    pub fn new(store: Arc<dyn StoreProvider>, store_timeout: Duration, enabled: bool) -> Self {
        Self {
            store,
            store_timeout,
            enabled,
            stats: Arc::new(RwLock::new(CacheStats::default())),
        }
    }

    /// Whether caching is enabled at all
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn record_hit(&self) {
        if let Ok(mut stats) = self.stats.write() {
            stats.hits += 1;
            let total = stats.hits + stats.misses;
            stats.hit_rate = stats.hits as f64 / total as f64;
        }
    }

    fn record_miss(&self) {
        if let Ok(mut stats) = self.stats.write() {
            stats.misses += 1;
            let total = stats.hits + stats.misses;
            stats.hit_rate = stats.hits as f64 / total as f64;
        }
    }

    /// Get a typed value for `fingerprint`, or `None` on miss.
    ///
    /// Expiry, store failures, store timeouts, and undecodable entries all
    /// read as a miss.
    pub async fn get<T>(&self, fingerprint: &Fingerprint) -> Option<T>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        if !self.enabled {
            return None;
        }
        let key = fingerprint.store_key();
        let fetched =
            tokio::time::timeout(self.store_timeout, self.store.get(&key)).await;

        let json = match fetched {
            Ok(Ok(Some(json))) => json,
            Ok(Ok(None)) => {
                self.record_miss();
                return None;
            }
            Ok(Err(error)) => {
                warn!(key, %error, "cache store unavailable, treating as miss");
                self.record_miss();
                return None;
            }
            Err(_) => {
                warn!(key, "cache store timed out, treating as miss");
                self.record_miss();
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(value) => {
                self.record_hit();
                Some(value)
            }
            Err(error) => {
                warn!(key, %error, "undecodable cache entry, treating as miss");
                self.record_miss();
                None
            }
        }
    }

    /// Store a value under `fingerprint` for `ttl`. Best effort: a store
    /// failure is logged and swallowed, the freshly computed result is
    /// still returned to the caller.
    pub async fn put<T>(&self, fingerprint: &Fingerprint, value: &T, ttl: Duration)
    where
        T: Serialize + Send + Sync,
    {
        if !self.enabled {
            return;
        }
        let key = fingerprint.store_key();
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(error) => {
                warn!(key, %error, "unserializable value, not cached");
                return;
            }
        };

        let stored = tokio::time::timeout(
            self.store_timeout,
            self.store.set(&key, &json, Some(ttl)),
        )
        .await;

        match stored {
            Ok(Ok(())) => {}
            Ok(Err(error)) => warn!(key, %error, "cache store rejected write"),
            Err(_) => warn!(key, "cache store timed out on write"),
        }
    }

    /// Remove the entry for one fingerprint. Administrative.
    pub async fn invalidate(&self, fingerprint: &Fingerprint) -> Result<bool> {
        self.store.delete(&fingerprint.store_key()).await
    }

    /// Remove every entry for one operation. Administrative.
    pub async fn invalidate_operation(&self, operation: &str) -> Result<u64> {
        self.store
            .delete_prefix(&format!("{CACHE_KEY_PREFIX}{operation}:"))
            .await
    }

    /// Remove every cache entry. Administrative.
    pub async fn invalidate_all(&self) -> Result<u64> {
        self.store.delete_prefix(CACHE_KEY_PREFIX).await
    }

    /// Current statistics; entry count is read from the store best-effort.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self
            .stats
            .read()
            .map(|stats| stats.clone())
            .unwrap_or_default();
        if let Ok(Ok(entries)) =
            tokio::time::timeout(self.store_timeout, self.store.size()).await
        {
            stats.entries = entries as u64;
        }
        stats
    }
}

impl std::fmt::Debug for SharedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCache")
            .field("enabled", &self.enabled)
            .field("store", &self.store.provider_name())
            .finish()
    }
}

//! Store Backend Port
//!
//! Port for the pluggable key/value backend that owns all shared mutable
//! state in this layer: cache entries and sliding-window rate-limit logs.
//! An in-process map suffices for single-instance deployments; a networked
//! store such as Redis is the expected production backend for
//! multi-instance deployments.
//!
//! ## Concurrency contract
//!
//! Operations on a given key must be linearizable with respect to other
//! operations on that same key; operations on different keys must not
//! block each other. [`StoreProvider::window_admit`] bundles the
//! discard-count-append sequence into one call precisely so each backend
//! can make it atomic per key (a per-key lock in process, a server-side
//! script over the wire).

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Outcome of an atomic sliding-window admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowAdmission {
    /// Whether the call was admitted (and its timestamp appended)
    pub allowed: bool,
    /// Number of live entries observed before the append
    pub count: u64,
}

/// Store Backend Port
///
/// Key/value storage with TTLs, atomic counters, and sorted-set-like
/// sliding-window logs. Values are opaque strings; the cache layer round-
/// trips JSON through them without re-serialization drift.
///
/// # Implementations
///
/// - **Memory**: `DashMap`-backed in-process store for single-instance and
///   test deployments
/// - **Redis**: distributed store for multi-instance deployments
/// - **Null**: no-op provider (always miss, always admit) for testing
#[async_trait]
pub trait StoreProvider: Send + Sync + std::fmt::Debug {
    /// Get a value; expired entries are absent, never a fallback
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set a value with an optional TTL
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;

    /// Delete a key
    ///
    /// # Returns
    /// True if the key was deleted, false if it didn't exist
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Delete every key starting with `prefix`, returning how many were
    /// removed. Intended for administrative invalidation, not hot paths.
    async fn delete_prefix(&self, prefix: &str) -> Result<u64>;

    /// Check whether a key exists and hasn't expired
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Atomically increment an integer value, creating it at zero
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Set a key's TTL
    ///
    /// # Returns
    /// True if the key exists and the TTL was applied
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Atomic sliding-window admission: discard entries with a timestamp
    /// at or below `cutoff_micros`, count the survivors, and append
    /// `now_micros` when the count is below `limit`. The key's expiry is
    /// refreshed to `window` so idle keys self-clean.
    ///
    /// Two concurrent calls for the same key must never both observe
    /// "count < limit" when only one slot remains.
    async fn window_admit(
        &self,
        key: &str,
        now_micros: i64,
        cutoff_micros: i64,
        limit: u64,
        window: Duration,
    ) -> Result<WindowAdmission>;

    /// Count window entries with a timestamp strictly above `cutoff_micros`
    async fn window_count(&self, key: &str, cutoff_micros: i64) -> Result<u64>;

    /// Timestamp of the oldest live window entry, if any
    async fn window_oldest(&self, key: &str) -> Result<Option<i64>>;

    /// Number of live keys in the store
    async fn size(&self) -> Result<usize>;

    /// Remove every key; administrative use only
    async fn clear(&self) -> Result<()>;

    /// Probe backend reachability
    async fn ping(&self) -> Result<()>;

    /// Name of this provider implementation (e.g. "memory", "redis")
    fn provider_name(&self) -> &str;
}

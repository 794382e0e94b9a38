//! In-process store provider
//!
//! `DashMap`-backed implementation of the store port for single-instance
//! deployments and tests. Entries expire lazily on access; sliding-window
//! logs are serialized through a per-key mutex so concurrent admissions
//! for the same identity cannot both take the last slot, while different
//! keys never contend.

use async_trait::async_trait;
use dashmap::DashMap;
use gateguard_domain::error::{Error, Result};
use gateguard_domain::ports::{StoreProvider, WindowAdmission};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn new(value: String, ttl: Option<Duration>) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() > at)
    }
}

#[derive(Default)]
struct WindowLog {
    timestamps: Vec<i64>,
    expires_at: Option<Instant>,
}

impl WindowLog {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() > at)
    }

    fn live(&self) -> &[i64] {
        if self.is_expired() {
            &[]
        } else {
            &self.timestamps
        }
    }
}

/// In-process store provider
///
/// Per-key granularity comes from the sharded map for plain values and
/// from one mutex per window log for admissions; there is no global lock.
#[derive(Default)]
pub struct MemoryStoreProvider {
    values: DashMap<String, StoredValue>,
    windows: DashMap<String, Arc<Mutex<WindowLog>>>,
}

impl MemoryStoreProvider {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn window(&self, key: &str) -> Arc<Mutex<WindowLog>> {
        self.windows
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(WindowLog::default())))
            .clone()
    }

    /// Drop lazily-expired values and idle window logs
    fn purge_expired(&self) {
        self.values.retain(|_, stored| !stored.is_expired());
        self.windows.retain(|_, window| {
            !window
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_expired()
        });
    }
}

#[async_trait]
impl StoreProvider for MemoryStoreProvider {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(entry) = self.values.get(key) {
            if entry.is_expired() {
                drop(entry);
                self.values.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.values
            .insert(key.to_string(), StoredValue::new(value.to_string(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.values.remove(key).is_some())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64> {
        let values_before = self.values.len();
        self.values.retain(|key, _| !key.starts_with(prefix));
        let windows_before = self.windows.len();
        self.windows.retain(|key, _| !key.starts_with(prefix));
        Ok((values_before - self.values.len() + windows_before - self.windows.len()) as u64)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entry = self
            .values
            .entry(key.to_string())
            .or_insert_with(|| StoredValue::new("0".to_string(), None));
        if entry.is_expired() {
            *entry = StoredValue::new("0".to_string(), None);
        }
        let current: i64 = entry.value.parse().map_err(|_| {
            Error::store(format!("value at '{key}' is not an integer"))
        })?;
        let next = current + 1;
        entry.value = next.to_string();
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        match self.values.get_mut(key) {
            Some(mut entry) if !entry.is_expired() => {
                entry.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn window_admit(
        &self,
        key: &str,
        now_micros: i64,
        cutoff_micros: i64,
        limit: u64,
        window: Duration,
    ) -> Result<WindowAdmission> {
        let log = self.window(key);
        let mut log = log.lock().unwrap_or_else(PoisonError::into_inner);

        if log.is_expired() {
            log.timestamps.clear();
        }
        log.timestamps.retain(|&timestamp| timestamp > cutoff_micros);
        let count = log.timestamps.len() as u64;
        let allowed = count < limit;
        if allowed {
            log.timestamps.push(now_micros);
        }
        // Refresh the key expiry so idle identities self-clean.
        log.expires_at = Some(Instant::now() + window);
        Ok(WindowAdmission { allowed, count })
    }

    async fn window_count(&self, key: &str, cutoff_micros: i64) -> Result<u64> {
        match self.windows.get(key) {
            Some(window) => {
                let log = window.lock().unwrap_or_else(PoisonError::into_inner);
                Ok(log
                    .live()
                    .iter()
                    .filter(|&&timestamp| timestamp > cutoff_micros)
                    .count() as u64)
            }
            None => Ok(0),
        }
    }

    async fn window_oldest(&self, key: &str) -> Result<Option<i64>> {
        match self.windows.get(key) {
            Some(window) => {
                let log = window.lock().unwrap_or_else(PoisonError::into_inner);
                Ok(log.live().iter().min().copied())
            }
            None => Ok(None),
        }
    }

    async fn size(&self) -> Result<usize> {
        self.purge_expired();
        Ok(self.values.len() + self.windows.len())
    }

    async fn clear(&self) -> Result<()> {
        self.values.clear();
        self.windows.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryStoreProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStoreProvider")
            .field("values", &self.values.len())
            .field("windows", &self.windows.len())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use gateguard_application::ports::registry::{
    StoreProviderConfig, StoreProviderEntry, STORE_PROVIDERS,
};

#[linkme::distributed_slice(STORE_PROVIDERS)]
static MEMORY_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: "memory",
    description: "In-process store for single-instance deployments",
    factory: |_config: &StoreProviderConfig| Ok(Arc::new(MemoryStoreProvider::new())),
};

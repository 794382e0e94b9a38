//! Null store provider
//!
//! No-op implementation of the store port for testing and for
//! deployments that disable shared state entirely: every read misses,
//! every admission is allowed, every write succeeds and is dropped.

use async_trait::async_trait;
use gateguard_domain::error::Result;
use gateguard_domain::ports::{StoreProvider, WindowAdmission};
use std::sync::Arc;
use std::time::Duration;

/// Null implementation for testing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStoreProvider;

impl NullStoreProvider {
    /// Create a null store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StoreProvider for NullStoreProvider {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn delete_prefix(&self, _prefix: &str) -> Result<u64> {
        Ok(0)
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn incr(&self, _key: &str) -> Result<i64> {
        Ok(1)
    }

    async fn expire(&self, _key: &str, _ttl: Duration) -> Result<bool> {
        Ok(false)
    }

    async fn window_admit(
        &self,
        _key: &str,
        _now_micros: i64,
        _cutoff_micros: i64,
        _limit: u64,
        _window: Duration,
    ) -> Result<WindowAdmission> {
        Ok(WindowAdmission {
            allowed: true,
            count: 0,
        })
    }

    async fn window_count(&self, _key: &str, _cutoff_micros: i64) -> Result<u64> {
        Ok(0)
    }

    async fn window_oldest(&self, _key: &str) -> Result<Option<i64>> {
        Ok(None)
    }

    async fn size(&self) -> Result<usize> {
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use gateguard_application::ports::registry::{
    StoreProviderConfig, StoreProviderEntry, STORE_PROVIDERS,
};

#[linkme::distributed_slice(STORE_PROVIDERS)]
static NULL_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: "null",
    description: "No-op store (always miss, always admit)",
    factory: |_config: &StoreProviderConfig| Ok(Arc::new(NullStoreProvider::new())),
};

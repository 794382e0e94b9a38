//! Store health reporting
//!
//! Reachability probe for the configured store backend, for surfacing in
//! admin and readiness endpoints.

use gateguard_domain::ports::StoreProvider;
use serde::Serialize;
use std::sync::Arc;

/// Health report for the store backend
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// "connected" or "disconnected"
    pub status: String,
    /// Name of the store provider implementation
    pub provider: String,
    /// Number of live keys, when the store is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,
    /// Failure detail, when the store is unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probe the store backend and report its health.
pub async fn check_store(store: &Arc<dyn StoreProvider>) -> HealthReport {
    let provider = store.provider_name().to_string();
    match store.ping().await {
        Ok(()) => HealthReport {
            status: "connected".to_string(),
            provider,
            entries: store.size().await.ok(),
            error: None,
        },
        Err(error) => HealthReport {
            status: "disconnected".to_string(),
            provider,
            entries: None,
            error: Some(error.to_string()),
        },
    }
}

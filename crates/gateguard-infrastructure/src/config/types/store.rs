//! Store backend configuration types

use gateguard_domain::constants::DEFAULT_STORE_TIMEOUT_MS;
use serde::{Deserialize, Serialize};

/// Store backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Provider name resolved from the registry ("memory", "redis", "null")
    pub provider: String,

    /// Redis connection URL (for the redis provider)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub redis_url: Option<String>,

    /// Timeout for store round-trips in milliseconds.
    ///
    /// Applies uniformly to rate-limit and cache traffic; a timed-out
    /// cache read degrades to a miss, a timed-out admission follows the
    /// fail-open policy.
    pub timeout_ms: u64,
}

/// Returns default store configuration: the in-process memory provider
/// with a 250ms operation timeout.
impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: "memory".to_string(),
            redis_url: None,
            timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
        }
    }
}

//! Cache configuration types

use gateguard_domain::constants::{DEFAULT_QUERY_TTL_SECS, DEFAULT_STATUS_TTL_SECS};
use serde::{Deserialize, Serialize};

/// Cache configuration
///
/// TTLs are configured per operation class, never globally fixed: status
/// data changes quickly, query results live longer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache enabled
    pub enabled: bool,

    /// TTL in seconds for status-class operations
    pub status_ttl_secs: u64,

    /// TTL in seconds for query-class operations
    pub query_ttl_secs: u64,
}

/// Returns default cache configuration: enabled, 30s status TTL, 5 minute
/// query TTL.
impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            status_ttl_secs: DEFAULT_STATUS_TTL_SECS,
            query_ttl_secs: DEFAULT_QUERY_TTL_SECS,
        }
    }
}

//! Rate-limit configuration types

use gateguard_domain::constants::{DEFAULT_RATE_LIMIT, DEFAULT_RATE_WINDOW_SECS};
use serde::{Deserialize, Serialize};

/// Rate-limit configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted calls per identity per window
    pub limit: u64,

    /// Sliding-window length in seconds
    pub window_secs: u64,

    /// Permit calls when the store is unreachable.
    ///
    /// The default favors availability over strict enforcement;
    /// deployments with a stricter security posture set this to false and
    /// accept that a store outage denies traffic.
    pub fail_open: bool,
}

/// Returns default rate-limit configuration: 100 calls per identity per
/// 60-second window, fail-open.
impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RATE_LIMIT,
            window_secs: DEFAULT_RATE_WINDOW_SECS,
            fail_open: true,
        }
    }
}

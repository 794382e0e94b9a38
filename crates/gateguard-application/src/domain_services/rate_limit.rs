//! Sliding-Window Rate Limiting
//!
//! Admission control per identity over the store backend's atomic window
//! operation. The window is a timestamp log: entries older than
//! `now - window` are discarded, the survivors counted, and the call
//! admitted only while the count is below the limit. Idle keys self-clean
//! through the window TTL.
//!
//! When the store is unreachable the limiter follows the configured
//! policy: fail-open preserves availability over strict enforcement
//! (the default), fail-closed denies with a store error. Deployments with
//! a stricter security posture opt into fail-closed and accept the
//! availability trade-off.

use chrono::Utc;
use gateguard_domain::constants::RATE_LIMIT_KEY_PREFIX;
use gateguard_domain::error::{Error, Result};
use gateguard_domain::ports::StoreProvider;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Admission policy for one identity class.
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    /// Maximum admitted calls per window
    pub limit: u64,
    /// Sliding-window length
    pub window: Duration,
    /// Permit when the store is unreachable (availability over strictness)
    pub fail_open: bool,
    /// Per-call timeout for store round-trips
    pub store_timeout: Duration,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// Whether the call was admitted
    pub allowed: bool,
    /// Admissions left in the current window (zero on rejection)
    pub remaining: u64,
    /// Seconds until a slot frees up, present on rejection
    pub retry_after_secs: Option<u64>,
}

/// Sliding-window rate limiter over an injected store backend.
pub struct RateLimiter {
    store: Arc<dyn StoreProvider>,
    policy: RateLimitPolicy,
}

impl RateLimiter {
    /// Create a limiter over the given store
    pub fn new(store: Arc<dyn StoreProvider>, policy: RateLimitPolicy) -> Self {
        Self { store, policy }
    }

    /// The policy this limiter enforces
    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    fn window_key(identity_key: &str) -> String {
        format!("{RATE_LIMIT_KEY_PREFIX}{identity_key}")
    }

    fn window_micros(&self) -> i64 {
        i64::try_from(self.policy.window.as_micros()).unwrap_or(i64::MAX)
    }

    /// Check and consume an admission slot for `identity_key`.
    ///
    /// An admitted call keeps its slot even if it is cancelled later:
    /// admission tracks real resource consumption and is never rolled
    /// back.
    pub async fn admit(&self, identity_key: &str) -> Result<Admission> {
        let key = Self::window_key(identity_key);
        let now_micros = Utc::now().timestamp_micros();
        let cutoff_micros = now_micros - self.window_micros();

        let attempt = tokio::time::timeout(
            self.policy.store_timeout,
            self.store.window_admit(
                &key,
                now_micros,
                cutoff_micros,
                self.policy.limit,
                self.policy.window,
            ),
        )
        .await;

        let admission = match attempt {
            Ok(Ok(admission)) => admission,
            Ok(Err(error)) => return self.degraded(identity_key, &error.to_string()),
            Err(_) => return self.degraded(identity_key, "store timed out"),
        };

        if admission.allowed {
            Ok(Admission {
                allowed: true,
                remaining: self.policy.limit.saturating_sub(admission.count + 1),
                retry_after_secs: None,
            })
        } else {
            Ok(Admission {
                allowed: false,
                remaining: 0,
                retry_after_secs: Some(self.retry_after(&key, now_micros).await),
            })
        }
    }

    /// Admissions left for `identity_key` without consuming a slot.
    pub async fn remaining(&self, identity_key: &str) -> u64 {
        let key = Self::window_key(identity_key);
        let cutoff_micros = Utc::now().timestamp_micros() - self.window_micros();

        let counted = tokio::time::timeout(
            self.policy.store_timeout,
            self.store.window_count(&key, cutoff_micros),
        )
        .await;

        match counted {
            Ok(Ok(count)) => self.policy.limit.saturating_sub(count),
            // Unknown state reads as a full allowance, same as a fresh key
            _ => self.policy.limit,
        }
    }

    /// Seconds until the oldest window entry falls out, with a one-second
    /// floor so clients always get a positive back-off hint.
    async fn retry_after(&self, key: &str, now_micros: i64) -> u64 {
        let oldest = tokio::time::timeout(
            self.policy.store_timeout,
            self.store.window_oldest(key),
        )
        .await;

        match oldest {
            Ok(Ok(Some(oldest_micros))) => {
                let free_at = oldest_micros + self.window_micros();
                let micros_left = free_at.saturating_sub(now_micros).max(0);
                ((micros_left as u64).div_ceil(1_000_000)).max(1)
            }
            _ => self.policy.window.as_secs().max(1),
        }
    }

    fn degraded(&self, identity_key: &str, detail: &str) -> Result<Admission> {
        if self.policy.fail_open {
            warn!(
                identity = identity_key,
                detail, "rate-limit store unavailable, failing open"
            );
            Ok(Admission {
                allowed: true,
                remaining: self.policy.limit,
                retry_after_secs: None,
            })
        } else {
            warn!(
                identity = identity_key,
                detail, "rate-limit store unavailable, failing closed"
            );
            Err(Error::store(format!(
                "rate-limit store unavailable: {detail}"
            )))
        }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.policy.limit)
            .field("window", &self.policy.window)
            .field("fail_open", &self.policy.fail_open)
            .finish()
    }
}

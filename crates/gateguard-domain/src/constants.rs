//! Domain layer constants
//!
//! Key prefixes, the default role table, and default admission values.
//! Infrastructure-specific constants live in `gateguard_infrastructure`.

// ============================================================================
// STORE KEY PREFIXES
// ============================================================================

/// Key prefix for sliding-window rate-limit logs
pub const RATE_LIMIT_KEY_PREFIX: &str = "rate_limit:";

/// Key prefix for cached operation results
pub const CACHE_KEY_PREFIX: &str = "cache:";

/// Separator between key segments
pub const KEY_SEPARATOR: &str = ":";

// ============================================================================
// DEFAULT ROLE TABLE
// ============================================================================

/// Grants owned by the `admin` role
pub const ADMIN_GRANTS: &[&str] = &[
    "read:*", "write:*", "delete:*", "create:*", "itsi:*", "search:*", "config:*",
];

/// Grants owned by the `user` role
pub const USER_GRANTS: &[&str] = &[
    "read:itsi",
    "read:search",
    "write:itsi",
    "create:itsi",
    "delete:itsi",
];

/// Grants owned by the `readonly` role
pub const READONLY_GRANTS: &[&str] = &["read:itsi", "read:search"];

// ============================================================================
// DEFAULT ADMISSION VALUES
// ============================================================================

/// Default token lifetime in hours
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;

/// Default API-key lifetime in hours (one year)
pub const DEFAULT_API_KEY_TTL_HOURS: u64 = 8760;

/// Default per-identity admission limit per window
pub const DEFAULT_RATE_LIMIT: u64 = 100;

/// Default sliding-window length in seconds
pub const DEFAULT_RATE_WINDOW_SECS: u64 = 60;

/// Default TTL for cached status-class results in seconds
pub const DEFAULT_STATUS_TTL_SECS: u64 = 30;

/// Default TTL for cached query-class results in seconds
pub const DEFAULT_QUERY_TTL_SECS: u64 = 300;

/// Default timeout for store round-trips in milliseconds
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 250;

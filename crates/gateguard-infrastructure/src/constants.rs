//! Infrastructure layer constants
//!
//! Constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `gateguard_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "gateguard.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "gateguard";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "GATEGUARD";

/// Environment variable controlling the log filter
pub const LOG_FILTER_ENV: &str = "GATEGUARD_LOG";

// ============================================================================
// AUTHENTICATION CONSTANTS
// ============================================================================

/// Minimum length of the JWT signing secret in bytes
pub const JWT_MIN_SECRET_LEN: usize = 32;

/// Default number of random bytes in a generated secret
pub const SECRET_DEFAULT_BYTES: usize = 32;

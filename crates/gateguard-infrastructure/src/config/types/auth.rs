//! Authentication configuration types

use gateguard_domain::constants::{DEFAULT_API_KEY_TTL_HOURS, DEFAULT_TOKEN_TTL_HOURS};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT signing secret
    ///
    /// **REQUIRED** when authentication is enabled.
    /// Configure via the `GATEGUARD__AUTH__JWT__SECRET` environment
    /// variable or `auth.jwt.secret` in the config file.
    /// Must be at least 32 characters.
    pub secret: String,

    /// Token lifetime in hours
    pub token_ttl_hours: u64,

    /// API-key lifetime in hours (long-lived credentials)
    pub api_key_ttl_hours: u64,
}

/// Returns default JWT configuration with:
/// - Empty secret (MUST be configured when auth is enabled)
/// - Lifetimes from domain constants
impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            // Empty by default - loader validation enforces minimum length
            secret: String::new(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            api_key_ttl_hours: DEFAULT_API_KEY_TTL_HOURS,
        }
    }
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Enable authentication
    pub enabled: bool,

    /// JWT configuration
    pub jwt: JwtConfig,
}

/// Returns default authentication configuration with authentication
/// enabled and default JWT settings.
impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jwt: JwtConfig::default(),
        }
    }
}

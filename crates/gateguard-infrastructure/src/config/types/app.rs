//! Top-level application configuration

use crate::config::types::{
    AuthConfig, CacheConfig, LoggingConfig, RateLimitConfig, StoreConfig,
};
use gateguard_domain::constants::{ADMIN_GRANTS, READONLY_GRANTS, USER_GRANTS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Rate-limit configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Store backend configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Scan operation arguments for injection-shaped content
    #[serde(default = "default_validate_arguments")]
    pub validate_arguments: bool,

    /// Role → grant-strings table
    #[serde(default = "default_role_table")]
    pub roles: HashMap<String, Vec<String>>,
}

fn default_validate_arguments() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cache: CacheConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
            validate_arguments: default_validate_arguments(),
            roles: default_role_table(),
        }
    }
}

/// The built-in role table: `admin`, `user`, and `readonly` with the
/// grants the gateway ships with. Deployments override or extend it under
/// `[roles]`.
pub fn default_role_table() -> HashMap<String, Vec<String>> {
    let to_strings = |grants: &[&str]| grants.iter().map(|grant| (*grant).to_string()).collect();
    HashMap::from([
        ("admin".to_string(), to_strings(ADMIN_GRANTS)),
        ("user".to_string(), to_strings(USER_GRANTS)),
        ("readonly".to_string(), to_strings(READONLY_GRANTS)),
    ])
}

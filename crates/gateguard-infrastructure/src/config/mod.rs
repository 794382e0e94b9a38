//! Configuration
//!
//! Typed configuration for the gateway layer, loaded by merging defaults,
//! an optional TOML file, and `GATEGUARD_`-prefixed environment variables.

/// Configuration loader
pub mod loader;
/// Configuration types, split per concern
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppConfig, AuthConfig, CacheConfig, JwtConfig, LoggingConfig, RateLimitConfig, StoreConfig,
};

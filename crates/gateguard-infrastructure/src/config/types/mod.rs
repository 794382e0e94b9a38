//! Configuration types

/// Top-level application configuration
pub mod app;
/// Authentication configuration
pub mod auth;
/// Cache configuration
pub mod cache;
/// Logging configuration
pub mod logging;
/// Rate-limit configuration
pub mod rate_limit;
/// Store backend configuration
pub mod store;

pub use app::AppConfig;
pub use auth::{AuthConfig, JwtConfig};
pub use cache::CacheConfig;
pub use logging::LoggingConfig;
pub use rate_limit::RateLimitConfig;
pub use store::StoreConfig;

//! # Gateguard
//!
//! Access-control and request-shaping layer for multi-tenant API
//! gateways: signed identity tokens, role-based permission evaluation,
//! per-identity sliding-window rate limiting, and a shared TTL cache for
//! expensive upstream lookups, orchestrated per inbound call.
//!
//! This crate is the facade: it wires the layers together and re-exports
//! the public API. Transport framing (HTTP/RPC mounting) and the
//! protected upstream client live in the surrounding system, which calls
//! [`Gateway::authorize_and_run`] as its single entry point.
//!
//! ## Example
//!
//! ```ignore
//! use gateguard::{CacheClass, Gateway, GatewayBuilder};
//! use gateguard::infrastructure::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//! let gateway = GatewayBuilder::new(config)
//!     .with_executor(upstream_client)
//!     .route("search_events", "read:search", CacheClass::Query)?
//!     .route("get_service_health", "read:itsi", CacheClass::Status)?
//!     .build()?;
//!
//! let outcome = gateway.handle(call).await;
//! ```
//!
//! ## Architecture
//!
//! The codebase follows Clean Architecture principles:
//!
//! - `domain` - core types, errors, and port contracts
//! - `application` - admission services and the gateway use case
//! - `infrastructure` - config, logging, JWT signing, health
//! - `providers` - store backends (memory, redis, null)

/// Domain layer - core types and port contracts
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use gateguard_domain::*;
}

/// Application layer - admission services and the gateway use case
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use gateguard_application::*;
}

/// Infrastructure layer - config, logging, and token signing
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use gateguard_infrastructure::*;
}

/// Providers - store backend implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use gateguard_providers::*;
}

mod builder;

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the builder entry points at the crate root
pub use builder::{Gateway, GatewayBuilder};

//! Domain Port Interfaces
//!
//! Boundary contracts between the domain and external layers. High-level
//! modules define these interfaces; providers and infrastructure implement
//! them, which keeps the dependency direction pointing inward.
//!
//! ## Organization
//!
//! - **store** - pluggable key/value backend with TTLs, counters, and
//!   sliding-window operations
//! - **auth** - token issuance, verification, and refresh
//! - **executor** - the protected collaborator that performs operations

/// Token authority port
pub mod auth;
/// Protected-operation collaborator port
pub mod executor;
/// Key/value store backend port
pub mod store;

// Re-export commonly used port traits for convenience
pub use auth::TokenAuthority;
pub use executor::OperationExecutor;
pub use store::{StoreProvider, WindowAdmission};

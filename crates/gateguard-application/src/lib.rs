//! Application Layer - Gateguard
//!
//! Use cases and admission services for the gateway access-control layer,
//! orchestrating domain types according to Clean Architecture principles.
//!
//! ## Architecture
//!
//! The application layer:
//! - Implements the per-call middleware pipeline (the gateway use case)
//! - Provides the admission services (RBAC, rate limiting, shared cache)
//! - Declares the store-provider registry that backends register into
//! - Has no dependencies on infrastructure or concrete backends
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `gateguard-domain`: domain types, errors, and port traits
//! - Pure Rust libraries for async, serialization, and logging

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use ports::*;
pub use use_cases::*;

//! Infrastructure Layer - Gateguard
//!
//! Cross-cutting technical concerns for the gateway access-control layer:
//! configuration loading, structured logging, token signing, and store
//! health reporting. Everything here adapts an external library to a
//! domain port or supplies wiring the application layer stays ignorant of.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod health;
pub mod logging;

pub use auth::{JwtTokenAuthority, SecretGenerator};
pub use config::{AppConfig, ConfigLoader};
pub use health::{check_store, HealthReport};

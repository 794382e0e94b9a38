//! Authentication adapters
//!
//! The JWT implementation of the token authority port, plus secret
//! generation tooling for provisioning signing keys.

/// JWT token authority
pub mod jwt;
/// Secure secret generation
pub mod secret;

pub use jwt::JwtTokenAuthority;
pub use secret::SecretGenerator;

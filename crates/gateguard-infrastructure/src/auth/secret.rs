//! Secure secret generation

use crate::constants::SECRET_DEFAULT_BYTES;
use rand::RngCore;

/// Secure secret generation
pub struct SecretGenerator;

impl SecretGenerator {
    /// Generate a cryptographically secure random secret, hex-encoded
    pub fn generate_secret(length: usize) -> String {
        let mut bytes = vec![0u8; length];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Generate a signing secret of the default length
    pub fn generate_signing_secret() -> String {
        Self::generate_secret(SECRET_DEFAULT_BYTES)
    }

    /// Generate a URL-safe secure token
    pub fn generate_url_safe_token(length: usize) -> String {
        let mut bytes = vec![0u8; length];
        rand::rng().fill_bytes(&mut bytes);
        use base64::{engine::general_purpose, Engine as _};
        general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Generate a UUID v4
    pub fn generate_uuid() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

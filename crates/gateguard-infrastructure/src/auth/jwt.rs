//! JWT Token Authority
//!
//! `jsonwebtoken`-backed implementation of the token authority port.
//! Tokens are compact HS256-signed claims (`sub`, `roles`, `iat`, `exp`,
//! `jti`) usable directly as `Authorization: Bearer` values.
//!
//! Expiry is validated with zero leeway: a token is accepted until exactly
//! its `exp` instant and rejected strictly after.

use crate::config::AuthConfig;
use crate::constants::JWT_MIN_SECRET_LEN;
use chrono::Utc;
use gateguard_domain::error::{AuthRejection, Error, Result};
use gateguard_domain::ports::TokenAuthority;
use gateguard_domain::value_objects::{Claims, Identity};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// JWT implementation of the token authority port.
///
/// Key material is validated at construction: a secret shorter than the
/// minimum is a configuration error there, so issuance cannot fail on a
/// healthy authority.
pub struct JwtTokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl JwtTokenAuthority {
    /// Create an authority from a signing secret and default token
    /// lifetime.
    pub fn new(secret: &str, token_ttl: Duration) -> Result<Self> {
        if secret.len() < JWT_MIN_SECRET_LEN {
            return Err(Error::configuration(format!(
                "JWT secret must be at least {JWT_MIN_SECRET_LEN} characters"
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry semantics: valid until exp, invalid strictly after
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl,
        })
    }

    /// Create an authority from the authentication configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Self::new(
            &config.jwt.secret,
            Duration::from_secs(config.jwt.token_ttl_hours * 3600),
        )
    }

    /// The default token lifetime
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Sign claims for a subject and role snapshot.
    fn sign(&self, subject: &str, roles: &[String], ttl: Duration) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| Error::internal(format!("failed to sign token: {e}")))
    }
}

impl TokenAuthority for JwtTokenAuthority {
    fn issue(&self, identity: &Identity) -> Result<String> {
        self.sign(&identity.id, &identity.role_set, self.token_ttl)
    }

    fn issue_with_ttl(&self, identity: &Identity, ttl: Duration) -> Result<String> {
        self.sign(&identity.id, &identity.role_set, ttl)
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    debug!("token expired");
                    Error::unauthenticated(AuthRejection::Expired, "token expired")
                }
                _ => {
                    debug!("invalid token: {e}");
                    Error::unauthenticated(AuthRejection::Invalid, format!("invalid token: {e}"))
                }
            })
        // Revocation hook: a denylist keyed by claims.jti would be
        // consulted here before returning the claims.
    }

    fn refresh(&self, token: &str) -> Result<String> {
        // Refresh extends validity from the claims' own subject and role
        // snapshot; it does not pick up role changes.
        let claims = self.verify(token)?;
        self.sign(&claims.sub, &claims.roles, self.token_ttl)
    }
}

impl std::fmt::Debug for JwtTokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenAuthority")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

//! Token Authority Port
//!
//! Issues, verifies, and refreshes signed identity tokens. Token work is
//! purely computational (a signature check), so this port is synchronous
//! and needs no shared state or locking.
//!
//! There is no revocation list in the reference design: a compromised
//! token remains valid until natural expiry. Implementers wanting
//! revocation should add a denylist keyed by the token's `jti`, with a TTL
//! equal to the remaining token lifetime, checked in `verify`.

use crate::error::Result;
use crate::value_objects::{Claims, Identity};
use std::time::Duration;

/// Token Authority Port
///
/// A signing-key misconfiguration is fatal at construction time, never
/// per call: implementations validate their key material up front so
/// `issue` cannot fail on a healthy authority.
pub trait TokenAuthority: Send + Sync {
    /// Issue a signed token for `identity` with the configured lifetime.
    ///
    /// The identity's role set is snapshotted into the token; later role
    /// changes do not affect tokens already issued.
    fn issue(&self, identity: &Identity) -> Result<String>;

    /// Issue a signed token with an explicit lifetime, e.g. long-lived
    /// API keys.
    fn issue_with_ttl(&self, identity: &Identity, ttl: Duration) -> Result<String>;

    /// Verify signature integrity and expiry, returning the decoded
    /// claims.
    ///
    /// Fails with a typed rejection distinguishing expiry from tampering;
    /// both map to "unauthenticated" for callers but are logged
    /// differently.
    fn verify(&self, token: &str) -> Result<Claims>;

    /// Extend a valid token: verify, then re-issue from the claims' own
    /// subject and role snapshot (roles are not re-read from the
    /// identity). A token that fails `verify` cannot be refreshed.
    fn refresh(&self, token: &str) -> Result<String>;
}

//! Identities and Token Claims
//!
//! An [`Identity`] is a provisioned principal; [`Claims`] are the decoded
//! contents of a signed token derived from an identity at issuance time.

use serde::{Deserialize, Serialize};

/// Value Object: Principal Identity
///
/// A provisioned principal with an id and a role set. Identities are
/// created at user-provisioning time (outside this layer) and are
/// immutable for the duration of a request.
///
/// ## Example
///
/// ```rust
/// use gateguard_domain::value_objects::Identity;
///
/// let identity = Identity::new("alice", "Alice Ops", vec!["admin".to_string()]);
/// assert_eq!(identity.id, "alice");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Stable identifier of the principal
    pub id: String,
    /// Human-readable display name
    pub display_name: String,
    /// Roles held by the principal at this moment
    pub role_set: Vec<String>,
}

impl Identity {
    /// Create a new identity
    pub fn new<I: Into<String>, D: Into<String>>(id: I, display_name: D, role_set: Vec<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role_set,
        }
    }
}

/// Value Object: Token Claims
///
/// The decoded, signature-verified contents of a bearer token. The role
/// list is a snapshot taken at issuance: tokens are self-contained
/// capability grants, not live pointers to identity state, so a role
/// change does not affect already-issued tokens until they expire.
///
/// Field names follow the compact signed-claims wire format (`sub`,
/// `roles`, `iat`, `exp`, `jti`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject id of the principal the token was issued to
    pub sub: String,
    /// Role snapshot captured at issuance
    pub roles: Vec<String>,
    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch; valid until exactly this instant
    pub exp: i64,
    /// Random unique id for auditability
    pub jti: String,
}

impl Claims {
    /// Whether the claims are past expiry at `now` (seconds since epoch).
    ///
    /// A token is valid until exactly `exp` and invalid strictly after.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.exp
    }
}

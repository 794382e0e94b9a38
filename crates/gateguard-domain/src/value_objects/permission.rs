//! Permissions, Grants, and Wildcard Matching
//!
//! A requested [`Permission`] is always a concrete `action:resource` pair.
//! A [`Grant`] owned by a role may wildcard either segment. Matching is
//! segment-wise and prefix-based on wildcarded segments, never regex, so an
//! operator can read a role's grant list and know exactly what widens
//! access.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The wildcard segment
const WILDCARD: &str = "*";

/// Value Object: Concrete Permission Request
///
/// A requested permission of the form `action:resource` with no wildcards.
///
/// ## Example
///
/// ```rust
/// use gateguard_domain::value_objects::Permission;
///
/// let permission = Permission::parse("read:itsi").unwrap();
/// assert_eq!(permission.action(), "read");
/// assert_eq!(permission.resource(), "itsi");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    action: String,
    resource: String,
}

impl Permission {
    /// Parse a concrete `action:resource` permission.
    ///
    /// Rejects wildcards: requested permissions are always concrete.
    pub fn parse(raw: &str) -> Result<Self> {
        let (action, resource) = split_segments(raw)?;
        if action == WILDCARD || resource == WILDCARD {
            return Err(Error::invalid_argument(format!(
                "requested permission must be concrete, got '{raw}'"
            )));
        }
        Ok(Self {
            action: action.to_string(),
            resource: resource.to_string(),
        })
    }

    /// The action segment
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The resource segment
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.resource)
    }
}

impl TryFrom<String> for Permission {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.to_string()
    }
}

/// Value Object: Role-Owned Grant
///
/// A permission grant of the form `action:resource` where either segment
/// may be the wildcard `*`, or end in `*` for a prefix match within that
/// segment.
///
/// ## Business Rules
///
/// - `X:*` satisfies any request with action `X`
/// - `*:Y` satisfies any request on resource `Y`
/// - `*:*` satisfies everything
/// - a segment `pre*` satisfies any segment starting with `pre`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Grant {
    action: String,
    resource: String,
}

impl Grant {
    /// Parse a grant, accepting wildcarded segments.
    pub fn parse(raw: &str) -> Result<Self> {
        let (action, resource) = split_segments(raw)?;
        Ok(Self {
            action: action.to_string(),
            resource: resource.to_string(),
        })
    }

    /// Whether this grant satisfies the requested permission.
    pub fn satisfies(&self, requested: &Permission) -> bool {
        segment_matches(&self.action, requested.action())
            && segment_matches(&self.resource, requested.resource())
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action, self.resource)
    }
}

impl TryFrom<String> for Grant {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<Grant> for String {
    fn from(grant: Grant) -> Self {
        grant.to_string()
    }
}

/// Split `action:resource` into validated segments.
fn split_segments(raw: &str) -> Result<(&str, &str)> {
    let mut parts = raw.splitn(2, ':');
    let action = parts.next().unwrap_or_default();
    let resource = parts.next().ok_or_else(|| {
        Error::invalid_argument(format!("permission '{raw}' must be of the form action:resource"))
    })?;
    if action.is_empty() || resource.is_empty() {
        return Err(Error::invalid_argument(format!(
            "permission '{raw}' has an empty segment"
        )));
    }
    Ok((action, resource))
}

/// Segment match: exact, full wildcard, or trailing-`*` prefix.
fn segment_matches(granted: &str, requested: &str) -> bool {
    if granted == WILDCARD {
        return true;
    }
    if let Some(prefix) = granted.strip_suffix('*') {
        return requested.starts_with(prefix);
    }
    granted == requested
}

//! Inbound Call Contract and Operation Routing
//!
//! The wire-level shapes the surrounding transport hands to the gateway,
//! plus the per-operation routing metadata (required permission and cache
//! class) the middleware consults once per call.

use crate::error::ErrorEnvelope;
use crate::value_objects::Permission;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value Object: Inbound Call
///
/// `{ bearer_token, operation, arguments }` as delivered by transport
/// code. The bearer token is optional so that rejection of a missing
/// credential is this layer's decision, audit-logged like any other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundCall {
    /// Bearer credential, without or with the `Bearer ` prefix
    pub bearer_token: Option<String>,
    /// Declared operation name
    pub operation: String,
    /// Operation arguments as a JSON object
    #[serde(default)]
    pub arguments: Value,
}

impl InboundCall {
    /// Create a new inbound call
    pub fn new<O: Into<String>>(bearer_token: Option<String>, operation: O, arguments: Value) -> Self {
        Self {
            bearer_token,
            operation: operation.into(),
            arguments,
        }
    }
}

/// Value Object: Call Outcome
///
/// `{ result }` on success, or the error envelope on failure. Serializes
/// untagged so transport code sees exactly the contract shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CallOutcome {
    /// Successful execution (possibly served from cache)
    Success {
        /// The operation result
        result: Value,
    },
    /// Typed failure
    Failure(ErrorEnvelope),
}

impl CallOutcome {
    /// True when the call succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Cache class of an operation, resolved to a concrete TTL from
/// configuration by the caller.
///
/// TTLs are chosen per operation class, never globally fixed: status data
/// changes quickly and gets a short TTL, query results live longer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheClass {
    /// Never cached
    Uncached,
    /// Frequently-changing status data (short TTL, ~30-60s)
    Status,
    /// Query results (longer TTL, ~5 minutes)
    Query,
}

/// Value Object: Operation Routing Entry
///
/// Declarative mapping consulted once by the middleware: which permission
/// an operation requires and how its results are cached. Replaces
/// per-endpoint permission checks scattered through handler code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationSpec {
    /// Permission required to invoke the operation
    pub permission: Permission,
    /// Cache class for the operation's results
    pub cache_class: CacheClass,
}

impl OperationSpec {
    /// Create a new operation spec
    pub fn new(permission: Permission, cache_class: CacheClass) -> Self {
        Self {
            permission,
            cache_class,
        }
    }
}

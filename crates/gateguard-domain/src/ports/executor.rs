//! Protected-Operation Collaborator Port
//!
//! The external collaborator that actually performs a protected operation
//! once this layer has authenticated, authorized, and admitted the call.
//! The gateway knows nothing about its internals; the surrounding system
//! supplies an implementation (typically the upstream domain client).

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Collaborator interface consumed by the gateway middleware.
#[async_trait]
pub trait OperationExecutor: Send + Sync {
    /// Execute the named operation with its arguments.
    ///
    /// Errors are surfaced to the caller as typed upstream failures and
    /// are never cached.
    async fn execute(&self, operation: &str, arguments: &Value) -> Result<Value>;
}

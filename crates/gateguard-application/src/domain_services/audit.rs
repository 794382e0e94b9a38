//! Audit Event Logging
//!
//! Structured security events emitted under the dedicated `audit` tracing
//! target so deployments can route them separately from operational logs.
//! Authentication and authorization are logged regardless of outcome;
//! rate-limit rejections are logged; cache hits and misses are not (high
//! volume, low security value).

use gateguard_domain::error::AuthRejection;
use gateguard_domain::value_objects::Permission;
use serde_json::Value;
use tracing::{info, warn};

/// Subject label used before a credential has been tied to an identity
const UNKNOWN_SUBJECT: &str = "unknown";

/// Audit event emitter.
///
/// Stateless; the tracing subscriber supplies timestamps and output
/// routing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditLog;

impl AuditLog {
    /// Create an audit log
    pub fn new() -> Self {
        Self
    }

    /// Record an authentication attempt, successful or not.
    pub fn authentication(&self, subject: Option<&str>, rejection: Option<AuthRejection>) {
        let subject = subject.unwrap_or(UNKNOWN_SUBJECT);
        match rejection {
            None => info!(
                target: "audit",
                event = "authentication",
                subject,
                outcome = "success",
            ),
            Some(reason) => info!(
                target: "audit",
                event = "authentication",
                subject,
                outcome = "failure",
                reason = %reason,
            ),
        }
    }

    /// Record an authorization decision, successful or not.
    pub fn authorization(&self, subject: &str, permission: &Permission, granted: bool) {
        info!(
            target: "audit",
            event = "authorization",
            subject,
            permission = %permission,
            outcome = if granted { "success" } else { "failure" },
        );
    }

    /// Record a rate-limit rejection.
    pub fn rate_limit_exceeded(&self, subject: &str, retry_after_secs: u64) {
        warn!(
            target: "audit",
            event = "rate_limit_exceeded",
            subject,
            retry_after_secs,
        );
    }

    /// Record a rejected request payload.
    pub fn invalid_input(&self, subject: &str, operation: &str, detail: &str) {
        warn!(
            target: "audit",
            event = "invalid_input",
            subject,
            operation,
            detail,
        );
    }

    /// Record a generic security event with free-form details.
    pub fn security_event(&self, event: &str, details: &Value) {
        warn!(
            target: "audit",
            event,
            details = %details,
        );
    }
}

//! Error handling types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Why a bearer credential was rejected.
///
/// Callers must not branch on the variant for their security response
/// (every rejection maps to "unauthenticated"); the distinction exists for
/// audit logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthRejection {
    /// No credential was presented
    Missing,
    /// The token was well-formed and untampered but past its expiry
    Expired,
    /// The token was malformed or its signature did not verify
    Invalid,
}

impl std::fmt::Display for AuthRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Missing => "missing",
            Self::Expired => "expired",
            Self::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

/// Main error type for the gateway access-control layer
#[derive(Error, Debug)]
pub enum Error {
    /// Missing, expired, or malformed credential (401-class)
    #[error("unauthenticated ({reason}): {message}")]
    Unauthenticated {
        /// Why the credential was rejected
        reason: AuthRejection,
        /// Detail for logging; never exposes key material
        message: String,
    },

    /// Authenticated but lacking the required permission (403-class)
    #[error("forbidden: {subject} lacks permission {permission}")]
    Forbidden {
        /// Subject id of the authenticated identity
        subject: String,
        /// The permission that was required
        permission: String,
    },

    /// Admission denied by the rate limiter (429-class)
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Remaining admissions in the current window (zero on rejection)
        remaining: u64,
        /// Seconds until a slot frees up
        retry_after_secs: u64,
    },

    /// The protected collaborator failed; never cached
    #[error("upstream failure: {message}")]
    Upstream {
        /// Description of the upstream failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backing store is unreachable or timed out
    #[error("store unavailable: {message}")]
    Store {
        /// Description of the store failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument provided to an operation
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Resource not found (e.g. an undeclared operation name)
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Internal system error
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create an unauthenticated error
    pub fn unauthenticated<S: Into<String>>(reason: AuthRejection, message: S) -> Self {
        Self::Unauthenticated {
            reason,
            message: message.into(),
        }
    }

    /// Create a forbidden error
    pub fn forbidden<S: Into<String>, P: Into<String>>(subject: S, permission: P) -> Self {
        Self::Forbidden {
            subject: subject.into(),
            permission: permission.into(),
        }
    }

    /// Create a rate-limited error
    pub fn rate_limited(remaining: u64, retry_after_secs: u64) -> Self {
        Self::RateLimited {
            remaining,
            retry_after_secs,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Upstream error creation methods
impl Error {
    /// Create an upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
            source: None,
        }
    }

    /// Create an upstream error with source
    pub fn upstream_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Upstream {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Store error creation methods
impl Error {
    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification for transport mapping
impl Error {
    /// Stable machine-readable kind for this error.
    ///
    /// Transport code maps kinds to status codes without re-deriving the
    /// semantics: `unauthenticated` → 401, `forbidden` → 403,
    /// `rate_limited` → 429, everything else → 5xx-class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated { .. } => "unauthenticated",
            Self::Forbidden { .. } => "forbidden",
            Self::RateLimited { .. } => "rate_limited",
            Self::Upstream { .. } => "upstream_failure",
            Self::Store { .. } => "store_unavailable",
            Self::Configuration { .. } => "configuration",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NotFound { .. } => "not_found",
            Self::Json { .. } => "serialization",
            Self::Internal { .. } => "internal",
        }
    }

    /// Back-off guidance in seconds, present only for rate-limit rejections
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited {
                retry_after_secs, ..
            } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// True when the failure must terminate the pipeline before the
    /// collaborator is invoked
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated { .. } | Self::Forbidden { .. } | Self::RateLimited { .. }
        )
    }
}

/// Wire-level error envelope for the inbound call contract.
///
/// Serializes as `{ error_kind, message, retry_after? }` so surrounding
/// transport code can map rejections to status codes directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// Stable machine-readable kind, see [`Error::kind`]
    pub error_kind: String,
    /// Human-readable description; internals are not leaked for upstream
    /// failures
    pub message: String,
    /// Seconds to wait before retrying, for rate-limit rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

impl From<&Error> for ErrorEnvelope {
    fn from(error: &Error) -> Self {
        let message = match error {
            // Upstream detail stays in the logs, not on the wire
            Error::Upstream { .. } => "upstream operation failed".to_string(),
            other => other.to_string(),
        };
        Self {
            error_kind: error.kind().to_string(),
            message,
            retry_after: error.retry_after(),
        }
    }
}

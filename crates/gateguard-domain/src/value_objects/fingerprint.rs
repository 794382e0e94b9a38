//! Cache Fingerprinting
//!
//! A [`Fingerprint`] is a deterministic SHA-256 hash of an operation name
//! and its normalized arguments, used as the shared-cache key. Argument
//! objects are canonicalized by recursively sorting map keys, so two calls
//! that differ only in key order produce the same fingerprint.

use crate::constants::CACHE_KEY_PREFIX;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// Value Object: Request Fingerprint
///
/// ## Example
///
/// ```rust
/// use gateguard_domain::value_objects::Fingerprint;
/// use serde_json::json;
///
/// let a = Fingerprint::compute("search", &json!({"q": "errors", "limit": 10}));
/// let b = Fingerprint::compute("search", &json!({"limit": 10, "q": "errors"}));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    operation: String,
    digest: String,
}

impl Fingerprint {
    /// Compute the fingerprint of an operation and its arguments.
    pub fn compute(operation: &str, arguments: &Value) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(operation.as_bytes());
        hasher.update([0u8]);
        hasher.update(canonical_json(arguments).as_bytes());
        Self {
            operation: operation.to_string(),
            digest: hex::encode(hasher.finalize()),
        }
    }

    /// The operation this fingerprint was computed for
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Hex digest of the normalized request
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// The store key for this fingerprint, e.g. `cache:search:ab12...`
    pub fn store_key(&self) -> String {
        format!("{}{}:{}", CACHE_KEY_PREFIX, self.operation, self.digest)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.operation, self.digest)
    }
}

/// Serialize a JSON value with object keys sorted recursively.
///
/// Array order is significant and preserved; only maps are normalized.
fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let fields: Vec<String> = keys
                .into_iter()
                .map(|key| {
                    format!(
                        "{}:{}",
                        serde_json::to_string(key).unwrap_or_default(),
                        canonical_json(&map[key])
                    )
                })
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", rendered.join(","))
        }
        other => other.to_string(),
    }
}

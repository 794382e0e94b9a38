//! Request Argument Validation
//!
//! Request-shaping scan over string arguments for injection-shaped
//! content. This is a coarse gate in front of the collaborator, not a
//! substitute for parameterized handling upstream; it exists to reject
//! obviously hostile payloads before they consume upstream capacity.

use gateguard_domain::error::{Error, Result};
use serde_json::Value;

/// Substrings flagged as SQL-injection-shaped (compared case-insensitively)
const SQL_PATTERNS: &[&str] = &["SELECT ", "INSERT ", "UPDATE ", "DELETE ", "DROP ", "UNION "];

/// Substrings flagged as XSS-shaped (compared case-insensitively)
const XSS_PATTERNS: &[&str] = &["<script", "javascript:", "onload=", "onerror="];

/// Argument validator applied between admission and execution.
#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    enabled: bool,
}

impl InputValidator {
    /// Create a validator; a disabled validator accepts everything
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Scan `arguments` and reject when any string field looks hostile.
    pub fn validate(&self, arguments: &Value) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let mut findings = Vec::new();
        scan(arguments, "arguments", &mut findings);
        if findings.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_argument(findings.join("; ")))
        }
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(true)
    }
}

fn scan(value: &Value, path: &str, findings: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            let upper = text.to_uppercase();
            if SQL_PATTERNS.iter().any(|pattern| upper.contains(pattern)) {
                findings.push(format!("possible SQL injection in field '{path}'"));
            }
            let lower = text.to_lowercase();
            if XSS_PATTERNS.iter().any(|pattern| lower.contains(pattern)) {
                findings.push(format!("possible XSS in field '{path}'"));
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                scan(nested, &format!("{path}.{key}"), findings);
            }
        }
        Value::Array(items) => {
            for (index, nested) in items.iter().enumerate() {
                scan(nested, &format!("{path}[{index}]"), findings);
            }
        }
        _ => {}
    }
}

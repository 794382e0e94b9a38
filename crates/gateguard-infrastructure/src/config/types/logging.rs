//! Logging configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Emit JSON-formatted records
    pub json_format: bool,

    /// Optional log file path (daily rotation)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_output: Option<PathBuf>,
}

/// Returns default logging configuration: info level, human-readable
/// output, no file.
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_output: None,
        }
    }
}

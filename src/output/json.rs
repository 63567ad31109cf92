//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    /// The actual data
    pub data: T,

    /// Metadata about the invocation
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Command that produced the output
    pub command: String,

    /// Timestamp of the output
    pub timestamp: String,

    /// detectop version
    pub version: String,
}

impl<T> JsonOutput<T> {
    /// Wrap `data` produced by `command`
    pub fn new(command: &str, data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                command: command.to_string(),
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the metadata envelope
pub fn format_json<T: Serialize + ?Sized>(command: &str, data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonOutput::new(command, data))
}

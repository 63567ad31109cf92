//! Error types for detectop

use thiserror::Error;

/// Result type alias for detectop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Black Duck reported {0} policy violation(s)")]
    PolicyViolation(u32),
}

/// Errors raised while fetching remote files
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Download of {url} failed with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },

    /// Collaborator-provided failure, displayed verbatim
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "download host".to_string());

        if err.is_timeout() {
            DownloadError::Network(format!("Request to {} timed out", url))
        } else if err.is_connect() {
            DownloadError::Network(format!("Failed to connect to {}", url))
        } else {
            DownloadError::Network(err.to_string())
        }
    }
}

/// Errors raised while running the scan script
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Failed to spawn {shell}: {reason}")]
    Spawn { shell: String, reason: String },

    #[error("Command exited with status {0}")]
    ExitStatus(i32),

    #[error("Command terminated by signal")]
    Terminated,

    /// Collaborator-provided failure, displayed verbatim
    #[error("{0}")]
    Process(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Configuration file already exists: {0}. Use --force to overwrite.")]
    AlreadyExists(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Errors raised while reading scan reports
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to parse policy status {path}: {reason}")]
    Parse { path: String, reason: String },
}

//! Error types for serverinfo-probe

use thiserror::Error;

/// Fatal misconfiguration detected before any probe runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Host is empty
    #[error("Host must not be empty")]
    EmptyHost,

    /// Port is zero
    #[error("Port must be a positive integer")]
    InvalidPort,

    /// Timeout is zero
    #[error("Timeout must be a positive duration")]
    InvalidTimeout,

    /// API prefix is not an absolute path
    #[error("API prefix must start with '/': {0}")]
    InvalidPrefix(String),

    /// Scheme other than http/https
    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// Base URL could not be parsed
    #[error("Malformed base URL {url}: {reason}")]
    MalformedBaseUrl { url: String, reason: String },
}

/// Errors that abort a run before or outside the probe loop
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Invalid run configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Report serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::Client(err.to_string())
    }
}

//! Error types for the NSX-T API client.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while talking to the NSX-T manager.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The manager answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The response body is not the expected document.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A TLS file referenced by the configuration could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the manager answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for API calls.
pub type Result<T> = std::result::Result<T, ApiError>;

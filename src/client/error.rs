//! Error types for health fetches.

use thiserror::Error;

/// Errors that can occur when fetching the health payload.
///
/// Samplers treat every variant the same way; the variant only records
/// the cause for logging and the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("health endpoint returned status {0}")]
    Status(u16),

    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("request timed out")]
    Timeout,

    /// Response body was not a valid health payload.
    #[error("failed to decode payload: {0}")]
    Decode(String),

    /// Local I/O failure (file-backed clients).
    #[error("read error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Connection(err.to_string())
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

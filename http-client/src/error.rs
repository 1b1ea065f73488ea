//! Error types for the HTTP client

use thiserror::Error;

/// Errors that can occur while talking to a device over HTTP
#[derive(Debug, Error)]
pub enum HttpError {
    /// DNS, connect, or read failure
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The device answered with a non-success status code
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body is not valid JSON
    #[error("JSON parsing error: {0}")]
    Parse(String),
}

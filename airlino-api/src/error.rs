use http_client::HttpError;
use thiserror::Error;

/// High-level API errors for airlino operations
///
/// Every transport-level fault collapses into [`ApiError::ConnectionFailure`]
/// so callers never need to tell DNS failures from refused connections.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The device could not be reached or did not answer properly
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    /// Malformed firmware string or response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The response was well-formed JSON but lacked a required field
    #[error("Incomplete response from {endpoint}: missing `{field}`")]
    IncompleteResponse {
        endpoint: &'static str,
        field: &'static str,
    },

    /// Invalid operator-supplied configuration (version map, address)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, ApiError::ConnectionFailure(_))
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, ApiError::ParseError(_))
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Network(msg) => ApiError::ConnectionFailure(msg),
            HttpError::Status(code) => ApiError::ConnectionFailure(format!("HTTP status {}", code)),
            HttpError::Parse(msg) => ApiError::ParseError(msg),
        }
    }
}

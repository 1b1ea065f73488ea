//! Error types for airlino-state

use std::time::Duration;

use airlino_api::ApiError;
use thiserror::Error;

/// Result type for airlino-state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors raised by session operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A blocking request job could not be run or was lost
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl StateError {
    /// Parse errors are surfaced to callers; everything else fails closed
    pub fn is_parse_error(&self) -> bool {
        matches!(self, StateError::Api(e) if e.is_parse_error())
    }
}

/// Coarse classification of a failed refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Unreachable device, transport fault or timeout
    Connection,
    /// The device answered with something that is not a usable status
    Malformed,
}

/// Why a refresh cycle did not produce a new snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshFailure {
    #[error("connection failure: {0}")]
    Connection(String),

    #[error("refresh timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RefreshFailure {
    /// Timeouts are classified exactly like connection failures
    pub fn kind(&self) -> FailureKind {
        match self {
            RefreshFailure::Connection(_) | RefreshFailure::Timeout(_) => FailureKind::Connection,
            RefreshFailure::Malformed(_) => FailureKind::Malformed,
        }
    }
}

impl From<ApiError> for RefreshFailure {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::ConnectionFailure(msg) => RefreshFailure::Connection(msg),
            other => RefreshFailure::Malformed(other.to_string()),
        }
    }
}

impl From<StateError> for RefreshFailure {
    fn from(error: StateError) -> Self {
        match error {
            StateError::Api(e) => e.into(),
            StateError::WorkerPool(msg) => RefreshFailure::Connection(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classified_as_connection() {
        let failure = RefreshFailure::Timeout(Duration::from_secs(10));
        assert_eq!(failure.kind(), FailureKind::Connection);
        assert_eq!(failure.to_string(), "refresh timed out after 10s");
    }

    #[test]
    fn test_api_error_classification() {
        let failure: RefreshFailure = ApiError::ConnectionFailure("refused".to_string()).into();
        assert_eq!(failure.kind(), FailureKind::Connection);

        let failure: RefreshFailure = ApiError::IncompleteResponse {
            endpoint: "player.action",
            field: "state",
        }
        .into();
        assert_eq!(failure.kind(), FailureKind::Malformed);

        let failure: RefreshFailure = ApiError::ParseError("bad json".to_string()).into();
        assert_eq!(failure.kind(), FailureKind::Malformed);
    }

    #[test]
    fn test_state_error_parse_detection() {
        assert!(StateError::Api(ApiError::ParseError("x".to_string())).is_parse_error());
        assert!(!StateError::WorkerPool("gone".to_string()).is_parse_error());
    }
}

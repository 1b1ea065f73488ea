//! Error types for the airlino-poller crate.

use airlino_state::HardwareId;

/// Result type for coordinator operations
pub type PollingResult<T> = std::result::Result<T, PollingError>;

/// Errors raised while managing polling tasks
///
/// Refresh failures are not errors at this level; they are reported to
/// subscribers as failed update cycles.
#[derive(Debug, thiserror::Error)]
pub enum PollingError {
    /// The coordinator is already polling its configured maximum of sessions
    #[error("Too many polled sessions (limit {limit})")]
    TooManySessions { limit: usize },

    /// No polling task exists for this device
    #[error("Device {0} is not being polled")]
    NotPolling(HardwareId),

    /// Invalid configuration provided
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A polling task could not be joined on shutdown
    #[error("Task error: {0}")]
    Task(String),
}

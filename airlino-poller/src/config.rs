//! Configuration for the polling coordinator

use std::time::Duration;

use crate::{PollingError, PollingResult};

/// Controls how often sessions are refreshed and how long a refresh may take
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between scheduled refreshes of one session
    /// Default: 60 seconds
    pub interval: Duration,

    /// Longest a single refresh may run before it counts as a connection failure
    /// Default: 10 seconds
    pub refresh_timeout: Duration,

    /// Run the first refresh as soon as polling starts instead of after one interval
    /// Default: true
    pub refresh_on_start: bool,

    /// Maximum number of sessions polled at once
    /// Default: 50
    pub max_concurrent_sessions: usize,

    /// Capacity of the update-cycle notification channel
    /// Default: 256
    pub notification_buffer: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            refresh_timeout: Duration::from_secs(10),
            refresh_on_start: true,
            max_concurrent_sessions: 50,
            notification_buffer: 256,
        }
    }
}

impl PollerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn with_refresh_on_start(mut self, enabled: bool) -> Self {
        self.refresh_on_start = enabled;
        self
    }

    pub fn with_max_concurrent_sessions(mut self, max: usize) -> Self {
        self.max_concurrent_sessions = max;
        self
    }

    pub fn with_notification_buffer(mut self, capacity: usize) -> Self {
        self.notification_buffer = capacity;
        self
    }

    /// Validate the configuration and return the first issue found
    pub fn validate(&self) -> PollingResult<()> {
        if self.interval.is_zero() {
            return Err(PollingError::Configuration(
                "Polling interval must be greater than 0".to_string(),
            ));
        }

        if self.refresh_timeout.is_zero() {
            return Err(PollingError::Configuration(
                "Refresh timeout must be greater than 0".to_string(),
            ));
        }

        if self.max_concurrent_sessions == 0 {
            return Err(PollingError::Configuration(
                "Max concurrent sessions must be greater than 0".to_string(),
            ));
        }

        if self.notification_buffer == 0 {
            return Err(PollingError::Configuration(
                "Notification buffer must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

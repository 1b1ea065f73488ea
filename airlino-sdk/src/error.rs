use std::net::IpAddr;

use airlino_api::{ApiError, DeviceAddress};
use airlino_poller::PollingError;
use airlino_state::{HardwareId, StateError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("State management error: {0}")]
    StateError(#[from] StateError),

    #[error("API error: {0}")]
    ApiError(#[from] ApiError),

    #[error("Polling error: {0}")]
    PollingError(#[from] PollingError),

    #[error("Device not found: {0}")]
    DeviceNotFound(HardwareId),

    #[error("No supported airlino device at {0}")]
    ValidationFailed(DeviceAddress),

    #[error("No IPv4 address among candidates {0:?}")]
    NoIpv4Candidate(Vec<IpAddr>),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, SdkError>;

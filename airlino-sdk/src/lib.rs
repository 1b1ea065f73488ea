//! # airlino-sdk - device-state sync for airlino network audio devices
//!
//! Keeps an in-memory, always-readable picture of each registered device:
//!
//! ```rust,no_run
//! use airlino_sdk::{AirlinoSystem, SyncConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), airlino_sdk::SdkError> {
//!     let system = AirlinoSystem::new(SyncConfig::default())?;
//!     let lounge = system.add_device(system.address_for("192.168.1.40")).await?;
//!
//!     let attrs = lounge.attributes();   // Cached snapshot, no network
//!     println!("{} is {:?}", attrs.name, attrs.state);
//!
//!     system.request_refresh(&lounge.hardware_id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! airlino-sdk (AirlinoSystem, registry, config)
//!     ↓
//! airlino-poller (one timer per device, timeouts, notifications)
//!     ↓
//! airlino-state (DeviceSession, attribute snapshots, worker pool)
//!     ↓
//! airlino-api (addresses, version negotiation, typed operations)
//!     ↓
//! http-client (JSON over HTTP)
//! ```

mod candidate;
mod config;
mod device;
mod error;
pub mod logging;
mod registry;
mod system;

pub use candidate::select_ipv4;
pub use config::SyncConfig;
pub use device::Device;
pub use error::{Result, SdkError};
pub use registry::{Registration, SessionRegistry};
pub use system::AirlinoSystem;

// Re-export commonly used types from the lower layers
pub use airlino_api::{ApiVersion, ApiVersionMap, DeviceAddress, FirmwareVersion};
pub use airlino_poller::{CycleOutcome, CycleState, PollerConfig, PollingError, SyncStatus, UpdateCycle};
pub use airlino_state::{
    DeviceAttributes, DeviceIdentity, FailureKind, HardwareId, PlaybackState, RefreshFailure,
};
pub use http_client::ClientConfig;

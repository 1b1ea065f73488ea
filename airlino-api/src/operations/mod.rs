//! Typed operations for the informational `*.action` endpoints

pub mod device_info;
pub mod network_info;
pub mod player_status;

pub use device_info::{DeviceInfo, DeviceInfoOperation};
pub use network_info::{InterfaceInfo, NetworkInfo, NetworkInfoOperation};
pub use player_status::{PlayerStatus, PlayerStatusOperation};

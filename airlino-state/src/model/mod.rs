//! Data types cached by a device session

mod attributes;
mod hardware_id;
mod playback_state;

pub use attributes::{DeviceAttributes, DeviceIdentity};
pub use hardware_id::HardwareId;
pub use playback_state::PlaybackState;

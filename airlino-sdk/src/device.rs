//! Device handle returned by the system

use std::sync::Arc;

use airlino_api::{ApiVersion, DeviceAddress};
use airlino_state::{DeviceAttributes, DeviceSession, HardwareId};

/// Cheap, cloneable handle to a registered device
///
/// Reading attributes never touches the network; it returns the last
/// complete snapshot the poller committed.
#[derive(Debug, Clone)]
pub struct Device {
    /// Stable identity (MAC address) of the device
    pub hardware_id: HardwareId,
    session: Arc<DeviceSession>,
}

impl Device {
    pub(crate) fn new(hardware_id: HardwareId, session: Arc<DeviceSession>) -> Self {
        Self { hardware_id, session }
    }

    pub fn name(&self) -> String {
        self.session.attributes().name.clone()
    }

    pub fn address(&self) -> DeviceAddress {
        self.session.address()
    }

    pub fn api_version(&self) -> ApiVersion {
        self.session.api_version()
    }

    pub fn attributes(&self) -> Arc<DeviceAttributes> {
        self.session.attributes()
    }

    /// The underlying session for advanced usage
    pub fn session(&self) -> &Arc<DeviceSession> {
        &self.session
    }
}

use serde::{Deserialize, Serialize};

use airlino_api::ApiVersion;
use airlino_api::operations::PlayerStatus;

use super::{HardwareId, PlaybackState};

/// Identity populated by a successful validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub name: String,
    pub hardware_id: HardwareId,
    pub api_version: ApiVersion,
}

/// Read-only snapshot of everything known about a device
///
/// Snapshots are never edited in place. A refresh builds a new value and
/// swaps it in, so readers always see one complete snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAttributes {
    /// Empty until the session has been validated
    pub name: String,
    pub hardware_id: Option<HardwareId>,
    pub muted: bool,
    pub state: PlaybackState,
    pub artwork_url: Option<String>,
    pub title: Option<String>,
    pub is_on: bool,
    pub group_members: Vec<String>,
}

impl DeviceAttributes {
    /// Copy of `self` carrying a new identity, playback fields untouched
    pub fn with_identity(&self, identity: &DeviceIdentity) -> Self {
        Self {
            name: identity.name.clone(),
            hardware_id: Some(identity.hardware_id.clone()),
            ..self.clone()
        }
    }

    /// Copy of `self` carrying a new playback status, identity untouched
    pub fn with_status(&self, status: &PlayerStatus, state: PlaybackState) -> Self {
        Self {
            name: self.name.clone(),
            hardware_id: self.hardware_id.clone(),
            muted: status.mute,
            state,
            artwork_url: status.artwork.clone(),
            title: status.title.clone(),
            is_on: status.power,
            group_members: status.group.clone(),
        }
    }
}

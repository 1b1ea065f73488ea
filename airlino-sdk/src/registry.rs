//! Sessions owned by a system, keyed by hardware id

use std::sync::Arc;

use airlino_api::DeviceAddress;
use airlino_state::{DeviceIdentity, DeviceSession, HardwareId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

/// What [`SessionRegistry::register`] did
#[derive(Debug)]
pub enum Registration {
    /// A new session was stored
    Added(Arc<DeviceSession>),
    /// A session for this device already existed and took over the new
    /// identity and address
    Existing(Arc<DeviceSession>),
}

impl Registration {
    pub fn session(&self) -> &Arc<DeviceSession> {
        match self {
            Registration::Added(session) | Registration::Existing(session) => session,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Registration::Added(_))
    }
}

/// At most one session per physical device
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<HardwareId, Arc<DeviceSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `session` under the hardware id of `identity` unless that device
    /// is known
    ///
    /// A device that reappears keeps its existing session and snapshot. The
    /// session adopts the freshly validated `identity` (name and negotiated
    /// API version) and `address`.
    pub fn register(
        &self,
        identity: DeviceIdentity,
        address: DeviceAddress,
        session: Arc<DeviceSession>,
    ) -> Registration {
        match self.sessions.entry(identity.hardware_id.clone()) {
            Entry::Occupied(entry) => {
                let existing = Arc::clone(entry.get());
                existing.adopt(identity, address);
                Registration::Existing(existing)
            }
            Entry::Vacant(entry) => {
                info!(hardware_id = %entry.key(), %address, "registered device");
                entry.insert(Arc::clone(&session));
                Registration::Added(session)
            }
        }
    }

    pub fn get(&self, hardware_id: &HardwareId) -> Option<Arc<DeviceSession>> {
        self.sessions.get(hardware_id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn remove(&self, hardware_id: &HardwareId) -> Option<Arc<DeviceSession>> {
        self.sessions.remove(hardware_id).map(|(_, session)| session)
    }

    pub fn contains(&self, hardware_id: &HardwareId) -> bool {
        self.sessions.contains_key(hardware_id)
    }

    /// Registered hardware ids in sorted order
    pub fn hardware_ids(&self) -> Vec<HardwareId> {
        let mut ids: Vec<HardwareId> = self.sessions.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn clear(&self) {
        self.sessions.clear();
    }
}

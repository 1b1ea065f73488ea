//! One device, its negotiated dialect and its cached attributes
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use airlino_api::{ApiVersionMap, DeviceAddress};
//! use airlino_state::{DeviceSession, WorkerPool};
//!
//! # async fn demo() -> Result<(), airlino_state::StateError> {
//! let map = Arc::new(ApiVersionMap::from_pairs(&[("1.0.0", 10), ("2.0.0", 11)])?);
//! let session = DeviceSession::new(DeviceAddress::new("192.168.1.40"), map, WorkerPool::default());
//!
//! if session.validate().await? {
//!     let attrs = session.attributes();
//!     println!("{} ({:?})", attrs.name, attrs.hardware_id);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use airlino_api::operations::{
    DeviceInfoOperation, NetworkInfoOperation, PlayerStatus, PlayerStatusOperation,
};
use airlino_api::{ActionRequest, AirlinoClient, ApiVersion, ApiVersionMap, DeviceAddress};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::model::{DeviceAttributes, DeviceIdentity, HardwareId, PlaybackState};
use crate::worker_pool::WorkerPool;
use crate::{RefreshFailure, RefreshResult, Result};

/// Everything a session mutates, swapped under one lock
#[derive(Debug, Default)]
struct SessionState {
    identity: Option<DeviceIdentity>,
    api_version: ApiVersion,
    attributes: Arc<DeviceAttributes>,
}

/// In-memory representative of one physical device
///
/// A session starts out unvalidated, speaking [`ApiVersion::FALLBACK`] with an
/// empty attribute snapshot. `validate()` fills in name, hardware id and
/// negotiated dialect; `refresh()` replaces the playback part of the
/// snapshot. Both commit by swapping a whole new snapshot in.
#[derive(Debug)]
pub struct DeviceSession {
    address: RwLock<DeviceAddress>,
    api_map: Arc<ApiVersionMap>,
    pool: WorkerPool,
    state: RwLock<SessionState>,
}

impl DeviceSession {
    pub fn new(address: DeviceAddress, api_map: Arc<ApiVersionMap>, pool: WorkerPool) -> Self {
        Self {
            address: RwLock::new(address),
            api_map,
            pool,
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn address(&self) -> DeviceAddress {
        self.address.read().clone()
    }

    /// Point the session at a new address; identity and snapshot are kept
    pub fn set_address(&self, address: DeviceAddress) {
        let mut current = self.address.write();
        if *current != address {
            let previous = std::mem::replace(&mut *current, address.clone());
            info!(from = %previous, to = %address, "device address changed");
        }
    }

    /// Take over the identity and address of a fresh validation of the same device
    ///
    /// The new name, hardware id and negotiated API version replace the old
    /// ones together with the address; playback fields of the snapshot are
    /// kept until the next refresh.
    pub fn adopt(&self, identity: DeviceIdentity, address: DeviceAddress) {
        let mut current = self.address.write();
        let mut state = self.state.write();

        if state.api_version != identity.api_version {
            info!(
                hardware_id = %identity.hardware_id,
                from = %state.api_version,
                to = %identity.api_version,
                "renegotiated API version"
            );
        }
        Self::commit_identity(&mut state, identity);

        if *current != address {
            let previous = std::mem::replace(&mut *current, address.clone());
            info!(from = %previous, to = %address, "device address changed");
        }
    }

    fn commit_identity(state: &mut SessionState, identity: DeviceIdentity) {
        state.attributes = Arc::new(state.attributes.with_identity(&identity));
        state.api_version = identity.api_version;
        state.identity = Some(identity);
    }

    pub fn api_version(&self) -> ApiVersion {
        self.state.read().api_version
    }

    pub fn identity(&self) -> Option<DeviceIdentity> {
        self.state.read().identity.clone()
    }

    pub fn hardware_id(&self) -> Option<HardwareId> {
        self.state
            .read()
            .identity
            .as_ref()
            .map(|identity| identity.hardware_id.clone())
    }

    pub fn is_validated(&self) -> bool {
        self.state.read().identity.is_some()
    }

    /// Current attribute snapshot (never touches the network)
    pub fn attributes(&self) -> Arc<DeviceAttributes> {
        Arc::clone(&self.state.read().attributes)
    }

    /// Check that the endpoint is a supported device and learn its identity
    ///
    /// Returns `Ok(false)`, leaving the session untouched, when the device is
    /// unreachable or its answers lack a name or a MAC. Malformed firmware
    /// strings and non-JSON bodies are returned as errors.
    pub async fn validate(&self) -> Result<bool> {
        match self.try_validate().await {
            Ok(_) => Ok(true),
            Err(e) if e.is_parse_error() => {
                warn!(address = %self.address(), error = %e, "validation aborted by malformed response");
                Err(e)
            }
            Err(e) => {
                debug!(address = %self.address(), error = %e, "device failed validation");
                Ok(false)
            }
        }
    }

    /// Like [`validate`](Self::validate), but reports why validation failed
    pub async fn try_validate(&self) -> Result<DeviceIdentity> {
        let address = self.address();
        let api_map = Arc::clone(&self.api_map);

        let identity = self
            .pool
            .run(move |client| fetch_identity(client, &address, &api_map))
            .await??;

        Self::commit_identity(&mut self.state.write(), identity.clone());

        info!(
            name = %identity.name,
            hardware_id = %identity.hardware_id,
            api_version = %identity.api_version,
            "device validated"
        );

        Ok(identity)
    }

    /// Poll volatile playback status and swap in a new snapshot
    ///
    /// Uses the API version negotiated by the last validation. Nothing is
    /// written unless the whole status was fetched and understood; if the
    /// returned future is dropped before completion, nothing is written.
    pub async fn refresh(&self) -> RefreshResult {
        let address = self.address();
        let version = self.api_version();

        let status = self
            .pool
            .run(move |client| {
                client.execute::<PlayerStatusOperation>(&address, version, &ActionRequest::info())
            })
            .await
            .map_err(RefreshFailure::from)?
            .map_err(RefreshFailure::from)?;

        self.commit_status(&status)
    }

    fn commit_status(&self, status: &PlayerStatus) -> std::result::Result<Arc<DeviceAttributes>, RefreshFailure> {
        let state = PlaybackState::from_device_state(status.require_state()?);

        let mut guard = self.state.write();
        let snapshot = Arc::new(guard.attributes.with_status(status, state));
        guard.attributes = Arc::clone(&snapshot);

        Ok(snapshot)
    }
}

/// Probe firmware at the baseline dialect, negotiate, then read identity
fn fetch_identity(
    client: &AirlinoClient,
    address: &DeviceAddress,
    api_map: &ApiVersionMap,
) -> airlino_api::Result<DeviceIdentity> {
    let probe = client.device_info_baseline(address)?;
    let api_version = api_map.negotiate_reported(probe.firmware.as_deref())?;

    debug!(
        %address,
        firmware = probe.firmware.as_deref().unwrap_or("<unreported>"),
        %api_version,
        "negotiated API version"
    );

    let device = client.execute::<DeviceInfoOperation>(address, api_version, &ActionRequest::info())?;
    let network = client.execute::<NetworkInfoOperation>(address, api_version, &ActionRequest::info())?;

    Ok(DeviceIdentity {
        name: device.require_name()?.to_string(),
        hardware_id: HardwareId::new(network.hardware_id()?),
        api_version,
    })
}

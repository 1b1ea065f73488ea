//! AirlinoSystem - Main entry point for the SDK

use std::net::IpAddr;
use std::sync::Arc;

use airlino_api::{AirlinoClient, DeviceAddress};
use airlino_poller::{PollingCoordinator, SyncStatus, UpdateCycle};
use airlino_state::{DeviceAttributes, DeviceIdentity, DeviceSession, HardwareId, WorkerPool};
use http_client::HttpClient;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::candidate::select_ipv4;
use crate::registry::SessionRegistry;
use crate::{Device, Result, SdkError, SyncConfig};

/// Owns every device session, the worker pool and the polling coordinator
///
/// # Example
///
/// ```rust,no_run
/// use airlino_sdk::{AirlinoSystem, SyncConfig};
///
/// # async fn demo() -> Result<(), airlino_sdk::SdkError> {
/// let config = SyncConfig::default().with_api_versions_json(r#"{"1.0.0": 10, "2.0.0": 11}"#)?;
/// let system = AirlinoSystem::new(config)?;
///
/// let device = system.add_device(system.address_for("192.168.1.40")).await?;
/// let mut updates = system.subscribe();
///
/// while let Ok(update) = updates.recv().await {
///     let attrs = device.attributes();
///     println!("cycle {}: {} is {:?}", update.cycle, attrs.name, attrs.state);
/// }
/// # Ok(())
/// # }
/// ```
pub struct AirlinoSystem {
    config: SyncConfig,
    pool: WorkerPool,
    registry: SessionRegistry,
    coordinator: PollingCoordinator,
}

impl AirlinoSystem {
    /// Create a system with no devices
    pub fn new(config: SyncConfig) -> Result<Self> {
        config.validate()?;

        let client = AirlinoClient::with_http_client(HttpClient::with_config(config.client_config()));
        let pool = WorkerPool::new(client, config.pool_width);
        let coordinator = PollingCoordinator::new(config.poller.clone())?;

        Ok(Self {
            config,
            pool,
            registry: SessionRegistry::new(),
            coordinator,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Address of `host` on the configured port and path template
    pub fn address_for(&self, host: impl Into<String>) -> DeviceAddress {
        self.config.address_for(host)
    }

    fn new_session(&self, address: DeviceAddress) -> DeviceSession {
        DeviceSession::new(address, Arc::clone(&self.config.api_versions), self.pool.clone())
    }

    /// Check whether `address` answers like a supported device
    pub async fn probe(&self, address: &DeviceAddress) -> Result<bool> {
        let target = address.clone();
        let supported = self.pool.run(move |client| client.probe(&target)).await??;
        debug!(%address, supported, "probed device");
        Ok(supported)
    }

    /// Validate a device without registering it
    ///
    /// Returns `Ok(None)` when the endpoint is not a usable airlino device.
    pub async fn validate(&self, address: DeviceAddress) -> Result<Option<DeviceIdentity>> {
        let session = self.new_session(address);
        if session.validate().await? {
            Ok(session.identity())
        } else {
            Ok(None)
        }
    }

    /// Validate, register and start polling the device at `address`
    ///
    /// A device already registered under the same hardware id keeps its
    /// session and snapshot, and takes over the newly validated name, API
    /// version and address. A device that cannot be polled is not left
    /// registered.
    pub async fn add_device(&self, address: DeviceAddress) -> Result<Device> {
        let session = self.new_session(address.clone());
        if !session.validate().await? {
            return Err(SdkError::ValidationFailed(address));
        }

        let identity = session
            .identity()
            .ok_or_else(|| SdkError::ValidationFailed(address.clone()))?;
        let hardware_id = identity.hardware_id.clone();

        let registration = self.registry.register(identity, address, Arc::new(session));
        let session = Arc::clone(registration.session());

        if let Err(e) = self.coordinator.start_polling(hardware_id.clone(), &session).await {
            if registration.is_new() {
                self.registry.remove(&hardware_id);
                warn!(%hardware_id, error = %e, "could not start polling, device not added");
            }
            return Err(e.into());
        }

        if !registration.is_new() {
            info!(%hardware_id, "known device re-added");
        }

        Ok(Device::new(hardware_id, session))
    }

    /// Add a device from discovery candidates, using the last IPv4 address
    /// listed
    pub async fn add_candidates<I>(&self, candidates: I) -> Result<Device>
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let candidates: Vec<IpAddr> = candidates.into_iter().collect();
        let ip = select_ipv4(candidates.iter().copied())
            .ok_or_else(|| SdkError::NoIpv4Candidate(candidates.clone()))?;

        self.add_device(self.config.address_for_ip(IpAddr::V4(ip))).await
    }

    /// Stop polling a device and drop its session
    ///
    /// Returns `false` if the device was not registered. A refresh in flight
    /// is discarded.
    pub async fn remove_device(&self, hardware_id: &HardwareId) -> Result<bool> {
        self.coordinator.stop_polling(hardware_id).await?;
        let removed = self.registry.remove(hardware_id).is_some();
        if removed {
            info!(%hardware_id, "removed device");
        }
        Ok(removed)
    }

    pub fn device(&self, hardware_id: &HardwareId) -> Option<Device> {
        self.registry
            .get(hardware_id)
            .map(|session| Device::new(hardware_id.clone(), session))
    }

    /// All registered devices, ordered by hardware id
    pub fn devices(&self) -> Vec<Device> {
        self.registry
            .hardware_ids()
            .into_iter()
            .filter_map(|id| self.device(&id))
            .collect()
    }

    /// Latest snapshot of a device (never touches the network)
    pub fn attributes(&self, hardware_id: &HardwareId) -> Option<Arc<DeviceAttributes>> {
        self.registry.get(hardware_id).map(|session| session.attributes())
    }

    /// Receive one notification per completed refresh cycle of any device
    pub fn subscribe(&self) -> broadcast::Receiver<UpdateCycle> {
        self.coordinator.subscribe()
    }

    /// Refresh a device now, coalesced with any refresh in flight
    pub async fn request_refresh(&self, hardware_id: &HardwareId) -> Result<()> {
        if !self.registry.contains(hardware_id) {
            return Err(SdkError::DeviceNotFound(hardware_id.clone()));
        }
        self.coordinator.request_refresh(hardware_id).await?;
        Ok(())
    }

    /// Freshness of a device's snapshot
    pub async fn sync_status(&self, hardware_id: &HardwareId) -> Option<SyncStatus> {
        self.coordinator.status(hardware_id).await
    }

    /// Get the polling coordinator for advanced usage
    pub fn coordinator(&self) -> &PollingCoordinator {
        &self.coordinator
    }

    /// Stop all polling and drop every session
    pub async fn shutdown(&self) -> Result<()> {
        self.coordinator.shutdown_all().await?;
        self.registry.clear();
        Ok(())
    }
}

//! Polling coordinator for airlino-sdk
//!
//! Keeps every registered [`DeviceSession`](airlino_state::DeviceSession)
//! fresh by refreshing it on a fixed interval, bounded by a per-refresh
//! timeout. A refresh that times out counts as a connection failure, and its
//! late result is never written. Subscribers get one [`UpdateCycle`] per
//! completed refresh, successful or not.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use airlino_api::{ApiVersionMap, DeviceAddress};
//! use airlino_poller::{PollerConfig, PollingCoordinator};
//! use airlino_state::{DeviceSession, HardwareId, WorkerPool};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = PollingCoordinator::new(PollerConfig::default())?;
//! let mut updates = coordinator.subscribe();
//!
//! let session = Arc::new(DeviceSession::new(
//!     DeviceAddress::new("192.168.1.40"),
//!     Arc::new(ApiVersionMap::default()),
//!     WorkerPool::default(),
//! ));
//! coordinator.start_polling(HardwareId::new("AA:BB"), &session).await?;
//!
//! while let Ok(update) = updates.recv().await {
//!     println!("{} cycle {}: success={}", update.hardware_id, update.cycle, update.outcome.is_success());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod target;
pub mod task;

pub use config::PollerConfig;
pub use coordinator::{CoordinatorStats, PollingCoordinator};
pub use error::{PollingError, PollingResult};
pub use target::PollTarget;
pub use task::{CycleOutcome, CycleState, PollingTask, SyncStatus, UpdateCycle};

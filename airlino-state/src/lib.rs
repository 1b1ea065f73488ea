//! Device sessions for airlino-sdk
//!
//! A [`DeviceSession`] owns everything the SDK knows about one device: where
//! it lives, which API dialect it speaks, and the last complete attribute
//! snapshot. Consumers read snapshots; only the session's own `validate()`
//! and `refresh()` write them.
//!
//! Network calls are blocking and run on a bounded [`WorkerPool`], so a slow
//! device never stalls the async scheduler.

pub mod error;
pub mod model;
pub mod session;
pub mod worker_pool;

pub use error::{FailureKind, RefreshFailure, Result, StateError};
pub use model::{DeviceAttributes, DeviceIdentity, HardwareId, PlaybackState};
pub use session::DeviceSession;
pub use worker_pool::{WorkerPool, DEFAULT_POOL_WIDTH};

use std::sync::Arc;

/// Outcome of one refresh: a fresh snapshot or a classified failure
pub type RefreshResult = std::result::Result<Arc<DeviceAttributes>, RefreshFailure>;

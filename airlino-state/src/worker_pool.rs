//! Bounded pool for blocking device requests
//!
//! `AirlinoClient` calls block on network I/O. Running them inline would stall
//! the async scheduler, so every request job is moved onto tokio's blocking
//! pool, gated by a semaphore so one unreachable device can tie up at most a
//! fixed number of threads.

use std::sync::Arc;

use airlino_api::AirlinoClient;
use tokio::sync::Semaphore;
use tracing::trace;

use crate::{Result, StateError};

/// Number of request jobs allowed to run at once by default
pub const DEFAULT_POOL_WIDTH: usize = 8;

#[derive(Debug, Clone)]
pub struct WorkerPool {
    client: AirlinoClient,
    permits: Arc<Semaphore>,
    width: usize,
}

impl WorkerPool {
    /// Pool of `width` concurrent jobs (at least one)
    pub fn new(client: AirlinoClient, width: usize) -> Self {
        let width = width.max(1);
        Self {
            client,
            permits: Arc::new(Semaphore::new(width)),
            width,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Jobs that could start right now without waiting
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run a blocking job against the shared client
    ///
    /// The permit travels with the job, so it stays taken until the job
    /// returns even if the awaiting future has been dropped. A dropped caller
    /// never sees the job's result.
    pub async fn run<T, F>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&AirlinoClient) -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| StateError::WorkerPool(e.to_string()))?;

        trace!(available = self.permits.available_permits(), "dispatching request job");

        let client = self.client.clone();
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job(&client)
        })
        .await
        .map_err(|e| StateError::WorkerPool(e.to_string()))
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(AirlinoClient::new(), DEFAULT_POOL_WIDTH)
    }
}

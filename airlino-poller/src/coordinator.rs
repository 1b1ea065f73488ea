//! Polling coordinator managing one task per session

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use airlino_state::HardwareId;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::config::PollerConfig;
use crate::target::PollTarget;
use crate::task::{PollingTask, SyncStatus, UpdateCycle};
use crate::{PollingError, PollingResult};

/// Schedules refreshes for every registered session
///
/// Each session gets its own task and timer, so a slow device only delays
/// itself. Completed cycles are broadcast to all subscribers.
pub struct PollingCoordinator {
    config: PollerConfig,

    /// Active polling tasks indexed by hardware id
    active_tasks: Arc<RwLock<HashMap<HardwareId, PollingTask>>>,

    notifier: broadcast::Sender<UpdateCycle>,
}

impl PollingCoordinator {
    pub fn new(config: PollerConfig) -> PollingResult<Self> {
        config.validate()?;
        let (notifier, _) = broadcast::channel(config.notification_buffer);

        Ok(Self {
            config,
            active_tasks: Arc::new(RwLock::new(HashMap::new())),
            notifier,
        })
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Receive one [`UpdateCycle`] per completed refresh of any session
    ///
    /// A subscriber that falls more than the notification buffer behind
    /// misses the oldest cycles; session snapshots are unaffected.
    pub fn subscribe(&self) -> broadcast::Receiver<UpdateCycle> {
        self.notifier.subscribe()
    }

    /// Start polling `target` under `hardware_id`
    ///
    /// Starting a session that is already polled is a no-op.
    pub async fn start_polling<T>(&self, hardware_id: HardwareId, target: &Arc<T>) -> PollingResult<()>
    where
        T: PollTarget + 'static,
    {
        let mut tasks = self.active_tasks.write().await;

        if tasks.contains_key(&hardware_id) {
            return Ok(());
        }

        if tasks.len() >= self.config.max_concurrent_sessions {
            return Err(PollingError::TooManySessions {
                limit: self.config.max_concurrent_sessions,
            });
        }

        let weak: Weak<T> = Arc::downgrade(target);
        let weak: Weak<dyn PollTarget> = weak;
        let task = PollingTask::start(hardware_id.clone(), weak, &self.config, self.notifier.clone());
        tasks.insert(hardware_id.clone(), task);

        info!(%hardware_id, target = %target.describe(), interval = ?self.config.interval, "started polling");
        Ok(())
    }

    /// Stop polling a session; returns whether it was being polled
    ///
    /// A refresh in flight is cancelled and its result never delivered.
    pub async fn stop_polling(&self, hardware_id: &HardwareId) -> PollingResult<bool> {
        let task = self.active_tasks.write().await.remove(hardware_id);

        match task {
            Some(task) => {
                task.shutdown().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn is_polling(&self, hardware_id: &HardwareId) -> bool {
        self.active_tasks.read().await.contains_key(hardware_id)
    }

    /// Trigger a refresh outside the timer, coalesced with any in flight
    pub async fn request_refresh(&self, hardware_id: &HardwareId) -> PollingResult<()> {
        let tasks = self.active_tasks.read().await;
        let task = tasks
            .get(hardware_id)
            .ok_or_else(|| PollingError::NotPolling(hardware_id.clone()))?;
        task.request_refresh();
        Ok(())
    }

    pub async fn status(&self, hardware_id: &HardwareId) -> Option<SyncStatus> {
        self.active_tasks
            .read()
            .await
            .get(hardware_id)
            .map(PollingTask::status)
    }

    pub async fn stats(&self) -> CoordinatorStats {
        let tasks = self.active_tasks.read().await;

        let mut sessions: Vec<SyncStatus> = tasks.values().map(PollingTask::status).collect();
        sessions.sort_by(|a, b| a.hardware_id.as_str().cmp(b.hardware_id.as_str()));

        CoordinatorStats {
            total_active_tasks: tasks.len(),
            max_concurrent_sessions: self.config.max_concurrent_sessions,
            interval: self.config.interval,
            refresh_timeout: self.config.refresh_timeout,
            subscribers: self.notifier.receiver_count(),
            sessions,
        }
    }

    /// Stop every polling task
    pub async fn shutdown_all(&self) -> PollingResult<()> {
        let mut tasks = self.active_tasks.write().await;

        for (hardware_id, task) in tasks.drain() {
            if let Err(e) = task.shutdown().await {
                warn!(%hardware_id, error = %e, "failed to shut down polling task");
            }
        }

        Ok(())
    }
}

/// Snapshot of the coordinator and all of its sessions
#[derive(Debug, Clone)]
pub struct CoordinatorStats {
    pub total_active_tasks: usize,
    pub max_concurrent_sessions: usize,
    pub interval: std::time::Duration,
    pub refresh_timeout: std::time::Duration,
    pub subscribers: usize,
    pub sessions: Vec<SyncStatus>,
}

impl fmt::Display for CoordinatorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Polling Coordinator Stats:")?;
        writeln!(
            f,
            "  Active sessions: {}/{}",
            self.total_active_tasks, self.max_concurrent_sessions
        )?;
        writeln!(f, "  Interval: {:?}", self.interval)?;
        writeln!(f, "  Refresh timeout: {:?}", self.refresh_timeout)?;
        writeln!(f, "  Subscribers: {}", self.subscribers)?;

        if !self.sessions.is_empty() {
            writeln!(f, "  Session details:")?;
            for status in &self.sessions {
                writeln!(
                    f,
                    "    {}: {:?} (polls: {}, consecutive failures: {})",
                    status.hardware_id, status.state, status.poll_count, status.consecutive_failures
                )?;
            }
        }

        Ok(())
    }
}

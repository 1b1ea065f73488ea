//! One polling task per session
//!
//! A task owns the timer of a single session and runs its refresh cycles
//! strictly one after another: `Idle → Refreshing → {Updated, Failed} → Idle`.
//! Ticks that come due while a refresh is outstanding are dropped, and any
//! number of on-demand requests made during a refresh collapse into a single
//! follow-up cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use airlino_state::{DeviceAttributes, FailureKind, HardwareId, RefreshFailure};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::{broadcast, Notify};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::PollerConfig;
use crate::target::PollTarget;
use crate::{PollingError, PollingResult};

/// Where a session is in its refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    #[default]
    Idle,
    Refreshing,
    Updated,
    Failed,
}

/// Result of one completed refresh cycle
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// The session holds this new snapshot
    Updated(Arc<DeviceAttributes>),
    /// The session kept its previous snapshot
    Failed(RefreshFailure),
}

impl CycleOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Updated(_))
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            CycleOutcome::Updated(_) => None,
            CycleOutcome::Failed(failure) => Some(failure.kind()),
        }
    }
}

/// Notification sent to subscribers once per completed cycle
#[derive(Debug, Clone)]
pub struct UpdateCycle {
    pub hardware_id: HardwareId,
    /// 1-based cycle number for this session
    pub cycle: u64,
    pub outcome: CycleOutcome,
    pub completed_at: DateTime<Utc>,
}

/// Freshness of one polled session
#[derive(Debug, Clone)]
pub struct SyncStatus {
    pub hardware_id: HardwareId,
    pub state: CycleState,
    pub poll_count: u64,
    pub consecutive_failures: u32,
    pub last_failure: Option<RefreshFailure>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub started_at: DateTime<Utc>,
    pub is_running: bool,
}

impl SyncStatus {
    /// Whether the most recent cycle left the session on an older snapshot
    pub fn is_failing(&self) -> bool {
        self.consecutive_failures > 0
    }
}

#[derive(Debug, Default)]
struct Counters {
    state: CycleState,
    poll_count: u64,
    consecutive_failures: u32,
    last_failure: Option<RefreshFailure>,
    last_success_at: Option<DateTime<Utc>>,
}

/// State shared between a task handle and its background loop
#[derive(Debug, Default)]
struct Shared {
    counters: Mutex<Counters>,
    wake: Notify,
    shutdown: AtomicBool,
}

impl Shared {
    fn set_state(&self, state: CycleState) {
        self.counters.lock().state = state;
    }

    /// Record a finished cycle and return its number
    fn record(&self, outcome: &CycleOutcome, at: DateTime<Utc>) -> (u64, u32) {
        let mut counters = self.counters.lock();
        counters.poll_count += 1;
        match outcome {
            CycleOutcome::Updated(_) => {
                counters.state = CycleState::Updated;
                counters.consecutive_failures = 0;
                counters.last_failure = None;
                counters.last_success_at = Some(at);
            }
            CycleOutcome::Failed(failure) => {
                counters.state = CycleState::Failed;
                counters.consecutive_failures += 1;
                counters.last_failure = Some(failure.clone());
            }
        }
        (counters.poll_count, counters.consecutive_failures)
    }
}

/// A running polling loop for one session
#[derive(Debug)]
pub struct PollingTask {
    hardware_id: HardwareId,
    target_label: String,
    task_handle: JoinHandle<()>,
    shared: Arc<Shared>,
    started_at: DateTime<Utc>,
}

impl PollingTask {
    /// Create and start a new polling task
    ///
    /// The task holds only a weak reference to its target and ends by itself
    /// once the target has been dropped.
    pub fn start(
        hardware_id: HardwareId,
        target: Weak<dyn PollTarget>,
        config: &PollerConfig,
        notifier: broadcast::Sender<UpdateCycle>,
    ) -> Self {
        let shared = Arc::new(Shared::default());
        let target_label = target
            .upgrade()
            .map(|target| target.describe())
            .unwrap_or_default();

        let task_shared = Arc::clone(&shared);
        let task_id = hardware_id.clone();
        let interval = config.interval;
        let refresh_timeout = config.refresh_timeout;
        let refresh_on_start = config.refresh_on_start;

        let task_handle = tokio::spawn(async move {
            Self::polling_loop(
                task_id,
                target,
                interval,
                refresh_timeout,
                refresh_on_start,
                notifier,
                task_shared,
            )
            .await;
        });

        Self {
            hardware_id,
            target_label,
            task_handle,
            shared,
            started_at: Utc::now(),
        }
    }

    async fn polling_loop(
        hardware_id: HardwareId,
        target: Weak<dyn PollTarget>,
        interval: Duration,
        refresh_timeout: Duration,
        refresh_on_start: bool,
        notifier: broadcast::Sender<UpdateCycle>,
        shared: Arc<Shared>,
    ) {
        debug!(%hardware_id, ?interval, ?refresh_timeout, "polling task started");

        let first_tick = if refresh_on_start {
            Instant::now()
        } else {
            Instant::now() + interval
        };
        let mut ticker = tokio::time::interval_at(first_tick, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = shared.wake.notified() => {
                    debug!(%hardware_id, "on-demand refresh");
                }
            }

            if shared.shutdown.load(Ordering::Acquire) {
                break;
            }

            let Some(session) = target.upgrade() else {
                debug!(%hardware_id, "session dropped, ending polling task");
                break;
            };

            shared.set_state(CycleState::Refreshing);

            let outcome = match tokio::time::timeout(refresh_timeout, session.refresh()).await {
                Ok(Ok(snapshot)) => CycleOutcome::Updated(snapshot),
                Ok(Err(failure)) => CycleOutcome::Failed(failure),
                Err(_) => CycleOutcome::Failed(RefreshFailure::Timeout(refresh_timeout)),
            };
            drop(session);

            // A stop issued mid-refresh discards the result unreported
            if shared.shutdown.load(Ordering::Acquire) {
                break;
            }

            let completed_at = Utc::now();
            let (cycle, failures) = shared.record(&outcome, completed_at);

            match &outcome {
                CycleOutcome::Updated(_) => {
                    debug!(%hardware_id, cycle, "refresh succeeded");
                }
                CycleOutcome::Failed(failure) => {
                    warn!(
                        %hardware_id,
                        cycle,
                        consecutive_failures = failures,
                        error = %failure,
                        "refresh failed, keeping last snapshot"
                    );
                }
            }

            // No subscribers is fine; the snapshot is still readable
            let _ = notifier.send(UpdateCycle {
                hardware_id: hardware_id.clone(),
                cycle,
                outcome,
                completed_at,
            });

            // Ticks that came due during the refresh are dropped, not queued
            ticker.reset();
            shared.set_state(CycleState::Idle);
        }

        shared.set_state(CycleState::Idle);
        debug!(%hardware_id, "polling task ended");
    }

    pub fn hardware_id(&self) -> &HardwareId {
        &self.hardware_id
    }

    pub fn is_running(&self) -> bool {
        !self.task_handle.is_finished()
    }

    /// Ask for a refresh outside the timer
    ///
    /// Requests made while a refresh is outstanding coalesce into one
    /// follow-up cycle.
    pub fn request_refresh(&self) {
        self.shared.wake.notify_one();
    }

    pub fn status(&self) -> SyncStatus {
        let counters = self.shared.counters.lock();
        SyncStatus {
            hardware_id: self.hardware_id.clone(),
            state: counters.state,
            poll_count: counters.poll_count,
            consecutive_failures: counters.consecutive_failures,
            last_failure: counters.last_failure.clone(),
            last_success_at: counters.last_success_at,
            started_at: self.started_at,
            is_running: self.is_running(),
        }
    }

    /// Stop the task, cancelling its timer and any refresh in flight
    pub async fn shutdown(self) -> PollingResult<()> {
        self.shared.shutdown.store(true, Ordering::Release);
        self.task_handle.abort();

        match self.task_handle.await {
            Ok(()) => {}
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                return Err(PollingError::Task(format!(
                    "Failed to await task completion: {}",
                    e
                )))
            }
        }

        info!(hardware_id = %self.hardware_id, target = %self.target_label, "polling stopped");
        Ok(())
    }
}

//! Things the coordinator knows how to refresh

use async_trait::async_trait;
use airlino_state::{DeviceSession, RefreshResult};

/// A refreshable source of device attributes
///
/// Implementations must commit nothing if the returned future is dropped
/// before it completes; the coordinator relies on this to discard refreshes
/// that outlive their timeout.
#[async_trait]
pub trait PollTarget: Send + Sync {
    async fn refresh(&self) -> RefreshResult;

    /// Short human-readable label for logs
    fn describe(&self) -> String;
}

#[async_trait]
impl PollTarget for DeviceSession {
    async fn refresh(&self) -> RefreshResult {
        DeviceSession::refresh(self).await
    }

    fn describe(&self) -> String {
        self.address().to_string()
    }
}

//! Configuration for an [`AirlinoSystem`](crate::AirlinoSystem)

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use airlino_api::{ApiVersionMap, DeviceAddress, DEFAULT_PATH_TEMPLATE, DEFAULT_PORT};
use airlino_poller::PollerConfig;
use airlino_state::DEFAULT_POOL_WIDTH;
use http_client::ClientConfig;
use serde::Deserialize;
use tracing::warn;

use crate::{Result, SdkError};

/// Everything the system needs to reach, negotiate with and poll devices
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Port devices listen on
    /// Default: 8989
    pub port: u16,

    /// Request path template with `{version}` and `{endpoint}` placeholders
    /// Default: "/api/v{version}/{endpoint}"
    pub path_template: String,

    /// Firmware breakpoint table used for negotiation
    /// Default: empty (every device speaks the fallback dialect)
    pub api_versions: Arc<ApiVersionMap>,

    /// Refresh scheduling
    pub poller: PollerConfig,

    /// Maximum number of device requests in flight at once
    /// Default: 8
    pub pool_width: usize,

    /// Transport timeouts
    pub client: ClientConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            path_template: DEFAULT_PATH_TEMPLATE.to_string(),
            api_versions: Arc::new(ApiVersionMap::default()),
            poller: PollerConfig::default(),
            pool_width: DEFAULT_POOL_WIDTH,
            client: ClientConfig::default(),
        }
    }
}

/// On-disk form of [`SyncConfig`]; every field is optional
///
/// ```json
/// {
///   "port": 8989,
///   "api_versions": {"1.0.0": 10, "2.0.0": 11},
///   "interval_secs": 60,
///   "refresh_timeout_secs": 10
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SyncSettings {
    port: Option<u16>,
    path_template: Option<String>,
    api_versions: Option<ApiVersionMap>,
    interval_secs: Option<u64>,
    refresh_timeout_secs: Option<u64>,
    max_concurrent_sessions: Option<usize>,
    pool_width: Option<usize>,
    connect_timeout_secs: Option<u64>,
    read_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from JSON, filling anything missing with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: SyncSettings =
            serde_json::from_str(json).map_err(|e| SdkError::Configuration(e.to_string()))?;

        let mut config = Self::default();
        if let Some(port) = settings.port {
            config.port = port;
        }
        if let Some(template) = settings.path_template {
            config.path_template = template;
        }
        if let Some(map) = settings.api_versions {
            config.api_versions = Arc::new(map);
        }
        if let Some(secs) = settings.interval_secs {
            config.poller.interval = Duration::from_secs(secs);
        }
        if let Some(secs) = settings.refresh_timeout_secs {
            config.poller.refresh_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = settings.max_concurrent_sessions {
            config.poller.max_concurrent_sessions = max;
        }
        if let Some(width) = settings.pool_width {
            config.pool_width = width;
        }
        if let Some(secs) = settings.connect_timeout_secs {
            config.client.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = settings.read_timeout_secs {
            config.client.read_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = settings.request_timeout_secs {
            config.client.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_path_template(mut self, template: impl Into<String>) -> Self {
        self.path_template = template.into();
        self
    }

    pub fn with_api_versions(mut self, map: ApiVersionMap) -> Self {
        self.api_versions = Arc::new(map);
        self
    }

    /// Load the breakpoint table from JSON such as `{"1.0.0": 10, "2.0.0": 11}`
    pub fn with_api_versions_json(self, json: &str) -> Result<Self> {
        Ok(self.with_api_versions(ApiVersionMap::from_json_str(json)?))
    }

    pub fn with_poller(mut self, poller: PollerConfig) -> Self {
        self.poller = poller;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.poller.interval = interval;
        self
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.poller.refresh_timeout = timeout;
        self
    }

    pub fn with_pool_width(mut self, width: usize) -> Self {
        self.pool_width = width;
        self
    }

    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }

    /// Transport settings the worker pool is built with
    ///
    /// The total request timeout is capped at the refresh timeout, so a pool
    /// slot is released no later than the refresh that claimed it gives up.
    pub fn client_config(&self) -> ClientConfig {
        let mut client = self.client;
        client.request_timeout = client.request_timeout.min(self.poller.refresh_timeout);
        client
    }

    /// Address of `host` on the configured port and path template
    pub fn address_for(&self, host: impl Into<String>) -> DeviceAddress {
        DeviceAddress::new(host)
            .with_port(self.port)
            .with_path_template(self.path_template.clone())
    }

    pub fn address_for_ip(&self, ip: IpAddr) -> DeviceAddress {
        self.address_for(ip.to_string())
    }

    /// Validate the configuration and return the first issue found
    ///
    /// A breakpoint table whose API versions decrease is accepted as
    /// authored, with a warning.
    pub fn validate(&self) -> Result<()> {
        self.poller.validate()?;

        if self.pool_width == 0 {
            return Err(SdkError::Configuration(
                "Pool width must be greater than 0".to_string(),
            ));
        }

        if !self.path_template.contains("{endpoint}") {
            return Err(SdkError::Configuration(format!(
                "Path template '{}' has no {{endpoint}} placeholder",
                self.path_template
            )));
        }

        if self.poller.refresh_timeout >= self.poller.interval {
            warn!(
                timeout = ?self.poller.refresh_timeout,
                interval = ?self.poller.interval,
                "refresh timeout is not shorter than the polling interval"
            );
        }

        if !self.api_versions.is_monotonic() {
            warn!(
                entries = self.api_versions.len(),
                "API version table decreases for newer firmware; using it as authored"
            );
        }

        Ok(())
    }
}

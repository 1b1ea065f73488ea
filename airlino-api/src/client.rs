use http_client::HttpClient;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::operation::ActionRequest;
use crate::operations::{DeviceInfo, DeviceInfoOperation};
use crate::{AirlinoOperation, ApiVersion, DeviceAddress, Result};

/// A client for executing airlino operations against devices
///
/// The client is stateless: each call builds its own URL and request, so a
/// single instance can be cloned into any number of concurrent refreshes.
/// Calls block on network I/O; async callers dispatch them to a worker pool.
#[derive(Debug, Clone, Default)]
pub struct AirlinoClient {
    http_client: HttpClient,
}

impl AirlinoClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client with a custom HTTP client (for custom timeouts)
    pub fn with_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Post `payload` to `endpoint` on the device at `version`
    ///
    /// No retries are attempted. Every transport fault is reported as
    /// `ApiError::ConnectionFailure`; a body that is not JSON is reported as
    /// `ApiError::ParseError`.
    pub fn send<B: Serialize + ?Sized>(
        &self,
        address: &DeviceAddress,
        version: ApiVersion,
        endpoint: &str,
        payload: &B,
    ) -> Result<Value> {
        let url = address.url(version, endpoint);
        debug!(%address, %version, endpoint, "sending request");
        Ok(self.http_client.post_json(&url, payload)?)
    }

    /// Execute a typed operation against a device
    pub fn execute<Op: AirlinoOperation>(
        &self,
        address: &DeviceAddress,
        version: ApiVersion,
        request: &Op::Request,
    ) -> Result<Op::Response> {
        let json = self.send(address, version, Op::ENDPOINT, request)?;
        Op::parse_response(&json)
    }

    /// Ask the device for its identity block at the baseline API version
    ///
    /// Works against every firmware, which is what makes it usable both as a
    /// firmware probe and as a cheap "is this an airlino device" check.
    pub fn device_info_baseline(&self, address: &DeviceAddress) -> Result<DeviceInfo> {
        self.execute::<DeviceInfoOperation>(address, ApiVersion::BASELINE, &ActionRequest::info())
    }

    /// Check whether `address` answers like a supported device
    ///
    /// Returns `Ok(false)` when the identity block lacks a name or a model.
    pub fn probe(&self, address: &DeviceAddress) -> Result<bool> {
        Ok(self.device_info_baseline(address)?.is_supported_device())
    }
}

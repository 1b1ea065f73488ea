//! `device.action` / `info`: name, model and firmware of a device

use serde::Deserialize;
use serde_json::Value;

use crate::operation::{decode, ActionRequest};
use crate::{AirlinoOperation, ApiError};

pub struct DeviceInfoOperation;

/// Identity block returned by `device.action`
///
/// Every field is optional on the wire; callers decide which ones they need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeviceInfo {
    pub devicename: Option<String>,
    pub model: Option<String>,
    pub firmware: Option<String>,
}

impl DeviceInfo {
    /// The device name, or `IncompleteResponse` when it was not reported
    pub fn require_name(&self) -> Result<&str, ApiError> {
        self.devicename
            .as_deref()
            .ok_or(ApiError::IncompleteResponse {
                endpoint: DeviceInfoOperation::ENDPOINT,
                field: "devicename",
            })
    }

    /// Whether the answer looks like it came from a supported device
    pub fn is_supported_device(&self) -> bool {
        self.devicename.is_some() && self.model.is_some()
    }
}

impl AirlinoOperation for DeviceInfoOperation {
    type Request = ActionRequest;
    type Response = DeviceInfo;

    const ENDPOINT: &'static str = "device.action";

    fn parse_response(json: &Value) -> Result<Self::Response, ApiError> {
        decode(Self::ENDPOINT, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_response() {
        let info = DeviceInfoOperation::parse_response(&json!({
            "devicename": "Lounge",
            "model": "airlino Pro",
            "firmware": "2.1.4",
            "uptime": 1234
        }))
        .unwrap();

        assert_eq!(info.require_name().unwrap(), "Lounge");
        assert_eq!(info.firmware.as_deref(), Some("2.1.4"));
        assert!(info.is_supported_device());
    }

    #[test]
    fn test_missing_name_is_incomplete() {
        let info = DeviceInfoOperation::parse_response(&json!({"firmware": "1.0.0"})).unwrap();
        assert!(!info.is_supported_device());
        assert!(matches!(
            info.require_name(),
            Err(ApiError::IncompleteResponse { field: "devicename", .. })
        ));
    }

    #[test]
    fn test_wrong_field_type_is_parse_error() {
        let result = DeviceInfoOperation::parse_response(&json!({"devicename": 42}));
        assert!(matches!(result, Err(ApiError::ParseError(_))));
    }
}

//! `network.action` / `info`: wireless and wired interface details

use serde::Deserialize;
use serde_json::Value;

use crate::operation::{decode, ActionRequest};
use crate::{AirlinoOperation, ApiError};

pub struct NetworkInfoOperation;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InterfaceInfo {
    pub mac: Option<String>,
    pub ip: Option<String>,
}

/// Network block returned by `network.action`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NetworkInfo {
    pub wlan: Option<InterfaceInfo>,
    pub eth: Option<InterfaceInfo>,
}

impl NetworkInfo {
    /// Hardware id of the device: the wireless MAC, else the wired MAC
    ///
    /// Wireless is checked first, so a device reporting both interfaces is
    /// always identified by its wireless MAC.
    pub fn hardware_id(&self) -> Result<&str, ApiError> {
        fn mac(iface: &Option<InterfaceInfo>) -> Option<&str> {
            iface.as_ref().and_then(|i| i.mac.as_deref())
        }

        mac(&self.wlan)
            .or_else(|| mac(&self.eth))
            .ok_or(ApiError::IncompleteResponse {
                endpoint: NetworkInfoOperation::ENDPOINT,
                field: "wlan.mac|eth.mac",
            })
    }
}

impl AirlinoOperation for NetworkInfoOperation {
    type Request = ActionRequest;
    type Response = NetworkInfo;

    const ENDPOINT: &'static str = "network.action";

    fn parse_response(json: &Value) -> Result<Self::Response, ApiError> {
        decode(Self::ENDPOINT, json)
    }
}

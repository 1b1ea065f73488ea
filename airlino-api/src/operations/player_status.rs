//! `player.action` / `info`: volatile playback status

use serde::Deserialize;
use serde_json::Value;

use crate::operation::{decode, ActionRequest};
use crate::{AirlinoOperation, ApiError};

pub struct PlayerStatusOperation;

/// Playback status returned by `player.action`
///
/// `state` is mandatory; every other field falls back to an empty/off value
/// when the device leaves it out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerStatus {
    pub state: Option<String>,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub power: bool,
    pub title: Option<String>,
    pub artwork: Option<String>,
    #[serde(default)]
    pub group: Vec<String>,
}

impl PlayerStatus {
    pub fn require_state(&self) -> Result<&str, ApiError> {
        self.state.as_deref().ok_or(ApiError::IncompleteResponse {
            endpoint: PlayerStatusOperation::ENDPOINT,
            field: "state",
        })
    }
}

impl AirlinoOperation for PlayerStatusOperation {
    type Request = ActionRequest;
    type Response = PlayerStatus;

    const ENDPOINT: &'static str = "player.action";

    fn parse_response(json: &Value) -> Result<Self::Response, ApiError> {
        decode(Self::ENDPOINT, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_status() {
        let status = PlayerStatusOperation::parse_response(&json!({
            "state": "playing",
            "mute": true,
            "power": true,
            "title": "Morning Radio",
            "artwork": "http://10.0.0.3/art.jpg",
            "group": ["AA:BB", "CC:DD"]
        }))
        .unwrap();

        assert_eq!(status.require_state().unwrap(), "playing");
        assert!(status.mute);
        assert_eq!(status.group.len(), 2);
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let status = PlayerStatusOperation::parse_response(&json!({"state": "idle"})).unwrap();
        assert!(!status.mute);
        assert!(!status.power);
        assert!(status.title.is_none());
        assert!(status.group.is_empty());
    }

    #[test]
    fn test_missing_state_is_incomplete() {
        let status = PlayerStatusOperation::parse_response(&json!({"mute": false})).unwrap();
        assert!(matches!(
            status.require_state(),
            Err(ApiError::IncompleteResponse { field: "state", .. })
        ));
    }
}

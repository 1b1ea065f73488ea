//! Playback state enumeration

use serde::{Deserialize, Serialize};

/// Current playback state of a receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Powered and ready, nothing playing
    #[default]
    Idle,
    Playing,
    Paused,
    /// Low-power standby, wakes on command
    Standby,
    Off,
}

impl PlaybackState {
    /// Parse from the `state` string reported by `player.action`
    ///
    /// Unknown values map to `Idle`.
    pub fn from_device_state(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "playing" | "play" => PlaybackState::Playing,
            "paused" | "pause" => PlaybackState::Paused,
            "standby" => PlaybackState::Standby,
            "off" => PlaybackState::Off,
            _ => PlaybackState::Idle,
        }
    }
}

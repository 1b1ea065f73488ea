//! Hardware identity type

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a physical device: its MAC address
///
/// Normalized to upper case so `aa:bb` and `AA:BB` compare equal. The
/// address of a device may change; its hardware id does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HardwareId(String);

impl HardwareId {
    pub fn new(mac: impl AsRef<str>) -> Self {
        Self(mac.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HardwareId {
    fn from(s: &str) -> Self {
        HardwareId::new(s)
    }
}

impl From<String> for HardwareId {
    fn from(s: String) -> Self {
        HardwareId::new(s)
    }
}

//! Firmware version parsing and ordering

use std::fmt;
use std::str::FromStr;

use crate::{ApiError, Result};

/// A `major.minor.patch` firmware version
///
/// Ordering compares major, then minor, then patch, so `1.10.0` sorts after
/// `1.9.9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FirmwareVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FirmwareVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Parse a dot-delimited version string
    ///
    /// # Errors
    /// Returns `ApiError::ParseError` unless the input is exactly three
    /// dot-separated unsigned decimal components.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split('.').collect();

        if parts.len() != 3 {
            return Err(ApiError::ParseError(format!(
                "Invalid firmware version '{}': expected major.minor.patch",
                input
            )));
        }

        let component = |name: &str, raw: &str| -> Result<u32> {
            if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ApiError::ParseError(format!(
                    "Invalid {} component '{}' in firmware version '{}'",
                    name, raw, input
                )));
            }
            raw.parse::<u32>().map_err(|e| {
                ApiError::ParseError(format!(
                    "Invalid {} component '{}' in firmware version '{}': {}",
                    name, raw, input, e
                ))
            })
        };

        Ok(Self {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }
}

impl FromStr for FirmwareVersion {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

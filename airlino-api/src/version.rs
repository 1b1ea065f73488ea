//! API dialect negotiation
//!
//! Devices report their firmware as `major.minor.patch`; the API dialect they
//! speak is looked up in an operator-supplied breakpoint table mapping the
//! minimum firmware for each dialect to its version tag.
//!
//! ```rust
//! use airlino_api::{ApiVersion, ApiVersionMap};
//!
//! let map = ApiVersionMap::from_pairs(&[("1.0.0", 10), ("2.0.0", 11), ("3.0.0", 12)])?;
//! assert_eq!(map.negotiate("1.5.0")?, ApiVersion::new(10));
//! assert_eq!(map.negotiate("0.5.0")?, ApiVersion::new(10));
//! assert_eq!(map.negotiate("3.2.1")?, ApiVersion::new(12));
//! # Ok::<(), airlino_api::ApiError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::firmware::FirmwareVersion;
use crate::{ApiError, Result};

/// Integer tag of an API dialect, rendered as `v{n}` in request paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiVersion(u32);

impl ApiVersion {
    /// Dialect assumed when negotiation has nothing to go on
    pub const FALLBACK: ApiVersion = ApiVersion(10);

    /// Dialect every device understands; used to read the firmware itself
    pub const BASELINE: ApiVersion = ApiVersion(10);

    pub const fn new(version: u32) -> Self {
        Self(version)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered firmware-breakpoint → API-version table
///
/// Entries are kept sorted ascending by firmware version with unique keys.
/// Nothing checks that API versions grow with firmware; a table authored with
/// a decreasing value will hand newer firmware the older dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>")]
pub struct ApiVersionMap {
    entries: Vec<(FirmwareVersion, ApiVersion)>,
}

impl ApiVersionMap {
    /// Build a table from breakpoints in any order
    ///
    /// # Errors
    /// Returns `ApiError::InvalidConfig` when two entries share a minimum
    /// firmware version.
    pub fn new(entries: impl IntoIterator<Item = (FirmwareVersion, ApiVersion)>) -> Result<Self> {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by_key(|(firmware, _)| *firmware);

        if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(ApiError::InvalidConfig(format!(
                "duplicate firmware breakpoint {}",
                pair[0].0
            )));
        }

        Ok(Self { entries })
    }

    /// Build a table from `("major.minor.patch", api_version)` pairs
    pub fn from_pairs(pairs: &[(&str, u32)]) -> Result<Self> {
        let entries = pairs
            .iter()
            .map(|(firmware, api)| {
                FirmwareVersion::parse(firmware)
                    .map(|fw| (fw, ApiVersion::new(*api)))
                    .map_err(|e| ApiError::InvalidConfig(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }

    /// Load a table from a JSON object such as `{"1.0.0": 10, "2.0.0": 11}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ApiError::InvalidConfig(e.to_string()))
    }

    pub fn entries(&self) -> &[(FirmwareVersion, ApiVersion)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether API versions never decrease as firmware increases
    pub fn is_monotonic(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].1 <= pair[1].1)
    }

    /// Look up the dialect for a parsed firmware version
    ///
    /// Below the first breakpoint the first dialect applies; at or above the
    /// last breakpoint the last dialect applies; in between, the rightmost
    /// breakpoint not greater than `firmware` wins.
    pub fn resolve(&self, firmware: &FirmwareVersion) -> ApiVersion {
        let (first, last) = match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return ApiVersion::FALLBACK,
        };

        if *firmware < first.0 {
            return first.1;
        }
        if *firmware >= last.0 {
            return last.1;
        }

        // first.0 <= firmware < last.0, so 1 <= idx < len
        let idx = self.entries.partition_point(|(breakpoint, _)| breakpoint <= firmware);
        self.entries[idx - 1].1
    }

    /// Parse `firmware` and look up its dialect
    ///
    /// # Errors
    /// Returns `ApiError::ParseError` for a malformed firmware string.
    pub fn negotiate(&self, firmware: &str) -> Result<ApiVersion> {
        let parsed = FirmwareVersion::parse(firmware)?;
        Ok(self.resolve(&parsed))
    }

    /// Negotiate from an optional firmware field of a device response
    ///
    /// A device that does not report firmware gets [`ApiVersion::FALLBACK`].
    pub fn negotiate_reported(&self, firmware: Option<&str>) -> Result<ApiVersion> {
        match firmware {
            Some(firmware) => self.negotiate(firmware),
            None => Ok(ApiVersion::FALLBACK),
        }
    }
}

impl TryFrom<BTreeMap<String, u32>> for ApiVersionMap {
    type Error = ApiError;

    fn try_from(raw: BTreeMap<String, u32>) -> Result<Self> {
        let entries = raw
            .into_iter()
            .map(|(firmware, api)| {
                FirmwareVersion::parse(&firmware)
                    .map(|fw| (fw, ApiVersion::new(api)))
                    .map_err(|e| ApiError::InvalidConfig(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }
}

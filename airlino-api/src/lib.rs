//! Typed airlino device API
//!
//! airlino receivers expose a small HTTP/JSON control surface:
//! `POST /api/v{version}/{endpoint}` with a body such as `{"action": "info"}`.
//! This crate provides the pieces needed to talk to it:
//!
//! - [`DeviceAddress`] builds request URLs from a path template
//! - [`AirlinoClient`] sends requests and executes typed operations
//! - [`ApiVersionMap`] negotiates the API dialect from reported firmware
//! - [`operations`] holds the informational endpoints
//!
//! ```rust,no_run
//! use airlino_api::{AirlinoClient, ApiVersionMap, DeviceAddress};
//!
//! let client = AirlinoClient::new();
//! let address = DeviceAddress::new("192.168.1.40");
//! let map = ApiVersionMap::from_pairs(&[("1.0.0", 10), ("2.0.0", 11)])?;
//!
//! let info = client.device_info_baseline(&address)?;
//! let version = map.negotiate_reported(info.firmware.as_deref())?;
//! println!("{} speaks v{}", info.require_name()?, version);
//! # Ok::<(), airlino_api::ApiError>(())
//! ```

pub mod address;
pub mod client;
pub mod error;
pub mod firmware;
pub mod operation;
pub mod operations;
pub mod version;

pub use address::{DeviceAddress, DEFAULT_PATH_TEMPLATE, DEFAULT_PORT};
pub use client::AirlinoClient;
pub use error::{ApiError, Result};
pub use firmware::FirmwareVersion;
pub use operation::{ActionRequest, AirlinoOperation};
pub use version::{ApiVersion, ApiVersionMap};

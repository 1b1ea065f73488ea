use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Base trait for all airlino API operations
///
/// Each operation names the endpoint it is posted to and knows how to turn
/// the device's JSON answer into a typed response.
pub trait AirlinoOperation {
    /// The request body for this operation
    type Request: Serialize;

    /// The typed response for this operation
    type Response;

    /// Endpoint name substituted into the address path template
    const ENDPOINT: &'static str;

    /// Parse the JSON document returned by the device
    fn parse_response(json: &Value) -> Result<Self::Response, ApiError>;
}

/// The `{"action": "..."}` body shared by the `*.action` endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
}

impl ActionRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }

    /// The `info` action every informational endpoint answers
    pub fn info() -> Self {
        Self::new("info")
    }
}

/// Deserialize a response document, mapping type mismatches to `ParseError`
pub(crate) fn decode<T: for<'de> Deserialize<'de>>(endpoint: &str, json: &Value) -> Result<T, ApiError> {
    if !json.is_object() {
        return Err(ApiError::ParseError(format!(
            "{} returned a non-object JSON document",
            endpoint
        )));
    }
    T::deserialize(json).map_err(|e| ApiError::ParseError(format!("{}: {}", endpoint, e)))
}

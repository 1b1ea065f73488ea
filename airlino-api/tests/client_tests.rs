//! HTTP-level tests for `AirlinoClient` against a mocked device

use airlino_api::operations::{DeviceInfoOperation, NetworkInfoOperation};
use airlino_api::{ActionRequest, AirlinoClient, ApiError, ApiVersion, DeviceAddress};
use mockito::{Matcher, Server};
use serde_json::json;

fn address_of(server: &Server) -> DeviceAddress {
    DeviceAddress::parse(&server.host_with_port()).expect("mock server address")
}

#[test]
fn test_send_substitutes_version_and_endpoint() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/v12/network.action")
        .match_header("content-type", "application/json; charset=UTF-8")
        .match_body(Matcher::Json(json!({"action": "info"})))
        .with_body(r#"{"wlan":{"mac":"AA:BB"}}"#)
        .create();

    let client = AirlinoClient::new();
    let value = client
        .send(&address_of(&server), ApiVersion::new(12), "network.action", &ActionRequest::info())
        .unwrap();

    assert_eq!(value["wlan"]["mac"], "AA:BB");
    mock.assert();
}

#[test]
fn test_execute_typed_operation() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/v11/device.action")
        .with_body(r#"{"devicename":"Lounge","model":"airlino","firmware":"2.0.3"}"#)
        .create();

    let client = AirlinoClient::new();
    let info = client
        .execute::<DeviceInfoOperation>(&address_of(&server), ApiVersion::new(11), &ActionRequest::info())
        .unwrap();

    assert_eq!(info.require_name().unwrap(), "Lounge");
    assert_eq!(info.firmware.as_deref(), Some("2.0.3"));
}

#[test]
fn test_server_error_is_connection_failure() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/v10/network.action")
        .with_status(502)
        .create();

    let client = AirlinoClient::new();
    let result = client.execute::<NetworkInfoOperation>(
        &address_of(&server),
        ApiVersion::new(10),
        &ActionRequest::info(),
    );

    assert!(matches!(result, Err(ApiError::ConnectionFailure(_))));
}

#[test]
fn test_malformed_body_is_parse_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/v10/device.action")
        .with_body("{devicename: Lounge")
        .create();

    let client = AirlinoClient::new();
    let result = client.device_info_baseline(&address_of(&server));

    assert!(matches!(result, Err(ApiError::ParseError(_))));
}

#[test]
fn test_probe_requires_name_and_model() {
    let mut server = Server::new();
    let _full = server
        .mock("POST", "/api/v10/device.action")
        .with_body(r#"{"devicename":"Lounge","model":"airlino"}"#)
        .expect(1)
        .create();

    let client = AirlinoClient::new();
    assert!(client.probe(&address_of(&server)).unwrap());

    let mut other = Server::new();
    let _partial = other
        .mock("POST", "/api/v10/device.action")
        .with_body(r#"{"devicename":"Printer"}"#)
        .create();

    assert!(!client.probe(&address_of(&other)).unwrap());
}

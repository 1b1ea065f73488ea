//! Private JSON-over-HTTP client for airlino device communication
//!
//! This crate provides the single primitive the rest of the SDK builds on:
//! one `POST` with a JSON body, answered by a JSON document. It performs no
//! retries and keeps no state between calls, so one client can be shared by
//! any number of concurrent callers.

mod error;

pub use error::HttpError;

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

/// Content type sent with every request
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Timeouts applied by the underlying agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Time allowed to establish the TCP connection
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Time allowed for any single read from the socket
    /// Default: 10 seconds
    pub read_timeout: Duration,

    /// Time allowed for the whole request, from connect to the last body byte
    ///
    /// Bounds a device that keeps trickling bytes, which `read_timeout`
    /// alone never catches.
    /// Default: 10 seconds
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// A minimal JSON client for device endpoints
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    /// Create a new client with default timeouts
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom timeouts
    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(config.connect_timeout)
                .timeout_read(config.read_timeout)
                .timeout(config.request_timeout)
                .build(),
        }
    }

    /// Send `body` as JSON to `url` and return the decoded JSON response
    ///
    /// # Errors
    /// * [`HttpError::Network`] when the request cannot be delivered or the
    ///   response stream cannot be read
    /// * [`HttpError::Status`] when the device answers with 4xx/5xx
    /// * [`HttpError::Parse`] when the body is not a JSON document
    pub fn post_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value, HttpError> {
        let payload =
            serde_json::to_string(body).map_err(|e| HttpError::Parse(e.to_string()))?;

        trace!(url, payload = %payload, "POST");

        let response = self
            .agent
            .post(url)
            .set("Content-Type", JSON_CONTENT_TYPE)
            .send_string(&payload)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => HttpError::Status(code),
                ureq::Error::Transport(t) => HttpError::Network(t.to_string()),
            })?;

        let text = response
            .into_string()
            .map_err(|e| HttpError::Network(e.to_string()))?;

        decode_body(&text)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_body(text: &str) -> Result<Value, HttpError> {
    serde_json::from_str(text).map_err(|e| HttpError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let _client = HttpClient::new();
        let _default_client = HttpClient::default();
        let _custom = HttpClient::with_config(
            ClientConfig::default().with_connect_timeout(Duration::from_millis(250)),
        );
    }

    #[test]
    fn test_decode_body_rejects_non_json() {
        match decode_body("<html>nope</html>") {
            Err(HttpError::Parse(_)) => {}
            other => panic!("Expected HttpError::Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_post_json_sends_body_and_content_type() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/v10/device.action")
            .match_header("content-type", JSON_CONTENT_TYPE)
            .match_body(Matcher::Json(json!({"action": "info"})))
            .with_status(200)
            .with_body(r#"{"devicename":"Kitchen"}"#)
            .create();

        let client = HttpClient::new();
        let url = format!("{}/api/v10/device.action", server.url());
        let value = client.post_json(&url, &json!({"action": "info"})).unwrap();

        assert_eq!(value["devicename"], "Kitchen");
        mock.assert();
    }

    #[test]
    fn test_post_json_maps_error_status() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/api/v10/device.action")
            .with_status(500)
            .create();

        let client = HttpClient::new();
        let url = format!("{}/api/v10/device.action", server.url());

        match client.post_json(&url, &json!({"action": "info"})) {
            Err(HttpError::Status(500)) => {}
            other => panic!("Expected HttpError::Status(500), got {:?}", other),
        }
    }

    #[test]
    fn test_post_json_maps_refused_connection() {
        let client = HttpClient::with_config(
            ClientConfig::default().with_connect_timeout(Duration::from_millis(500)),
        );

        // Port 9 (discard) is closed on loopback in test environments
        match client.post_json("http://127.0.0.1:9/api/v10/device.action", &json!({})) {
            Err(HttpError::Network(_)) => {}
            other => panic!("Expected HttpError::Network, got {:?}", other),
        }
    }

    #[test]
    fn test_post_json_maps_malformed_body() {
        let mut server = Server::new();
        let _mock = server
            .mock("POST", "/api/v10/network.action")
            .with_status(200)
            .with_body("not json")
            .create();

        let client = HttpClient::new();
        let url = format!("{}/api/v10/network.action", server.url());

        assert!(matches!(
            client.post_json(&url, &json!({"action": "info"})),
            Err(HttpError::Parse(_))
        ));
    }

    #[test]
    fn test_request_timeout_bounds_trickling_response() {
        use std::io::Write;
        use std::net::TcpListener;
        use std::time::Instant;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        // Each header line arrives well inside the read timeout
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let _ = stream.write_all(b"HTTP/1.1 200 OK\r\n");
                for _ in 0..50 {
                    std::thread::sleep(Duration::from_millis(100));
                    if stream.write_all(b"X-Pad: a\r\n").is_err() {
                        break;
                    }
                }
            }
        });

        let client = HttpClient::with_config(
            ClientConfig::default()
                .with_read_timeout(Duration::from_secs(2))
                .with_request_timeout(Duration::from_millis(400)),
        );
        let url = format!("http://{}/api/v10/player.action", addr);

        let started = Instant::now();
        let result = client.post_json(&url, &json!({"action": "status"}));

        assert!(matches!(result, Err(HttpError::Network(_))), "got {:?}", result);
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}

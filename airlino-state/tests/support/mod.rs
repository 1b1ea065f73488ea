//! Hand-written HTTP device for timing-sensitive session tests

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use airlino_api::{ApiVersionMap, DeviceAddress};
use airlino_state::{DeviceSession, WorkerPool};

/// Upper bound on header lines a trickling route sends before giving up
const TRICKLE_LINES: usize = 100;

pub struct Route {
    pub endpoint: &'static str,
    pub body: &'static str,
    pub delay: Duration,
    /// Send the head one header line at a time, this far apart, never finishing it
    pub trickle: Option<Duration>,
}

impl Route {
    pub fn new(endpoint: &'static str, body: &'static str) -> Self {
        Self {
            endpoint,
            body,
            delay: Duration::ZERO,
            trickle: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn trickled(mut self, every: Duration) -> Self {
        self.trickle = Some(every);
        self
    }
}

/// Serve `routes` on an ephemeral port, one thread per connection
pub fn spawn_device(routes: Vec<Route>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            let routes = Arc::clone(&routes);
            std::thread::spawn(move || handle(stream, &routes));
        }
    });

    addr
}

/// Unvalidated session for the device at `addr`, sharing `pool`
pub fn session_on(addr: SocketAddr, pool: &WorkerPool) -> DeviceSession {
    DeviceSession::new(
        DeviceAddress::new(addr.ip().to_string()).with_port(addr.port()),
        Arc::new(ApiVersionMap::default()),
        pool.clone(),
    )
}

fn handle(mut stream: TcpStream, routes: &[Route]) {
    let Some(path) = read_request(&stream) else { return };

    let Some(route) = routes.iter().find(|route| path.ends_with(route.endpoint)) else {
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    };

    std::thread::sleep(route.delay);

    if let Some(every) = route.trickle {
        if stream.write_all(b"HTTP/1.1 200 OK\r\n").is_err() {
            return;
        }
        for _ in 0..TRICKLE_LINES {
            std::thread::sleep(every);
            if stream.write_all(b"X-Padding: x\r\n").is_err() {
                return;
            }
        }
        return;
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        route.body.len(),
        route.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Read the request head and its body so closing the socket does not reset it
///
/// Returns the request path.
fn read_request(stream: &TcpStream) -> Option<String> {
    let read_half = stream.try_clone().ok()?;
    let mut reader = BufReader::new(read_half);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    let _ = reader.read_exact(&mut body);

    Some(request_line.split_whitespace().nth(1).unwrap_or("").to_string())
}

//! Device network address and request URL construction

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

use crate::version::ApiVersion;
use crate::{ApiError, Result};

/// Port every airlino device listens on
pub const DEFAULT_PORT: u16 = 8989;

/// Path template; `{version}` and `{endpoint}` are substituted per request
pub const DEFAULT_PATH_TEMPLATE: &str = "/api/v{version}/{endpoint}";

/// Where a device can be reached
///
/// Immutable once built. A device that moves to a new address gets a new
/// `DeviceAddress`; the old one is never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    host: String,
    port: u16,
    path_template: String,
}

impl DeviceAddress {
    /// Address on the default port and path template
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            path_template: DEFAULT_PATH_TEMPLATE.to_string(),
        }
    }

    pub fn from_ip(ip: IpAddr) -> Self {
        Self::new(ip.to_string())
    }

    /// Parse `host` or `host:port`
    ///
    /// Bare IPv6 addresses are accepted as hosts; an IPv6 address with a
    /// port must be bracketed (`[fe80::1]:8989`).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ApiError::InvalidConfig("empty device address".to_string()));
        }

        if input.parse::<Ipv6Addr>().is_ok() {
            return Ok(Self::new(input));
        }

        if let Some(rest) = input.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| ApiError::InvalidConfig(format!("unterminated IPv6 address: {}", input)))?;
            let address = Self::new(host);
            return match tail.strip_prefix(':') {
                Some(port) => Ok(address.with_port(parse_port(port)?)),
                None if tail.is_empty() => Ok(address),
                None => Err(ApiError::InvalidConfig(format!("invalid device address: {}", input))),
            };
        }

        match input.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => Ok(Self::new(host).with_port(parse_port(port)?)),
            Some(_) => Err(ApiError::InvalidConfig(format!("invalid device address: {}", input))),
            None => Ok(Self::new(input)),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_path_template(mut self, template: impl Into<String>) -> Self {
        self.path_template = template.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path_template(&self) -> &str {
        &self.path_template
    }

    /// Full request URL for `endpoint` at API `version`
    pub fn url(&self, version: ApiVersion, endpoint: &str) -> String {
        let path = self
            .path_template
            .replace("{version}", &version.to_string())
            .replace("{endpoint}", endpoint);

        let host = if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        format!("http://{}:{}{}", host, self.port, path)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

fn parse_port(port: &str) -> Result<u16> {
    port.parse::<u16>()
        .map_err(|_| ApiError::InvalidConfig(format!("invalid port: {}", port)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_url() {
        let address = DeviceAddress::new("192.168.1.40");
        assert_eq!(
            address.url(ApiVersion::new(11), "device.action"),
            "http://192.168.1.40:8989/api/v11/device.action"
        );
    }

    #[test]
    fn test_custom_template_and_port() {
        let address = DeviceAddress::new("shades.local")
            .with_port(80)
            .with_path_template("/hub/{endpoint}?v={version}");
        assert_eq!(
            address.url(ApiVersion::new(3), "shades"),
            "http://shades.local:80/hub/shades?v=3"
        );
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let address = DeviceAddress::from_ip("fe80::1".parse().unwrap());
        assert_eq!(
            address.url(ApiVersion::new(10), "network.action"),
            "http://[fe80::1]:8989/api/v10/network.action"
        );
        assert_eq!(address.to_string(), "[fe80::1]:8989");
    }

    #[rstest]
    #[case("10.0.0.2", "10.0.0.2", DEFAULT_PORT)]
    #[case("10.0.0.2:1234", "10.0.0.2", 1234)]
    #[case("lounge.local", "lounge.local", DEFAULT_PORT)]
    #[case("fe80::1", "fe80::1", DEFAULT_PORT)]
    #[case("[fe80::1]:9000", "fe80::1", 9000)]
    fn test_parse(#[case] input: &str, #[case] host: &str, #[case] port: u16) {
        let address = DeviceAddress::parse(input).unwrap();
        assert_eq!(address.host(), host);
        assert_eq!(address.port(), port);
    }

    #[rstest]
    #[case("")]
    #[case(":8989")]
    #[case("10.0.0.2:http")]
    #[case("[fe80::1")]
    fn test_parse_rejects(#[case] input: &str) {
        assert!(matches!(
            DeviceAddress::parse(input),
            Err(ApiError::InvalidConfig(_))
        ));
    }
}

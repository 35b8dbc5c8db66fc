//! Normalised base address of a device's ECP endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DiscoveryError, Result};

/// Port the ECP server listens on when no port is given
pub const DEFAULT_ECP_PORT: u16 = 8060;

/// Where a device's control API is reachable, e.g. `http://192.168.1.20:8060`.
///
/// Construction fills in a missing scheme (`http`) and port (8060) and drops
/// any path, query or fragment. The value never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceAddress {
    base: String,
    host: String,
    port: u16,
}

impl DeviceAddress {
    /// Parse a host, `host:port`, or full URL into an address.
    ///
    /// ```
    /// use roku_discovery::DeviceAddress;
    ///
    /// let addr = DeviceAddress::parse("192.168.1.20").unwrap();
    /// assert_eq!(addr.as_str(), "http://192.168.1.20:8060");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DiscoveryError::InvalidAddress("empty address".to_string()));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| DiscoveryError::InvalidAddress(format!("{}: {}", trimmed, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(DiscoveryError::InvalidAddress(format!(
                "{}: unsupported scheme '{}'",
                trimmed,
                url.scheme()
            )));
        }

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| DiscoveryError::InvalidAddress(format!("{}: missing host", trimmed)))?
            .to_string();

        // `Url` hides a port equal to the scheme default, so look at the
        // authority to tell "http://host:80" from "http://host".
        let port = match url.port() {
            Some(port) => port,
            None if has_explicit_port(&with_scheme) => url
                .port_or_known_default()
                .unwrap_or(DEFAULT_ECP_PORT),
            None => DEFAULT_ECP_PORT,
        };

        Ok(Self {
            base: format!("{}://{}:{}", url.scheme(), host, port),
            host,
            port,
        })
    }

    /// Derive the address from an SSDP `LOCATION` header, discarding the path.
    pub fn from_location(location: &str) -> Result<Self> {
        Self::parse(location)
    }

    /// `scheme://host:port`, without a trailing slash
    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Absolute URL of an endpoint relative to this address
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }
}

fn has_explicit_port(url: &str) -> bool {
    let authority = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(url)
        .split(['/', '?', '#'])
        .next()
        .unwrap_or("");

    match authority.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

impl FromStr for DeviceAddress {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DeviceAddress {
    type Error = DiscoveryError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DeviceAddress> for String {
    fn from(address: DeviceAddress) -> Self {
        address.base
    }
}

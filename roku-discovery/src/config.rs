//! Discovery configuration

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// SSDP multicast group and port
pub const SSDP_MULTICAST_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(239, 255, 255, 250), 1900));

/// Search target Roku devices answer to
pub const ROKU_SEARCH_TARGET: &str = "roku:ecp";

/// Settings for one discovery call
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Value of the `ST` header; replies carrying a different `ST` are ignored
    /// Default: "roku:ecp"
    pub search_target: String,

    /// Where the `M-SEARCH` is sent
    /// Default: 239.255.255.250:1900
    pub multicast_addr: SocketAddr,

    /// Maximum seconds a device may wait before answering (`MX` header)
    /// Default: 3
    pub mx: u8,

    /// Local address of the listening socket
    /// Default: 0.0.0.0:0
    pub bind_addr: SocketAddr,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            search_target: ROKU_SEARCH_TARGET.to_string(),
            multicast_addr: SSDP_MULTICAST_ADDR,
            mx: 3,
            bind_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)),
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_target(mut self, search_target: impl Into<String>) -> Self {
        self.search_target = search_target.into();
        self
    }

    pub fn with_multicast_addr(mut self, addr: SocketAddr) -> Self {
        self.multicast_addr = addr;
        self
    }

    pub fn with_mx(mut self, mx: u8) -> Self {
        self.mx = mx;
        self
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }
}

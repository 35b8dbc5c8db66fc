//! SSDP (Simple Service Discovery Protocol) search and reply parsing
//!
//! Only the pieces discovery needs: building one `M-SEARCH` request, a
//! transport that can send it and wait for datagrams, and a parser for the
//! HTTP-style reply headers.

use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};

/// Size of the receive buffer; SSDP replies are a few hundred bytes
const RECV_BUFFER_SIZE: usize = 2048;

/// The socket-level capability a discovery session runs on.
///
/// The session owns its transport and drops it when the call returns, which is
/// what closes the underlying socket.
pub trait SsdpTransport {
    /// Send one search datagram to `target`
    fn send_search(&mut self, request: &[u8], target: SocketAddr) -> Result<()>;

    /// Wait up to `wait` for one datagram.
    ///
    /// Returns `Ok(None)` when nothing arrived in that window.
    fn recv(&mut self, wait: Duration) -> Result<Option<Vec<u8>>>;
}

/// UDP implementation of [`SsdpTransport`]
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    buffer: [u8; RECV_BUFFER_SIZE],
}

impl UdpTransport {
    /// Bind the listening socket. Replies that arrive before the first
    /// `recv` are queued by the socket.
    pub fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .map_err(|e| DiscoveryError::Network(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .set_multicast_loop_v4(true)
            .map_err(|e| DiscoveryError::Network(format!("Failed to set multicast loop: {}", e)))?;

        Ok(Self {
            socket,
            buffer: [0; RECV_BUFFER_SIZE],
        })
    }
}

impl SsdpTransport for UdpTransport {
    fn send_search(&mut self, request: &[u8], target: SocketAddr) -> Result<()> {
        self.socket
            .send_to(request, target)
            .map_err(|e| DiscoveryError::Network(format!("Failed to send M-SEARCH: {}", e)))?;
        Ok(())
    }

    fn recv(&mut self, wait: Duration) -> Result<Option<Vec<u8>>> {
        // A zero read timeout is rejected by the OS
        let wait = wait.max(Duration::from_millis(1));
        self.socket
            .set_read_timeout(Some(wait))
            .map_err(|e| DiscoveryError::Network(format!("Failed to set read timeout: {}", e)))?;

        match self.socket.recv_from(&mut self.buffer) {
            Ok((size, _)) => Ok(Some(self.buffer[..size].to_vec())),
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => {
                Ok(None)
            }
            Err(e) => Err(DiscoveryError::Network(format!("Socket error: {}", e))),
        }
    }
}

/// Headers of one SSDP reply
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SsdpResponse {
    pub location: String,
    pub search_target: Option<String>,
    pub usn: Option<String>,
    pub server: Option<String>,
}

/// Build the `M-SEARCH` request for the configured search target
pub(crate) fn build_msearch(config: &DiscoveryConfig) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: {}\r\n\
         MAN: \"ssdp:discover\"\r\n\
         ST: {}\r\n\
         MX: {}\r\n\
         \r\n",
        config.multicast_addr, config.search_target, config.mx
    )
}

/// Parse an SSDP reply. Replies without a `LOCATION` header yield `None`.
pub(crate) fn parse_ssdp_response(response: &str) -> Option<SsdpResponse> {
    let mut location = None;
    let mut search_target = None;
    let mut usn = None;
    let mut server = None;

    for line in response.lines() {
        let line = line.trim();

        if let Some(value) = extract_header_value(line, "LOCATION:") {
            location = Some(value);
        } else if let Some(value) = extract_header_value(line, "ST:") {
            search_target = Some(value);
        } else if let Some(value) = extract_header_value(line, "USN:") {
            usn = Some(value);
        } else if let Some(value) = extract_header_value(line, "SERVER:") {
            server = Some(value);
        }
    }

    let location = location.filter(|l| !l.is_empty())?;
    Some(SsdpResponse {
        location,
        search_target,
        usn,
        server,
    })
}

/// Extract header value from a line like "HEADER: value"
fn extract_header_value(line: &str, header: &str) -> Option<String> {
    if line.len() > header.len()
        && line.is_char_boundary(header.len())
        && line[..header.len()].eq_ignore_ascii_case(header)
    {
        Some(line[header.len()..].trim().to_string())
    } else {
        None
    }
}

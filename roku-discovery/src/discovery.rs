//! Core discovery logic.
//!
//! A discovery call:
//! 1. Binds a listening socket, then sends one SSDP `M-SEARCH`
//! 2. Receives replies until the deadline
//! 3. Turns each reply's `LOCATION` into a [`DeviceAddress`]
//! 4. Drops duplicates and yields each new address once
//!
//! The session owns its transport; it is dropped (closing the socket) when
//! the call returns, whichever way it returns.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::address::DeviceAddress;
use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use crate::ssdp::{build_msearch, parse_ssdp_response, SsdpTransport, UdpTransport};

/// Runs discovery calls with a fixed configuration.
///
/// Holds no state between calls, so one `Discoverer` can be used from several
/// threads or for overlapping calls.
#[derive(Debug, Clone, Default)]
pub struct Discoverer {
    config: DiscoveryConfig,
}

impl Discoverer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Return the first device that answers.
    ///
    /// # Errors
    ///
    /// [`DiscoveryError::Timeout`] if nothing answers within `timeout`.
    pub fn discover_one(&self, timeout: Duration) -> Result<DeviceAddress> {
        let transport = UdpTransport::bind(self.config.bind_addr)?;
        self.discover_one_with(transport, timeout)
    }

    /// Return every distinct device that answers within `timeout`.
    ///
    /// Always listens for the whole window. No answers is an empty `Vec`, not
    /// an error.
    pub fn discover_all(&self, timeout: Duration) -> Result<Vec<DeviceAddress>> {
        let transport = UdpTransport::bind(self.config.bind_addr)?;
        self.discover_all_with(transport, timeout)
    }

    /// [`discover_one`](Self::discover_one) over a caller-supplied transport
    pub fn discover_one_with<T: SsdpTransport>(
        &self,
        transport: T,
        timeout: Duration,
    ) -> Result<DeviceAddress> {
        let mut session = DiscoverySession::start(transport, &self.config, timeout)?;
        match session.next() {
            Some(result) => result,
            None => Err(DiscoveryError::Timeout(timeout)),
        }
    }

    /// [`discover_all`](Self::discover_all) over a caller-supplied transport
    pub fn discover_all_with<T: SsdpTransport>(
        &self,
        transport: T,
        timeout: Duration,
    ) -> Result<Vec<DeviceAddress>> {
        DiscoverySession::start(transport, &self.config, timeout)?.collect()
    }

    /// Start a session and iterate addresses as they arrive.
    ///
    /// The iterator ends at the deadline; dropping it early closes the socket.
    pub fn iter(&self, timeout: Duration) -> Result<DiscoverySession<UdpTransport>> {
        let transport = UdpTransport::bind(self.config.bind_addr)?;
        DiscoverySession::start(transport, &self.config, timeout)
    }
}

/// One in-flight discovery: a transport, a deadline and the addresses seen so far.
///
/// Yields each distinct address once. A transport error is yielded once and
/// ends the iteration.
pub struct DiscoverySession<T: SsdpTransport> {
    transport: T,
    search_target: String,
    deadline: Instant,
    seen: HashSet<DeviceAddress>,
    finished: bool,
}

impl<T: SsdpTransport> DiscoverySession<T> {
    fn start(mut transport: T, config: &DiscoveryConfig, timeout: Duration) -> Result<Self> {
        let deadline = Instant::now() + timeout;
        let request = build_msearch(config);

        debug!(search_target = %config.search_target, ?timeout, "Sending SSDP M-SEARCH");
        transport.send_search(request.as_bytes(), config.multicast_addr)?;

        Ok(Self {
            transport,
            search_target: config.search_target.clone(),
            deadline,
            seen: HashSet::new(),
            finished: false,
        })
    }

    /// Addresses yielded so far
    pub fn seen(&self) -> &HashSet<DeviceAddress> {
        &self.seen
    }

    /// Turn one datagram into a new address, or `None` if it should be ignored
    fn accept(&mut self, datagram: &[u8]) -> Option<DeviceAddress> {
        let text = std::str::from_utf8(datagram).ok()?;
        let response = parse_ssdp_response(text)?;

        if let Some(st) = &response.search_target {
            if !st.eq_ignore_ascii_case(&self.search_target) {
                trace!(st = %st, "Ignoring reply for another search target");
                return None;
            }
        }

        let address = match DeviceAddress::from_location(&response.location) {
            Ok(address) => address,
            Err(_) => {
                trace!(location = %response.location, "Ignoring reply with unusable location");
                return None;
            }
        };

        if !self.seen.insert(address.clone()) {
            trace!(%address, "Ignoring duplicate reply");
            return None;
        }

        debug!(%address, usn = ?response.usn, "Discovered device");
        Some(address)
    }
}

impl<T: SsdpTransport> Iterator for DiscoverySession<T> {
    type Item = Result<DeviceAddress>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let remaining = self.deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                self.finished = true;
                break;
            }

            let datagram = match self.transport.recv(remaining) {
                Ok(Some(datagram)) => datagram,
                Ok(None) => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            };

            // A reply that lands as the window closes loses to the deadline
            if Instant::now() >= self.deadline {
                self.finished = true;
                break;
            }

            if let Some(address) = self.accept(&datagram) {
                return Some(Ok(address));
            }
        }
        None
    }
}

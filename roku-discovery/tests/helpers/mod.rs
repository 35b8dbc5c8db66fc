//! Simulated SSDP network for discovery tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use roku_discovery::{DiscoveryError, Result, SsdpTransport};

/// SSDP reply a Roku at `ip` would send
pub fn roku_reply(ip: &str, serial: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         Cache-Control: max-age=3600\r\n\
         ST: roku:ecp\r\n\
         USN: uuid:roku:ecp:{}\r\n\
         Ext: \r\n\
         Server: Roku/12.5.0 UPnP/1.0 Roku/12.5.0\r\n\
         LOCATION: http://{}:8060/\r\n\r\n",
        serial, ip
    )
}

/// Reply with no LOCATION header
pub fn reply_without_location() -> String {
    "HTTP/1.1 200 OK\r\nST: roku:ecp\r\nUSN: uuid:roku:ecp:NOLOCATION\r\n\r\n".to_string()
}

/// Observations shared between a test and the transport it handed away
#[derive(Debug, Default, Clone)]
pub struct Probe {
    closed: Arc<AtomicBool>,
    searches: Arc<AtomicUsize>,
    receives_after_close: Arc<AtomicUsize>,
}

impl Probe {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

/// Transport that delivers scripted replies at fixed offsets from the search
pub struct SimulatedNetwork {
    schedule: Vec<(Duration, Vec<u8>)>,
    started: Option<Instant>,
    fail_recv_after: Option<usize>,
    recv_calls: usize,
    probe: Probe,
}

impl SimulatedNetwork {
    pub fn new() -> Self {
        Self {
            schedule: Vec::new(),
            started: None,
            fail_recv_after: None,
            recv_calls: 0,
            probe: Probe::default(),
        }
    }

    /// Deliver `reply` `delay` after the search is sent
    pub fn reply_after(mut self, delay: Duration, reply: impl Into<String>) -> Self {
        self.schedule.push((delay, reply.into().into_bytes()));
        self.schedule.sort_by_key(|(at, _)| *at);
        self
    }

    /// Make the n-th receive (0-based) fail with a socket error
    pub fn fail_on_recv(mut self, n: usize) -> Self {
        self.fail_recv_after = Some(n);
        self
    }

    pub fn probe(&self) -> Probe {
        self.probe.clone()
    }
}

impl SsdpTransport for SimulatedNetwork {
    fn send_search(&mut self, request: &[u8], _target: SocketAddr) -> Result<()> {
        assert!(request.starts_with(b"M-SEARCH * HTTP/1.1\r\n"));
        self.probe.searches.fetch_add(1, Ordering::SeqCst);
        self.started = Some(Instant::now());
        Ok(())
    }

    fn recv(&mut self, wait: Duration) -> Result<Option<Vec<u8>>> {
        if self.probe.is_closed() {
            self.probe.receives_after_close.fetch_add(1, Ordering::SeqCst);
        }

        let call = self.recv_calls;
        self.recv_calls += 1;
        if self.fail_recv_after == Some(call) {
            return Err(DiscoveryError::Network("Socket error: simulated".to_string()));
        }

        let started = self.started.expect("recv before send_search");
        let now = Instant::now();
        let window_end = now + wait;

        match self.schedule.first() {
            Some((offset, _)) if started + *offset <= window_end => {
                let due = started + *offset;
                if due > now {
                    std::thread::sleep(due - now);
                }
                let (_, reply) = self.schedule.remove(0);
                Ok(Some(reply))
            }
            _ => {
                std::thread::sleep(wait);
                Ok(None)
            }
        }
    }
}

impl Drop for SimulatedNetwork {
    fn drop(&mut self) {
        self.probe.closed.store(true, Ordering::SeqCst);
    }
}

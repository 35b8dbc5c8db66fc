//! Roku device discovery library
//!
//! This crate finds Roku devices on the local network using SSDP (Simple
//! Service Discovery Protocol) and resolves each reply into the base address
//! of the device's ECP (External Control Protocol) HTTP endpoint.
//!
//! # Quick Start
//!
//! ```no_run
//! use roku_discovery::discover_all;
//! use std::time::Duration;
//!
//! for address in discover_all(Duration::from_secs(3))? {
//!     println!("Found Roku at {}", address);
//! }
//! # Ok::<(), roku_discovery::DiscoveryError>(())
//! ```
//!
//! # First responder
//!
//! ```no_run
//! use roku_discovery::discover_one;
//! use std::time::Duration;
//!
//! let address = discover_one(Duration::from_secs(5))?;
//! println!("Using {}", address);
//! # Ok::<(), roku_discovery::DiscoveryError>(())
//! ```

mod address;
mod config;
mod device;
mod discovery;
mod error;
mod ssdp;

pub use address::{DeviceAddress, DEFAULT_ECP_PORT};
pub use config::{DiscoveryConfig, ROKU_SEARCH_TARGET, SSDP_MULTICAST_ADDR};
pub use device::{describe, DeviceDescription};
pub use discovery::{Discoverer, DiscoverySession};
pub use error::{DiscoveryError, Result};
pub use ssdp::{SsdpTransport, UdpTransport};

use std::time::Duration;

/// Timeout used by callers that have no better value
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Return the address of the first Roku that answers within `timeout`.
///
/// # Errors
///
/// [`DiscoveryError::Timeout`] when no device answers in time,
/// [`DiscoveryError::Network`] when the socket cannot be used.
pub fn discover_one(timeout: Duration) -> Result<DeviceAddress> {
    Discoverer::new().discover_one(timeout)
}

/// Return every distinct Roku that answers within `timeout`.
///
/// Listens for the full window. An empty network gives an empty `Vec`.
pub fn discover_all(timeout: Duration) -> Result<Vec<DeviceAddress>> {
    Discoverer::new().discover_all(timeout)
}

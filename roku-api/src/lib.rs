//! High-level Roku API for device control over ECP
//!
//! This crate wraps the private `ecp-client` transport with typed queries,
//! key events and chainable command scripts for a single device.
//!
//! ```rust,ignore
//! use roku_api::{Key, RokuClient};
//!
//! let address = roku_discovery::discover_one(roku_discovery::DEFAULT_TIMEOUT)?;
//! let client = RokuClient::new(address);
//!
//! if let Some(app) = client.active_app()? {
//!     println!("Now playing: {}", app.name);
//! }
//!
//! client.keypress(Key::VolumeUp)?;
//! client.command().search().text("nature documentaries").enter().send()?;
//! ```

#[macro_use]
mod macros;

pub mod apps;
pub mod client;
pub mod commander;
pub mod device_info;
pub mod error;
pub mod keys;
pub mod logging;
mod xml;

pub use apps::App;
pub use client::{Icon, RokuClient};
pub use commander::{Command, Commander};
pub use device_info::{DeviceInfo, InfoValue};
pub use error::{ApiError, Result};
pub use keys::{Key, KeyAction, KeyInput};

pub use ecp_client::{ClientConfig, EcpClient, EcpError, EcpResponse, Transport};
pub use roku_discovery::DeviceAddress;

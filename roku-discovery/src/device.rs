//! UPnP device description fetching and parsing.
//!
//! Every Roku serves a UPnP description document at the root of its ECP
//! address. Discovery itself only needs the address; the description is
//! fetched on request to label devices.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::address::DeviceAddress;
use crate::error::{DiscoveryError, Result};

/// UPnP device description root element.
#[derive(Debug, Deserialize)]
struct Root {
    device: DeviceDescription,
}

/// Identity of a device as reported in its UPnP description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDescription {
    pub device_type: String,
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_name: String,
    pub model_number: Option<String>,
    pub serial_number: Option<String>,
    #[serde(rename = "UDN")]
    pub udn: String,
}

impl DeviceDescription {
    /// Parse a device description document.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Parse` if the XML is malformed or missing required fields.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root: Root = quick_xml::de::from_str(xml)
            .map_err(|e| DiscoveryError::Parse(format!("Failed to parse device XML: {}", e)))?;

        Ok(root.device)
    }

    /// Whether the description identifies a Roku player or TV
    pub fn is_roku_device(&self) -> bool {
        self.manufacturer.to_lowercase().contains("roku")
            || self.device_type.starts_with("urn:roku-com:device")
    }
}

/// Fetch and parse the description document served at `address`.
pub fn describe(address: &DeviceAddress, timeout: Duration) -> Result<DeviceDescription> {
    let http_client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DiscoveryError::Network(format!("Failed to create HTTP client: {}", e)))?;

    let response = http_client
        .get(address.endpoint(""))
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| DiscoveryError::Network(format!("Failed to fetch device description: {}", e)))?;

    let xml = response
        .text()
        .map_err(|e| DiscoveryError::Network(format!("Failed to read response body: {}", e)))?;

    DeviceDescription::from_xml(&xml)
}

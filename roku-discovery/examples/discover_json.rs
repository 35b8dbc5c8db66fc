//! Discover Roku devices and print them as JSON for scripting
//!
//! Usage: cargo run -p roku-discovery --example discover_json [timeout_secs]

use roku_discovery::{describe, discover_all, DeviceAddress, DeviceDescription};
use serde::Serialize;
use std::time::Duration;

#[derive(Serialize)]
struct FoundDevice {
    address: DeviceAddress,
    #[serde(flatten)]
    description: Option<DeviceDescription>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let timeout = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);

    let addresses = discover_all(Duration::from_secs(timeout))?;

    let devices: Vec<FoundDevice> = addresses
        .into_iter()
        .map(|address| FoundDevice {
            description: describe(&address, Duration::from_secs(2)).ok(),
            address,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&devices)?);
    Ok(())
}

//! Error types for the discovery system.

use std::time::Duration;
use thiserror::Error;

/// Error type for discovery operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Socket creation, send or receive failed, or an HTTP fetch failed
    #[error("Network error: {0}")]
    Network(String),

    /// A device description document could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// No device answered before the timeout elapsed
    #[error("No device responded within {0:?}")]
    Timeout(Duration),

    /// A string could not be turned into a device address
    #[error("Invalid device address: {0}")]
    InvalidAddress(String),
}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

//! Error types for the ECP transport

use thiserror::Error;

/// Errors that can occur while talking to a device's ECP endpoint
#[derive(Debug, Error)]
pub enum EcpError {
    /// Connection, DNS or I/O failure before a status line was received
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The device answered with a non-success status
    #[error("{endpoint} failed: HTTP {code} {status_text}")]
    Status {
        endpoint: String,
        code: u16,
        status_text: String,
    },

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl EcpError {
    /// Status code of a `Status` error, if this is one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            EcpError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Convenience alias for transport results
pub type Result<T> = std::result::Result<T, EcpError>;

use ecp_client::EcpError;
use thiserror::Error;

/// High-level API errors for Roku operations
///
/// Wraps transport failures from the ECP client and adds the failure modes
/// that only make sense once a response has been read.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed or the device answered with a non-success status
    #[error("Transport error: {0}")]
    Transport(#[from] EcpError),

    /// Response parsing error
    ///
    /// The body was not well-formed XML or did not have the expected root element.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The response parsed but did not have the expected shape
    #[error("Malformed response from {endpoint}: expected {expected} <{element}> element(s), found {found}")]
    MalformedResponse {
        endpoint: String,
        element: &'static str,
        expected: usize,
        found: usize,
    },

    /// A key name that is not in the key table
    #[error("Invalid key: '{0}'")]
    InvalidKey(String),

    /// One step of a command chain failed; later steps were not sent
    #[error("Command {step} ({command}) failed: {source}")]
    Chain {
        step: usize,
        command: String,
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// The innermost error, looking through chain failures
    pub fn root_cause(&self) -> &ApiError {
        match self {
            ApiError::Chain { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

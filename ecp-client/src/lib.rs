//! Private HTTP transport for Roku ECP device communication
//!
//! The External Control Protocol is plain HTTP on port 8060: queries are `GET`
//! requests returning XML (or image data), actions are `POST` requests with an
//! empty body. This crate issues exactly one request per call and maps a
//! non-success status to [`EcpError::Status`]. It never retries.

mod config;
mod error;
mod response;

pub use config::ClientConfig;
pub use error::{EcpError, Result};
pub use response::EcpResponse;

use tracing::debug;

/// The narrow "issue request, get body or error" capability the device client
/// is written against.
///
/// [`EcpClient`] is the network implementation; tests substitute recording or
/// canned implementations.
pub trait Transport {
    /// `GET` an absolute URL, returning the unread response on a 2xx status
    fn get(&self, url: &str) -> Result<EcpResponse>;

    /// `POST` an empty body to an absolute URL, discarding the response
    fn post(&self, url: &str) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<EcpResponse> {
        (**self).get(url)
    }

    fn post(&self, url: &str) -> Result<()> {
        (**self).post(url)
    }
}

/// A minimal blocking HTTP client for ECP endpoints
#[derive(Debug, Clone)]
pub struct EcpClient {
    agent: ureq::Agent,
}

impl EcpClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(config.connect_timeout)
                .timeout_read(config.read_timeout)
                .user_agent(&config.user_agent)
                .build(),
        }
    }
}

impl Default for EcpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for EcpClient {
    fn get(&self, url: &str) -> Result<EcpResponse> {
        debug!(url, "ECP GET");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| map_ureq_error(url, e))?;

        Ok(EcpResponse::from(response))
    }

    fn post(&self, url: &str) -> Result<()> {
        debug!(url, "ECP POST");
        let response = self
            .agent
            .post(url)
            .send_bytes(&[])
            .map_err(|e| map_ureq_error(url, e))?;

        // Drain so the connection can go back to the agent's pool
        response
            .into_string()
            .map_err(|e| EcpError::Body(e.to_string()))?;
        Ok(())
    }
}

fn map_ureq_error(url: &str, error: ureq::Error) -> EcpError {
    match error {
        ureq::Error::Status(code, response) => EcpError::Status {
            endpoint: url.to_string(),
            code,
            status_text: response.status_text().to_string(),
        },
        ureq::Error::Transport(transport) => EcpError::Network(transport.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let _client = EcpClient::new();
        let _default_client = EcpClient::default();
        let _configured = EcpClient::with_config(&ClientConfig::new().with_user_agent("x"));
    }

    #[test]
    fn test_status_code_accessor() {
        let err = EcpError::Status {
            endpoint: "http://192.168.1.20:8060/keypress/Home".to_string(),
            code: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(
            err.to_string(),
            "http://192.168.1.20:8060/keypress/Home failed: HTTP 503 Service Unavailable"
        );
        assert_eq!(EcpError::Network("refused".to_string()).status_code(), None);
    }
}

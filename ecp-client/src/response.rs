//! Response handle returned by GET requests

use std::fmt;
use std::io::{Cursor, Read};

use crate::error::{EcpError, Result};

type Body = Box<dyn Read + Send + Sync + 'static>;

/// A successful ECP response whose body has not been read yet.
///
/// The caller owns the body: it can be streamed with [`into_reader`](Self::into_reader)
/// or buffered with [`into_string`](Self::into_string) / [`into_bytes`](Self::into_bytes).
pub struct EcpResponse {
    status: u16,
    content_type: Option<String>,
    body: Body,
}

impl EcpResponse {
    pub fn new<R>(status: u16, content_type: Option<String>, body: R) -> Self
    where
        R: Read + Send + Sync + 'static,
    {
        Self {
            status,
            content_type,
            body: Box::new(body),
        }
    }

    /// Build a 200 response from an in-memory body
    pub fn from_bytes(content_type: Option<&str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(
            200,
            content_type.map(str::to_string),
            Cursor::new(bytes.into()),
        )
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw `Content-Type` header, parameters included
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn into_reader(self) -> impl Read + Send + Sync + 'static {
        self.body
    }

    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.body
            .read_to_end(&mut buf)
            .map_err(|e| EcpError::Body(e.to_string()))?;
        Ok(buf)
    }

    pub fn into_string(mut self) -> Result<String> {
        let mut text = String::new();
        self.body
            .read_to_string(&mut text)
            .map_err(|e| EcpError::Body(e.to_string()))?;
        Ok(text)
    }
}

impl From<ureq::Response> for EcpResponse {
    fn from(response: ureq::Response) -> Self {
        let status = response.status();
        let content_type = response.header("Content-Type").map(str::to_string);
        Self {
            status,
            content_type,
            body: response.into_reader(),
        }
    }
}

impl fmt::Debug for EcpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcpResponse")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_into_string() {
        let response = EcpResponse::from_bytes(Some("text/xml"), "<apps/>");
        assert_eq!(response.status(), 200);
        assert_eq!(response.content_type(), Some("text/xml"));
        assert_eq!(response.into_string().unwrap(), "<apps/>");
    }

    #[test]
    fn test_into_reader_streams_body() {
        let response = EcpResponse::from_bytes(None, vec![0x89, b'P', b'N', b'G']);
        let mut reader = response.into_reader();
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf).unwrap();
        assert_eq!(buf, [0x89, b'P']);
    }

    #[test]
    fn test_invalid_utf8_is_body_error() {
        let response = EcpResponse::from_bytes(None, vec![0xff, 0xfe]);
        assert!(matches!(response.into_string(), Err(EcpError::Body(_))));
    }
}

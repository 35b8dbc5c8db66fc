//! Recording transport for device client tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use roku_api::{DeviceAddress, EcpError, EcpResponse, RokuClient, Transport};

pub const BASE: &str = "http://192.168.1.20:8060";

/// One request seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get(String),
    Post(String),
}

impl Request {
    pub fn url(&self) -> &str {
        match self {
            Request::Get(url) | Request::Post(url) => url,
        }
    }

    /// URL relative to [`BASE`]
    pub fn path(&self) -> &str {
        self.url()
            .strip_prefix(BASE)
            .unwrap_or(self.url())
            .trim_start_matches('/')
    }
}

/// Logs every request and answers GETs from canned bodies
#[derive(Default)]
pub struct RecordingTransport {
    log: Mutex<Vec<Request>>,
    bodies: HashMap<String, (Option<String>, Vec<u8>)>,
    fail_on: Option<usize>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `GET {path}` with `body`
    pub fn respond(mut self, path: &str, body: &str) -> Self {
        self.bodies
            .insert(path.to_string(), (Some("text/xml; charset=utf-8".to_string()), body.into()));
        self
    }

    pub fn respond_bytes(mut self, path: &str, content_type: &str, body: &[u8]) -> Self {
        self.bodies
            .insert(path.to_string(), (Some(content_type.to_string()), body.to_vec()));
        self
    }

    /// Fail the request with this 0-based index with HTTP 500
    pub fn fail_on(mut self, index: usize) -> Self {
        self.fail_on = Some(index);
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.log.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().iter().map(|r| r.path().to_string()).collect()
    }

    fn record(&self, request: Request) -> Result<(), EcpError> {
        let mut log = self.log.lock().unwrap();
        let index = log.len();
        let url = request.url().to_string();
        log.push(request);

        if self.fail_on == Some(index) {
            return Err(EcpError::Status {
                endpoint: url,
                code: 500,
                status_text: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

impl Transport for RecordingTransport {
    fn get(&self, url: &str) -> Result<EcpResponse, EcpError> {
        let request = Request::Get(url.to_string());
        let path = request.path().to_string();
        self.record(request)?;

        match self.bodies.get(&path) {
            Some((content_type, body)) => {
                Ok(EcpResponse::from_bytes(content_type.as_deref(), body.clone()))
            }
            None => Err(EcpError::Status {
                endpoint: url.to_string(),
                code: 404,
                status_text: "Not Found".to_string(),
            }),
        }
    }

    fn post(&self, url: &str) -> Result<(), EcpError> {
        self.record(Request::Post(url.to_string()))
    }
}

pub fn client(transport: &RecordingTransport) -> RokuClient<&RecordingTransport> {
    RokuClient::with_transport(DeviceAddress::parse(BASE).unwrap(), transport)
}

//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! `PostcodesClient` builds an `HttpRequest` and parses an `HttpResponse`
//! without ever touching the network. The `Transport` trait is the single
//! seam where I/O happens; `UreqTransport` is the blocking implementation
//! used by `Geocoder`, and tests substitute canned transports.
//!
//! Responses carry the whole body as bytes. Reading the body is the
//! transport's job, so a stream that fails midway surfaces as
//! `TransportError::Body` before any decoding starts.

use std::io::Read;
use std::time::Duration;

use url::Url;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Failures below the HTTP status line.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// DNS, connect, TLS or timeout failure.
    #[error("http request failed: {0}")]
    Request(Box<dyn std::error::Error + Send + Sync>),

    /// The body stream broke before it was fully read.
    #[error("could not read http response body: {0}")]
    Body(#[from] std::io::Error),
}

/// Executes a blocking GET.
///
/// Implementations must return non-2xx responses as `Ok` so the caller can
/// classify the status itself.
pub trait Transport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request)
    }
}

/// Blocking transport backed by a shared `ureq::Agent`.
///
/// Cloning is cheap and clones share the agent's connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// Build a transport. `None` means no deadline at all.
    pub fn new(timeout: Option<Duration>) -> Self {
        // Status interpretation belongs to the client, not the agent.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder
            .call()
            .map_err(|e| TransportError::Request(Box::new(e)))?;

        let status = response.status().as_u16();
        let mut body = Vec::new();
        response.body_mut().as_reader().read_to_end(&mut body)?;

        Ok(HttpResponse { status, body })
    }
}

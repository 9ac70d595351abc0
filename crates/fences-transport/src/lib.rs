//! Transport layer for the Fences client.
//!
//! Provides the [`Transport`] trait that abstracts over "send one GET,
//! get back a status code and a body", plus the URL builder every
//! operation goes through ([`Endpoint`], [`Request`]).
//!
//! # Feature Flags
//!
//! - `reqwest` (default): blocking HTTP transport via `reqwest`

mod endpoint;
mod error;
#[cfg(feature = "reqwest")]
mod http;

pub use endpoint::{Endpoint, Request};
pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;

use std::sync::Arc;

/// The raw outcome of one round trip: whatever the server answered.
///
/// No interpretation happens here. A 500 with an HTML body is a perfectly
/// good `HttpResponse`; classifying it is the protocol layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body, possibly empty.
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues blocking GET requests.
///
/// One call is one round trip: no retries, no batching. Implementations
/// must be safe to share between threads, because a single client may be
/// used from several threads at once.
pub trait Transport: Send + Sync {
    /// Sends a GET to `url` and returns the status code and body.
    ///
    /// # Errors
    /// Returns a [`TransportError`] only when no HTTP response was
    /// obtained at all (connection refused, timeout, broken body).
    /// Non-2xx responses are `Ok`.
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url)
    }
}

//! Blocking HTTP transport using `reqwest`.

use std::time::Duration;

use crate::{HttpResponse, Transport, TransportError};

/// A [`Transport`] backed by `reqwest::blocking::Client`.
///
/// The inner client keeps its own connection pool and is safe to share
/// between threads, so one `ReqwestTransport` serves a whole program.
///
/// `reqwest::blocking` drives its own runtime internally; don't call it
/// from inside an async task.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport with no request timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    /// Creates a transport whose requests give up after `timeout`
    /// (connect plus full response). `None` waits indefinitely.
    pub fn with_timeout(
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        tracing::debug!(?timeout, "HTTP transport ready");
        Ok(Self { client })
    }

    /// Wraps an already configured client (proxy, TLS, headers).
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| TransportError::Body(e.to_string()))?;

        tracing::trace!(status, len = body.len(), "received response");
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

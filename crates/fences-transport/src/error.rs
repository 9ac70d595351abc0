/// Errors that can occur in the transport layer.
///
/// Every variant means "no usable HTTP response"; an unexpected status code
/// is not a transport error.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The underlying HTTP client could not be constructed.
    #[error("client setup failed: {0}")]
    Setup(String),

    /// The request never got an answer: connection refused or reset,
    /// DNS failure, timeout, or an unparseable URL.
    #[error("request failed: {0}")]
    Request(String),

    /// The status line arrived but reading the body failed.
    #[error("reading body failed: {0}")]
    Body(String),
}

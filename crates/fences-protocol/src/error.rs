//! Error types for the protocol layer.
//!
//! Each crate in the Fences client defines its own error enum. A
//! `ProtocolError` always means "the server answered, but the body did not
//! have the shape this endpoint promises". It never escapes to the caller
//! of the client: the facade turns it into
//! [`ApiStatus::Error`](crate::ApiStatus::Error).

/// Errors that can occur while decoding a response body.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The body is not valid JSON at all.
    ///
    /// Common causes: an HTML error page served with a 200, a truncated
    /// body, or an empty body.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The body is valid JSON, but a field is missing or has the wrong type.
    ///
    /// `field` is the wire name (e.g. `"gameID"`), so log lines point
    /// straight at the offending key.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    /// The top-level JSON value has the wrong shape (object vs array).
    #[error("unexpected body shape: expected {0}")]
    UnexpectedShape(&'static str),
}

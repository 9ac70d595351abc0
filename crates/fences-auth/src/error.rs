//! Error types for the admin handshake.

/// Errors that can occur while turning a key offer into a token.
///
/// None of these are retried: the client reports them once as
/// [`ApiStatus::Error`](fences_protocol::ApiStatus::Error).
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The `puk` string isn't a valid dash-joined byte list.
    #[error("malformed key encoding: {0}")]
    MalformedKey(String),

    /// The bytes parsed, but they aren't a DER-encoded RSA public key.
    #[error("invalid public key: {0}")]
    InvalidKey(String),

    /// RSA encryption itself failed, e.g. the key is too small to hold
    /// the secret plus padding.
    #[error("encryption failed: {0}")]
    Encryption(String),
}

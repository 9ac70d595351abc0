//! Unified error type for the Fences client.

use fences_auth::AuthError;
use fences_protocol::{ApiStatus, ProtocolError};
use fences_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// Client operations use it internally so every step can be chained with
/// `?`; it only reaches callers from fallible setup such as
/// [`ClientBuilder::build`](crate::ClientBuilder::build). Operations
/// themselves report an [`ApiStatus`] via [`FencesError::status`].
#[derive(Debug, thiserror::Error)]
pub enum FencesError {
    /// No HTTP response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 200 body did not decode.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The admin handshake could not produce a token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The server answered with a non-200 status code.
    #[error("server answered {code} ({status})")]
    Http { code: u16, status: ApiStatus },
}

impl FencesError {
    /// The status an operation reports when it fails with this error.
    ///
    /// Only a classified HTTP answer keeps its own status; transport,
    /// decode and handshake failures are all [`ApiStatus::Error`].
    pub fn status(&self) -> ApiStatus {
        match self {
            Self::Http { status, .. } => *status,
            Self::Transport(_) | Self::Protocol(_) | Self::Auth(_) => {
                ApiStatus::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err: FencesError = TransportError::Request("refused".into()).into();
        assert!(matches!(err, FencesError::Transport(_)));
        assert!(err.to_string().contains("refused"));
        assert_eq!(err.status(), ApiStatus::Error);
    }

    #[test]
    fn test_from_protocol_error() {
        let err: FencesError = ProtocolError::UnexpectedShape("array").into();
        assert!(matches!(err, FencesError::Protocol(_)));
        assert_eq!(err.status(), ApiStatus::Error);
    }

    #[test]
    fn test_from_auth_error() {
        let err: FencesError = AuthError::MalformedKey("x".into()).into();
        assert!(matches!(err, FencesError::Auth(_)));
        assert_eq!(err.status(), ApiStatus::Error);
    }

    #[test]
    fn test_http_error_keeps_its_status() {
        let err = FencesError::Http {
            code: 404,
            status: ApiStatus::NotFound,
        };
        assert_eq!(err.status(), ApiStatus::NotFound);
        assert_eq!(err.to_string(), "server answered 404 (notFound)");
    }
}

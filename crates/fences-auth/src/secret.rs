//! The shared secret both ends of the handshake know.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The value the server expects to find after decrypting a token.
///
/// It ships as a fixed 36-character, UUID-shaped constant that matches the
/// reference server; deployments with their own server can override it in
/// the client configuration.
///
/// `Debug` is hand-written so the secret doesn't leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdminSecret(String);

impl AdminSecret {
    /// The constant the reference server is built with.
    pub const DEFAULT: &'static str = "0eea8ab0-6788-4f8d-8f41-0283b07f8d06";

    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The plaintext that gets encrypted.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Default for AdminSecret {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_is_36_chars() {
        let secret = AdminSecret::default();
        assert_eq!(secret.as_bytes().len(), 36);
        assert_eq!(secret.as_bytes(), AdminSecret::DEFAULT.as_bytes());
    }

    #[test]
    fn test_debug_is_redacted() {
        let debug = format!("{:?}", AdminSecret::default());
        assert!(!debug.contains("0eea8ab0"));
    }
}

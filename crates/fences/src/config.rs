//! Client configuration and builder.

use std::time::Duration;

use fences_auth::AdminSecret;
use fences_transport::Transport;
#[cfg(feature = "reqwest")]
use fences_transport::ReqwestTransport;
use serde::{Deserialize, Serialize};

use crate::FencesClient;
#[cfg(feature = "reqwest")]
use crate::FencesError;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Where the Fences server lives and how to talk to it.
///
/// Serializable so it can sit in an application's own config file;
/// `#[serde(default)]` lets that file mention only the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server host name or IP address.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Path prefix of the API on that server.
    pub base_path: String,

    /// Full service root (e.g. `https://fences.example.org/api`). When set,
    /// `host`, `port` and `base_path` are ignored.
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds. `None` or `0` waits
    /// indefinitely.
    pub timeout_ms: Option<u64>,

    /// Secret encrypted during the admin handshake.
    pub admin_secret: AdminSecret,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_path: "/fences".to_string(),
            base_url: None,
            timeout_ms: None,
            admin_secret: AdminSecret::default(),
        }
    }
}

impl ClientConfig {
    /// The URL every endpoint path is appended to, without a trailing
    /// slash.
    pub fn service_root(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => {
                let path = self.base_path.trim_end_matches('/');
                format!("http://{}:{}{}", self.host, self.port, path)
            }
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

// ---------------------------------------------------------------------------
// ClientBuilder
// ---------------------------------------------------------------------------

/// Builder for [`FencesClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use fences::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .host("192.168.0.20")
///     .port(8080)
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// let games = client.public_games();
/// # Ok::<(), fences::FencesError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Uses a full service root instead of host/port/path.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout (millisecond precision). A timeout
    /// that rounds to zero milliseconds means no timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.config.timeout_ms = (millis > 0).then_some(millis);
        self
    }

    pub fn admin_secret(mut self, secret: AdminSecret) -> Self {
        self.config.admin_secret = secret;
        self
    }

    /// Builds a client over the default blocking HTTP transport.
    ///
    /// # Errors
    /// [`FencesError::Transport`] if the HTTP client can't be set up.
    #[cfg(feature = "reqwest")]
    pub fn build(self) -> Result<FencesClient<ReqwestTransport>, FencesError> {
        let transport = ReqwestTransport::with_timeout(self.config.timeout())?;
        Ok(FencesClient::with_transport(self.config, transport))
    }

    /// Builds a client over a caller-supplied transport. The timeout
    /// setting is the transport's business and is ignored here.
    pub fn build_with<T: Transport>(self, transport: T) -> FencesClient<T> {
        FencesClient::with_transport(self.config, transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_root() {
        let config = ClientConfig::default();
        assert_eq!(config.service_root(), "http://127.0.0.1:8080/fences");
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_base_url_overrides_host_and_port() {
        let config = ClientConfig {
            base_url: Some("https://fences.example.org/api/".into()),
            port: 1,
            ..ClientConfig::default()
        };
        assert_eq!(config.service_root(), "https://fences.example.org/api");
    }

    #[test]
    fn test_builder_setters() {
        let builder = ClientBuilder::new()
            .host("10.0.0.5")
            .port(9000)
            .timeout(Duration::from_millis(2500))
            .admin_secret(AdminSecret::new("s"));
        assert_eq!(builder.config.service_root(), "http://10.0.0.5:9000/fences");
        assert_eq!(builder.config.timeout_ms, Some(2500));
        assert_eq!(builder.config.admin_secret, AdminSecret::new("s"));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let builder = ClientBuilder::new().timeout(Duration::ZERO);
        assert_eq!(builder.config.timeout_ms, None);
        assert_eq!(builder.config.timeout(), None);

        let builder = ClientBuilder::new().timeout(Duration::from_micros(300));
        assert_eq!(builder.config.timeout(), None);

        let config: ClientConfig =
            serde_json::from_str(r#"{"timeout_ms":0}"#).unwrap();
        assert_eq!(config.timeout_ms, Some(0));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"host":"fences.local","timeout_ms":5000}"#)
                .unwrap();
        assert_eq!(config.host, "fences.local");
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.admin_secret, AdminSecret::default());
    }
}

//! Run configuration and validation.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default service host.
pub const DEFAULT_HOST: &str = "localhost";

/// Default service port.
pub const DEFAULT_PORT: u16 = 60202;

/// Default API path prefix.
pub const DEFAULT_PREFIX: &str = "/api/v1";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// URL scheme used to reach the service.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Immutable configuration for a single smoke-test run.
///
/// Built once by the entry point and handed to the pipeline by reference.
/// Empty token and player values are normalised to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    /// API path prefix, e.g. `/api/v1`. Empty mounts the API at the root.
    pub prefix: String,
    token: Option<String>,
    player: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            scheme: Scheme::Http,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            prefix: DEFAULT_PREFIX.to_string(),
            token: None,
            player: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RunConfig {
    /// Create a config for a specific host and port with default prefix and timeout.
    pub fn new(host: &str, port: u16) -> Self {
        RunConfig {
            host: host.to_string(),
            port,
            ..Self::default()
        }
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Set the access token sent as the `token` query parameter.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = non_empty(token);
        self
    }

    /// Set the player looked up by the extra `/player` probe.
    pub fn with_player(mut self, player: &str) -> Self {
        self.player = non_empty(player);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Service root, e.g. `http://localhost:60202`.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Service root joined with the API prefix, e.g. `http://localhost:60202/api/v1`.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.base_url(), self.prefix.trim_end_matches('/'))
    }

    /// Reject configurations that would make every probe meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        if !self.prefix.is_empty() && !self.prefix.starts_with('/') {
            return Err(ConfigError::InvalidPrefix(self.prefix.clone()));
        }

        let api_base = self.api_base();
        if self.host.contains(['/', '?', '#', '@']) || self.host.contains(char::is_whitespace) {
            return Err(ConfigError::MalformedBaseUrl {
                url: api_base,
                reason: "host contains a reserved character".to_string(),
            });
        }
        reqwest::Url::parse(&api_base).map_err(|e| ConfigError::MalformedBaseUrl {
            url: api_base.clone(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 60202);
        assert_eq!(config.prefix, "/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.token().is_none());
        assert!(config.player().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_urls() {
        let config = RunConfig::new("example.org", 8080).with_prefix("/api/v2/");
        assert_eq!(config.base_url(), "http://example.org:8080");
        assert_eq!(config.api_base(), "http://example.org:8080/api/v2");

        let https = RunConfig::new("example.org", 443).with_scheme(Scheme::Https);
        assert_eq!(https.api_base(), "https://example.org:443/api/v1");
    }

    #[test]
    fn test_empty_token_and_player_are_absent() {
        let config = RunConfig::default().with_token("").with_player("");
        assert!(config.token().is_none());
        assert!(config.player().is_none());

        let config = RunConfig::default().with_token("secret").with_player("Steve");
        assert_eq!(config.token(), Some("secret"));
        assert_eq!(config.player(), Some("Steve"));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = RunConfig::new("localhost", 0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = RunConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeout));
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let config = RunConfig::new("  ", 60202);
        assert_eq!(config.validate(), Err(ConfigError::EmptyHost));
    }

    #[test]
    fn test_empty_prefix_mounts_api_at_root() {
        let config = RunConfig::new("127.0.0.1", 1).with_prefix("");
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base(), config.base_url());
        assert_eq!(config.api_base(), "http://127.0.0.1:1");
    }

    #[test]
    fn test_validate_rejects_relative_prefix() {
        let config = RunConfig::default().with_prefix("api/v1");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPrefix(p)) if p == "api/v1"
        ));
    }

    #[test]
    fn test_validate_rejects_malformed_host() {
        let config = RunConfig::new("bad host/with/slash", 60202);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MalformedBaseUrl { .. })
        ));
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("http".parse::<Scheme>(), Ok(Scheme::Http));
        assert_eq!("HTTPS".parse::<Scheme>(), Ok(Scheme::Https));
        assert!("ftp".parse::<Scheme>().is_err());
    }
}

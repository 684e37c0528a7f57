//! Configuration for the HTTP task gateway.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors returned while constructing gateway configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL is not an http(s) origin.
    #[error("invalid base URL '{0}', expected an http(s) origin")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to construct HTTP client: {0}")]
    Client(String),
}

/// Raw deserialization shape for [`HttpGatewayConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpGatewayConfigData {
    /// Backend origin, e.g. `https://workshop.example.com`.
    pub base_url: String,
    /// Bearer token attached to every request.
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for the task-mutation backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HttpGatewayConfigData")]
pub struct HttpGatewayConfig {
    base_url: String,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl HttpGatewayConfig {
    /// Creates a configuration pointing at the given backend origin.
    ///
    /// Trailing slashes are trimmed so endpoint paths can be appended
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the value is not an
    /// http(s) origin.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = base_url.into();
        let trimmed = raw.trim().trim_end_matches('/');
        let has_host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_host {
            return Err(ConfigError::InvalidBaseUrl(raw));
        }
        Ok(Self {
            base_url: trimmed.to_owned(),
            bearer_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Sets the bearer token attached to every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the backend origin without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the bearer token, if configured.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl TryFrom<HttpGatewayConfigData> for HttpGatewayConfig {
    type Error = ConfigError;

    fn try_from(data: HttpGatewayConfigData) -> Result<Self, Self::Error> {
        let mut config =
            Self::new(data.base_url)?.with_timeout(Duration::from_secs(data.timeout_secs));
        if let Some(token) = data.bearer_token {
            config = config.with_bearer_token(token);
        }
        Ok(config)
    }
}

//! Configuration module for the web service client.
//!
//! Covers the settings handed to the default transport plus the name of
//! the response header services use to carry diagnostic text.

use std::time::Duration;

use crate::errors::ConfigError;

/// Default request timeout (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default idle connections kept per host.
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Response header carrying service-supplied error details.
pub const DEFAULT_DIAGNOSTIC_HEADER: &str = "service_reply";

/// Default `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = concat!("integrations-webservice/", env!("CARGO_PKG_VERSION"));

/// Configuration for the web service client.
#[derive(Debug, Clone)]
pub struct WebServiceConfig {
    /// Total request timeout.
    pub timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Idle pooled connections per host.
    pub pool_max_idle_per_host: usize,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Name of the diagnostic response header.
    pub diagnostic_header: String,
    /// Whether redirects are followed by the transport.
    pub follow_redirects: bool,
}

impl Default for WebServiceConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            diagnostic_header: DEFAULT_DIAGNOSTIC_HEADER.to_string(),
            follow_redirects: true,
        }
    }
}

impl WebServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> WebServiceConfigBuilder {
        WebServiceConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `WEBSERVICE_TIMEOUT_SECS` (optional): Request timeout in seconds
    /// - `WEBSERVICE_CONNECT_TIMEOUT_SECS` (optional): Connect timeout in seconds
    /// - `WEBSERVICE_USER_AGENT` (optional): Custom user agent
    /// - `WEBSERVICE_DIAGNOSTIC_HEADER` (optional): Diagnostic header name
    /// - `WEBSERVICE_FOLLOW_REDIRECTS` (optional): `true` or `false`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = WebServiceConfigBuilder::new();

        if let Some(value) = lookup("WEBSERVICE_TIMEOUT_SECS") {
            builder = builder.timeout_secs(parse_var("WEBSERVICE_TIMEOUT_SECS", &value)?);
        }

        if let Some(value) = lookup("WEBSERVICE_CONNECT_TIMEOUT_SECS") {
            builder = builder.connect_timeout(Duration::from_secs(parse_var(
                "WEBSERVICE_CONNECT_TIMEOUT_SECS",
                &value,
            )?));
        }

        if let Some(value) = lookup("WEBSERVICE_USER_AGENT") {
            builder = builder.user_agent(value);
        }

        if let Some(value) = lookup("WEBSERVICE_DIAGNOSTIC_HEADER") {
            builder = builder.diagnostic_header(value);
        }

        if let Some(value) = lookup("WEBSERVICE_FOLLOW_REDIRECTS") {
            builder = builder.follow_redirects(parse_var("WEBSERVICE_FOLLOW_REDIRECTS", &value)?);
        }

        builder.build()
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        message: format!("{} has an invalid value: '{}'", name, value),
    })
}

/// Builder for `WebServiceConfig`.
#[derive(Debug, Default)]
pub struct WebServiceConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
    user_agent: Option<String>,
    diagnostic_header: Option<String>,
    follow_redirects: Option<bool>,
}

impl WebServiceConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the idle pool size per host.
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the diagnostic response header name.
    pub fn diagnostic_header(mut self, name: impl Into<String>) -> Self {
        self.diagnostic_header = Some(name.into());
        self
    }

    /// Enables or disables following redirects.
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = Some(follow);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Result<WebServiceConfig, ConfigError> {
        let defaults = WebServiceConfig::default();

        let timeout = self.timeout.unwrap_or(defaults.timeout);
        if timeout.is_zero() {
            return Err(ConfigError::Invalid {
                message: "Timeout must be greater than zero".to_string(),
            });
        }

        let connect_timeout = self.connect_timeout.unwrap_or(defaults.connect_timeout);
        if connect_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                message: "Connect timeout must be greater than zero".to_string(),
            });
        }

        let diagnostic_header = self
            .diagnostic_header
            .map(|name| name.trim().to_string())
            .unwrap_or(defaults.diagnostic_header);
        if http::HeaderName::from_bytes(diagnostic_header.as_bytes()).is_err() {
            return Err(ConfigError::Invalid {
                message: format!("Invalid diagnostic header name: '{}'", diagnostic_header),
            });
        }

        let user_agent = self.user_agent.unwrap_or(defaults.user_agent);
        if http::HeaderValue::from_str(&user_agent).is_err() {
            return Err(ConfigError::Invalid {
                message: "User agent contains invalid characters".to_string(),
            });
        }

        Ok(WebServiceConfig {
            timeout,
            connect_timeout,
            pool_max_idle_per_host: self
                .pool_max_idle_per_host
                .unwrap_or(defaults.pool_max_idle_per_host),
            user_agent,
            diagnostic_header,
            follow_redirects: self.follow_redirects.unwrap_or(defaults.follow_redirects),
        })
    }
}

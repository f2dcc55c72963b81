//! Logging setup and request/response log helpers.
//!
//! Library code only emits `tracing` events; applications that want them
//! on stdout can install a subscriber with [`LoggingConfig::init`].

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::types::HttpHeaders;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl From<LogLevel> for tracing::level_filters::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::level_filters::LevelFilter::TRACE,
            LogLevel::Debug => tracing::level_filters::LevelFilter::DEBUG,
            LogLevel::Info => tracing::level_filters::LevelFilter::INFO,
            LogLevel::Warn => tracing::level_filters::LevelFilter::WARN,
            LogLevel::Error => tracing::level_filters::LevelFilter::ERROR,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable format.
    #[default]
    Pretty,
    /// JSON lines.
    Json,
    /// Compact single-line format.
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Creates a new logging configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Installs a global subscriber. `RUST_LOG` directives still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already set.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let level = tracing::level_filters::LevelFilter::from(self.level);
        let filter = EnvFilter::from_default_env().add_directive(level.into());
        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init()?,
            LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
            LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
        }

        Ok(())
    }
}

/// Renders headers for logging with credentials masked.
pub fn redacted_headers(headers: &HttpHeaders) -> String {
    format!("{:?}", headers)
}

/// Logs an outgoing request.
pub fn log_request(method: &http::Method, url: &str, headers: &HttpHeaders, body_len: Option<usize>) {
    tracing::debug!(
        method = %method,
        url = url,
        headers = %redacted_headers(headers),
        body_bytes = body_len.unwrap_or(0),
        "Outgoing request"
    );
}

/// Logs a received response.
pub fn log_response(url: &str, status: http::StatusCode, body_len: usize) {
    tracing::debug!(
        url = url,
        status = status.as_u16(),
        body_bytes = body_len,
        "Response received"
    );
}

//! Error types for web service calls.
//!
//! Every failed call surfaces as one [`WebServiceError`], tagged with a
//! [`FailureKind`] that says whether the transport itself failed or the
//! service answered with an error status.

mod handler;

pub use handler::WebServiceErrorHandler;

use http::StatusCode;
use std::fmt;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for web service calls.
pub type WebServiceResult<T> = Result<T, WebServiceError>;

/// What went wrong during a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No usable response: connection, timeout, DNS, or body conversion.
    TransportFault,
    /// The service responded with a 4xx or 5xx status.
    HttpError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportFault => write!(f, "transport_fault"),
            Self::HttpError => write!(f, "http_error"),
        }
    }
}

/// A failed web service call.
///
/// Display renders the human-readable message, which always embeds the URL
/// and a status token.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct WebServiceError {
    kind: FailureKind,
    url: String,
    status: StatusCode,
    message: String,
    service_reply: Option<String>,
    #[source]
    cause: Option<TransportError>,
}

impl WebServiceError {
    /// Creates a transport fault with a synthesized status.
    pub fn transport_fault(
        url: impl Into<String>,
        status: StatusCode,
        message: impl Into<String>,
        cause: TransportError,
    ) -> Self {
        Self {
            kind: FailureKind::TransportFault,
            url: url.into(),
            status,
            message: message.into(),
            service_reply: None,
            cause: Some(cause),
        }
    }

    /// Creates an HTTP error carrying the status the service returned.
    pub fn http_error(
        url: impl Into<String>,
        status: StatusCode,
        message: impl Into<String>,
        service_reply: Option<String>,
    ) -> Self {
        Self {
            kind: FailureKind::HttpError,
            url: url.into(),
            status,
            message: message.into(),
            service_reply,
            cause: None,
        }
    }

    /// Gets the failure kind.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Gets the URL that was called.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Gets the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Gets the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the diagnostic text supplied by the service, if any.
    pub fn service_reply(&self) -> Option<&str> {
        self.service_reply.as_deref()
    }

    /// Gets the underlying transport error, if any.
    pub fn cause(&self) -> Option<&TransportError> {
        self.cause.as_ref()
    }

    /// Returns true for transport faults.
    pub fn is_transport_fault(&self) -> bool {
        self.kind == FailureKind::TransportFault
    }

    /// Returns true for error responses.
    pub fn is_http_error(&self) -> bool {
        self.kind == FailureKind::HttpError
    }

    /// Returns true if the status is in the 4xx class.
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Returns true if the status is in the 5xx class.
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}

/// Configuration and construction errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has an unusable value.
    #[error("Configuration error: {message}")]
    Invalid {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The default transport could not be created.
    #[error("Failed to build HTTP transport: {message}")]
    TransportBuild {
        /// Error message.
        message: String,
    },
}

impl From<TransportError> for ConfigError {
    fn from(err: TransportError) -> Self {
        ConfigError::TransportBuild {
            message: err.to_string(),
        }
    }
}

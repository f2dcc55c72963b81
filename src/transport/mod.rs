//! HTTP transport layer.
//!
//! The [`HttpTransport`] trait is the seam between request building and
//! actual network I/O. [`ReqwestTransport`] is the default implementation;
//! tests substitute [`crate::mocks::MockTransport`].

mod http;
mod template;

pub use self::http::ReqwestTransport;
pub use template::expand_uri_template;

use ::http::{Method, StatusCode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::types::HttpHeaders;

/// Values substituted into `{name}` placeholders of a URL template.
pub type UriParams = HashMap<String, String>;

/// A request handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL, possibly a template.
    pub url: String,
    /// Request headers.
    pub headers: HttpHeaders,
    /// Encoded request body.
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Creates a request without headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HttpHeaders::new(),
            body: None,
        }
    }

    /// Sets the headers.
    pub fn with_headers(mut self, headers: HttpHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response received by the transport, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Status text as reported by the transport.
    pub status_text: String,
    /// Response headers.
    pub headers: HttpHeaders,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response whose status text is the canonical reason phrase.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            status_text: crate::types::status::reason_phrase(status).to_string(),
            headers: HttpHeaders::new(),
            body: Vec::new(),
        }
    }

    /// Overrides the status text.
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(name, value);
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// Transport error types.
///
/// Raised by the transport itself, or while converting bodies around a
/// transport call, as opposed to an error status carried by a response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// The request could not be built (bad URL, template or header).
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Request body could not be encoded.
    #[error("Failed to write request body: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },

    /// Response body could not be decoded into the declared type.
    #[error("Failed to read response body as {type_name}: {message}")]
    Deserialization {
        /// Declared response type.
        type_name: String,
        /// Error message.
        message: String,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

/// HTTP transport trait.
///
/// Implementations only move bytes: they never inspect the status code.
/// Classification happens in the caller once the response is back.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a request to its URL as given.
    async fn exchange(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;

    /// Sends a request after expanding URL template placeholders.
    async fn exchange_with_params(
        &self,
        mut request: TransportRequest,
        uri_params: &UriParams,
    ) -> Result<TransportResponse, TransportError> {
        request.url = expand_uri_template(&request.url, uri_params)?;
        self.exchange(request).await
    }
}

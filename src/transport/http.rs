//! HTTP transport implementation using reqwest.

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use std::error::Error as StdError;
use std::time::Duration;
use tracing::instrument;

use super::{HttpTransport, TransportError, TransportRequest, TransportResponse};
use crate::config::WebServiceConfig;
use crate::types::status::{is_error, reason_phrase};
use crate::types::HttpHeaders;

/// Content type sent with a body when the caller did not choose one.
const DEFAULT_BODY_CONTENT_TYPE: &str = "application/json";

/// Default transport backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport from configuration.
    pub fn new(config: &WebServiceConfig) -> Result<Self, TransportError> {
        let redirect = if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(config.user_agent.clone())
            .redirect(redirect)
            .build()
            .map_err(|e| TransportError::Connection {
                message: error_chain(&e),
            })?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Wraps an existing client. `timeout` is only used for error reporting.
    pub fn from_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn header_map(headers: &HttpHeaders) -> Result<HeaderMap, TransportError> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers.iter_values() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                TransportError::InvalidRequest {
                    message: format!("Invalid header name '{}': {}", name, e),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| TransportError::InvalidRequest {
                    message: format!("Invalid value for header '{}': {}", name, e),
                })?;
            map.append(header_name, header_value);
        }
        Ok(map)
    }

    fn map_send_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: error_chain(&err),
            }
        } else if err.is_builder() {
            TransportError::InvalidRequest {
                message: error_chain(&err),
            }
        } else {
            TransportError::InvalidResponse {
                message: error_chain(&err),
            }
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn exchange(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = url::Url::parse(&request.url).map_err(|e| TransportError::InvalidRequest {
            message: format!("Invalid URL '{}': {}", request.url, e),
        })?;

        let mut headers = Self::header_map(&request.headers)?;
        if request.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(DEFAULT_BODY_CONTENT_TYPE),
            );
        }

        let mut req_builder = self.client.request(request.method, url).headers(headers);

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let status_text = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
            .unwrap_or_else(|| reason_phrase(status).to_string());
        let headers = HttpHeaders::from(response.headers());

        // Error responses are classified from status and headers alone.
        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) if is_error(status) => {
                tracing::warn!(
                    status = status.as_u16(),
                    error = %error_chain(&e),
                    "Discarding unreadable error response body"
                );
                Vec::new()
            }
            Err(e) => return Err(self.map_send_error(e)),
        };

        tracing::trace!(status = status.as_u16(), bytes = body.len(), "Response received");

        Ok(TransportResponse {
            status,
            status_text,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Flattens an error and its sources into one line.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

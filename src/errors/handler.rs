//! Response classification and failure formatting.

use http::StatusCode;

use super::WebServiceError;
use crate::auth::is_blank;
use crate::transport::{TransportError, TransportResponse};
use crate::types::status::{self, reason_phrase, status_token};

/// Status reported for every transport fault.
const TRANSPORT_FAULT_STATUS: StatusCode = StatusCode::SERVICE_UNAVAILABLE;

/// Turns error responses and transport faults for one URL into
/// [`WebServiceError`] values.
#[derive(Debug, Clone, Copy)]
pub struct WebServiceErrorHandler<'a> {
    url: &'a str,
    diagnostic_header: &'a str,
}

impl<'a> WebServiceErrorHandler<'a> {
    /// Creates a handler for calls to `url`.
    pub fn new(url: &'a str, diagnostic_header: &'a str) -> Self {
        Self {
            url,
            diagnostic_header,
        }
    }

    /// Returns true if the response status is in the 4xx or 5xx class.
    pub fn has_error(&self, response: &TransportResponse) -> bool {
        status::is_error(response.status)
    }

    /// Builds the failure for an error response.
    ///
    /// The message is `Web service error calling <url>:\n<text> (<token>)`,
    /// followed by ` - <reply>` when the diagnostic header is non-blank.
    pub fn handle_error(&self, response: &TransportResponse) -> WebServiceError {
        let service_reply = response
            .headers
            .get_first(self.diagnostic_header)
            .filter(|reply| !is_blank(Some(*reply)))
            .map(str::to_string);

        let mut message = format!(
            "Web service error calling {}:\n{} ({})",
            self.url,
            response.status_text,
            status_token(response.status)
        );
        if let Some(reply) = &service_reply {
            message.push_str(" - ");
            message.push_str(reply);
        }

        tracing::warn!(
            url = %self.url,
            status = response.status.as_u16(),
            service_reply = service_reply.as_deref().unwrap_or(""),
            "Web service returned an error status"
        );

        WebServiceError::http_error(self.url, response.status, message, service_reply)
    }

    /// Wraps a transport error as a service-unavailable failure.
    ///
    /// This is the only place transport errors become [`WebServiceError`]s.
    pub fn transport_fault(&self, cause: TransportError) -> WebServiceError {
        let message = format!(
            "Web service error calling {}: {} ({})\nCause: {}",
            self.url,
            reason_phrase(TRANSPORT_FAULT_STATUS),
            status_token(TRANSPORT_FAULT_STATUS),
            cause
        );

        tracing::error!(url = %self.url, error = %cause, "Web service call failed");

        WebServiceError::transport_fault(self.url, TRANSPORT_FAULT_STATUS, message, cause)
    }
}

//! Mock implementations for testing.
//!
//! [`MockTransport`] replays queued responses or faults and records every
//! request it receives, including which call form was used.

use async_trait::async_trait;
use http::{Method, StatusCode};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::transport::{
    expand_uri_template, HttpTransport, TransportError, TransportRequest, TransportResponse,
    UriParams,
};
use crate::types::HttpHeaders;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A response, error statuses included.
    Response(TransportResponse),
    /// A transport-level failure.
    Fault(TransportError),
}

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: Method,
    /// URL after template expansion.
    pub url: String,
    /// Request headers.
    pub headers: HttpHeaders,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Template parameters; `None` when the parameter-less form was used.
    pub uri_params: Option<UriParams>,
}

impl RecordedRequest {
    /// Parses the recorded body as JSON.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }
}

/// Mock HTTP transport for testing.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_reply: Mutex<Option<MockReply>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Creates a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response.
    pub fn queue_response(&self, response: TransportResponse) -> &Self {
        lock(&self.replies).push_back(MockReply::Response(response));
        self
    }

    /// Queues a JSON response with the given status.
    pub fn queue_json<T: serde::Serialize>(&self, status: StatusCode, value: &T) -> &Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        self.queue_response(
            TransportResponse::new(status)
                .with_header("content-type", "application/json")
                .with_body(body),
        )
    }

    /// Queues a transport fault.
    pub fn queue_fault(&self, fault: TransportError) -> &Self {
        lock(&self.replies).push_back(MockReply::Fault(fault));
        self
    }

    /// Sets the reply used once the queue is empty.
    pub fn set_default(&self, reply: MockReply) -> &Self {
        *lock(&self.default_reply) = Some(reply);
        self
    }

    /// Gets all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Gets the last recorded request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Clears recorded requests.
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }

    fn record(&self, request: TransportRequest, uri_params: Option<UriParams>) {
        lock(&self.requests).push(RecordedRequest {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body: request.body,
            uri_params,
        });
    }

    fn next_reply(&self) -> Result<TransportResponse, TransportError> {
        let reply = lock(&self.replies)
            .pop_front()
            .or_else(|| lock(&self.default_reply).clone());

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Fault(fault)) => Err(fault),
            None => Err(TransportError::Connection {
                message: "No mock response configured".to_string(),
            }),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn exchange(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.record(request, None);
        self.next_reply()
    }

    async fn exchange_with_params(
        &self,
        mut request: TransportRequest,
        uri_params: &UriParams,
    ) -> Result<TransportResponse, TransportError> {
        request.url = expand_uri_template(&request.url, uri_params)?;
        self.record(request, Some(uri_params.clone()));
        self.next_reply()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("request_count", &self.request_count())
            .finish()
    }
}

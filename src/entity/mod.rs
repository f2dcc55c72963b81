//! Outgoing request entities.
//!
//! An [`HttpEntity`] bundles the headers and optional body of one request.
//! It is assembled once, from caller headers plus the derived
//! `Content-Type` and `Authorization` values, and is not modified afterwards.
//!
//! Derived headers are appended to any caller-supplied entry with the same
//! name rather than replacing it, so a caller that already set
//! `Content-Type` and also passes a content type ends up with two values.

use crate::auth::{encode_basic_auth, AUTHORIZATION_HEADER, BASIC_SCHEME};
use crate::types::HttpHeaders;

/// Content type header name.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Headers and optional body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpEntity<E> {
    headers: HttpHeaders,
    body: Option<E>,
}

impl<E> HttpEntity<E> {
    /// Creates an entity from already-merged headers and a body.
    pub fn new(headers: HttpHeaders, body: Option<E>) -> Self {
        Self { headers, body }
    }

    /// Creates an entity carrying headers only.
    pub fn headers_only(headers: HttpHeaders) -> Self {
        Self {
            headers,
            body: None,
        }
    }

    /// Starts building an entity.
    pub fn builder<'a>() -> HttpEntityBuilder<'a, E> {
        HttpEntityBuilder::new()
    }

    /// Request headers.
    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    /// Request body.
    pub fn body(&self) -> Option<&E> {
        self.body.as_ref()
    }

    /// Returns true if a body is present.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Consumes the entity, returning headers and body.
    pub fn into_parts(self) -> (HttpHeaders, Option<E>) {
        (self.headers, self.body)
    }
}

impl<E> Default for HttpEntity<E> {
    fn default() -> Self {
        Self::headers_only(HttpHeaders::new())
    }
}

/// Builder for [`HttpEntity`].
///
/// ```
/// use integrations_webservice::entity::HttpEntity;
/// use integrations_webservice::types::HttpHeaders;
///
/// let caller = HttpHeaders::new().with("Accept", "application/json");
/// let entity = HttpEntity::builder()
///     .headers(&caller)
///     .body(serde_json::json!({"name": "widget"}))
///     .content_type("application/json")
///     .basic_auth("user", "pass")
///     .build();
///
/// assert_eq!(entity.headers().get_first("Authorization"), Some("Basic dXNlcjpwYXNz"));
/// ```
#[derive(Debug)]
pub struct HttpEntityBuilder<'a, E> {
    headers: Option<&'a HttpHeaders>,
    body: Option<E>,
    content_type: Option<&'a str>,
    username: Option<&'a str>,
    password: Option<&'a str>,
}

impl<'a, E> HttpEntityBuilder<'a, E> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            headers: None,
            body: None,
            content_type: None,
            username: None,
            password: None,
        }
    }

    /// Caller headers, copied into the entity.
    pub fn headers(mut self, headers: &'a HttpHeaders) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Optional caller headers.
    pub fn maybe_headers(mut self, headers: Option<&'a HttpHeaders>) -> Self {
        self.headers = headers;
        self
    }

    /// Request body.
    pub fn body(mut self, body: E) -> Self {
        self.body = Some(body);
        self
    }

    /// Optional request body.
    pub fn maybe_body(mut self, body: Option<E>) -> Self {
        self.body = body;
        self
    }

    /// Content type appended as a `Content-Type` header.
    pub fn content_type(mut self, content_type: &'a str) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Basic authentication credentials.
    pub fn basic_auth(mut self, username: &'a str, password: &'a str) -> Self {
        self.username = Some(username);
        self.password = Some(password);
        self
    }

    /// Assembles the entity.
    pub fn build(self) -> HttpEntity<E> {
        create_http_entity(
            self.headers,
            self.body,
            self.content_type,
            self.username,
            self.password,
        )
    }
}

impl<E> Default for HttpEntityBuilder<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembles an [`HttpEntity`].
///
/// Every caller header is copied into a fresh collection. A present
/// `content_type` is appended under `Content-Type`. When both credentials
/// are non-blank, `Authorization: Basic <base64>` is appended.
pub fn create_http_entity<E>(
    headers: Option<&HttpHeaders>,
    body: Option<E>,
    content_type: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
) -> HttpEntity<E> {
    let mut merged = HttpHeaders::new();

    if let Some(caller) = headers {
        for (name, values) in caller.iter() {
            merged.put(name, values.to_vec());
        }
    }

    if let Some(content_type) = content_type {
        merged.add(CONTENT_TYPE_HEADER, content_type);
    }

    if let Some(encoded) = encode_basic_auth(username, password) {
        merged.add(
            AUTHORIZATION_HEADER,
            format!("{} {}", BASIC_SCHEME, encoded),
        );
    }

    HttpEntity::new(merged, body)
}

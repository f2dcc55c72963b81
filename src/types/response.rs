//! Typed response values handed back to callers.

use http::StatusCode;
use std::fmt;
use std::marker::PhantomData;

use super::headers::HttpHeaders;
use super::status::StatusSeries;

/// A non-error response with its body decoded into `T`.
///
/// Receiving one does not mean the call succeeded in the caller's terms:
/// 1xx and 3xx responses are returned as well, so inspect
/// [`ResponseEntity::status`] when those distinctions matter.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntity<T> {
    status: StatusCode,
    headers: HttpHeaders,
    body: Option<T>,
}

impl<T> ResponseEntity<T> {
    /// Creates a response entity.
    pub fn new(status: StatusCode, headers: HttpHeaders, body: Option<T>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status class.
    pub fn series(&self) -> Option<StatusSeries> {
        StatusSeries::of(self.status)
    }

    /// Response headers.
    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    /// Decoded body, `None` when the response carried no content.
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// Returns true if a body was decoded.
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Consumes the entity, returning the body.
    pub fn into_body(self) -> Option<T> {
        self.body
    }

    /// Consumes the entity, returning all parts.
    pub fn into_parts(self) -> (StatusCode, HttpHeaders, Option<T>) {
        (self.status, self.headers, self.body)
    }
}

/// Describes a parameterized response shape such as `Vec<Item>` or
/// `HashMap<String, Item>`.
///
/// Carries no data, only the target type and its name for diagnostics.
pub struct TypeReference<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypeReference<T> {
    /// Creates a descriptor for `T`.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Fully qualified name of the described type.
    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

impl<T> Default for TypeReference<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypeReference<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypeReference<T> {}

impl<T> fmt::Debug for TypeReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeReference")
            .field(&self.type_name())
            .finish()
    }
}

//! HTTP status classification helpers.

use http::StatusCode;
use std::fmt;

/// The class of an HTTP status code, taken from its leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusSeries {
    /// 1xx.
    Informational,
    /// 2xx.
    Successful,
    /// 3xx.
    Redirection,
    /// 4xx.
    ClientError,
    /// 5xx.
    ServerError,
}

impl StatusSeries {
    /// Resolves the series of a status code. Codes above 5xx have none.
    pub fn of(status: StatusCode) -> Option<Self> {
        match status.as_u16() / 100 {
            1 => Some(Self::Informational),
            2 => Some(Self::Successful),
            3 => Some(Self::Redirection),
            4 => Some(Self::ClientError),
            5 => Some(Self::ServerError),
            _ => None,
        }
    }

    /// Returns true for the client and server error classes.
    pub fn is_error(self) -> bool {
        matches!(self, Self::ClientError | Self::ServerError)
    }
}

impl fmt::Display for StatusSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Informational => write!(f, "informational"),
            Self::Successful => write!(f, "successful"),
            Self::Redirection => write!(f, "redirection"),
            Self::ClientError => write!(f, "client_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Returns true if `status` belongs to the 4xx or 5xx class.
pub fn is_error(status: StatusCode) -> bool {
    StatusSeries::of(status).is_some_and(StatusSeries::is_error)
}

/// Canonical reason phrase, or an empty string for unregistered codes.
pub fn reason_phrase(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("")
}

/// Error names that do not follow from the canonical reason phrase, or
/// whose code has none.
const NAME_OVERRIDES: &[(u16, &str)] = &[
    (416, "REQUESTED_RANGE_NOT_SATISFIABLE"),
    (418, "I_AM_A_TEAPOT"),
    (419, "INSUFFICIENT_SPACE_ON_RESOURCE"),
    (420, "METHOD_FAILURE"),
    (425, "TOO_EARLY"),
    (509, "BANDWIDTH_LIMIT_EXCEEDED"),
];

/// Renders a status as `"<code> <NAME>"`, e.g. `404 NOT_FOUND`.
///
/// The name is the canonical reason phrase upper-cased, with every run of
/// non-alphanumeric characters collapsed into a single `_`, except for a
/// few error codes with fixed names. Other codes without a canonical reason
/// render as the bare number.
pub fn status_token(status: StatusCode) -> String {
    if let Some((_, name)) = NAME_OVERRIDES
        .iter()
        .find(|(code, _)| *code == status.as_u16())
    {
        return format!("{} {}", status.as_u16(), name);
    }

    let reason = reason_phrase(status);
    if reason.is_empty() {
        return status.as_u16().to_string();
    }

    let mut name = String::with_capacity(reason.len());
    let mut pending_sep = false;
    for ch in reason.chars() {
        if ch == '\'' {
            continue;
        }
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !name.is_empty() {
                name.push('_');
            }
            pending_sep = false;
            name.push(ch.to_ascii_uppercase());
        } else {
            pending_sep = true;
        }
    }

    format!("{} {}", status.as_u16(), name)
}

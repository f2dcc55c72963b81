//! Shared value types: headers, status classification, response entities.

mod headers;
mod response;
pub mod status;

pub use headers::HttpHeaders;
pub use response::{ResponseEntity, TypeReference};
pub use status::StatusSeries;

//! Web Service Client Library
//!
//! A thin layer for consuming REST web services: it assembles request
//! entities, adds Basic authentication, dispatches through a pluggable
//! HTTP transport, and translates every failure into one error type that
//! names the URL and the status.
//!
//! # Features
//!
//! - **Entity Builder**: caller headers, `Content-Type`, and Basic auth merged into one request entity
//! - **Uniform Errors**: transport faults and error statuses both surface as [`WebServiceError`]
//! - **Service Diagnostics**: a `service_reply` response header is appended to error messages
//! - **URI Templates**: `{name}` placeholders expanded from a parameter map
//! - **Pluggable Transport**: reqwest by default, any [`HttpTransport`] for tests or custom stacks
//! - **Observability**: `tracing` spans and events with credentials redacted
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_webservice::{Method, RestClientService, UriParams};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct NewOrder {
//!     sku: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Order {
//!     id: u64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClientService::new()?;
//!
//!     let mut params = UriParams::new();
//!     params.insert("tenant".to_string(), "acme".to_string());
//!
//!     let created = client
//!         .exchange_basic_auth::<NewOrder, Order>(
//!             "https://orders.example.com/{tenant}/orders",
//!             Method::POST,
//!             "svc-user",
//!             "svc-password",
//!             None,
//!             Some(NewOrder { sku: "A-1".to_string() }),
//!             Some(&params),
//!         )
//!         .await;
//!
//!     match created {
//!         Ok(response) => println!("created {:?}", response.body().map(|o| o.id)),
//!         Err(err) => eprintln!("{} ({})", err, err.kind()),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod entity;
pub mod errors;
pub mod observability;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{RestClientService, RestClientServiceBuilder};
pub use config::WebServiceConfig;
pub use errors::{ConfigError, FailureKind, WebServiceError, WebServiceResult};

pub use auth::{encode_basic_auth, Credentials};
pub use entity::{create_http_entity, HttpEntity, HttpEntityBuilder};
pub use transport::{HttpTransport, ReqwestTransport, UriParams};
pub use types::{HttpHeaders, ResponseEntity, StatusSeries, TypeReference};

pub use http::{Method, StatusCode};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

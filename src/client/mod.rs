//! Web service client.
//!
//! [`RestClientService`] assembles a request entity, hands it to the
//! transport, and turns what comes back into either a typed
//! [`ResponseEntity`] or a [`WebServiceError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use integrations_webservice::{HttpHeaders, RestClientService};
//! use http::Method;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Order {
//!     id: u64,
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RestClientService::new()?;
//! let headers = HttpHeaders::new().with("Accept", "application/json");
//!
//! let response = client
//!     .exchange_basic_auth::<(), Order>(
//!         "https://orders.example.com/api/orders/7",
//!         Method::GET,
//!         "svc-user",
//!         "svc-password",
//!         Some(&headers),
//!         None,
//!         None,
//!     )
//!     .await?;
//!
//! println!("{:?}", response.body());
//! # Ok(())
//! # }
//! ```

use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

use crate::auth::Credentials;
use crate::config::WebServiceConfig;
use crate::entity::{create_http_entity, HttpEntity};
use crate::errors::{ConfigError, WebServiceErrorHandler, WebServiceResult};
use crate::observability::{log_request, log_response};
use crate::transport::{
    HttpTransport, ReqwestTransport, TransportError, TransportRequest, UriParams,
};
use crate::types::{HttpHeaders, ResponseEntity, TypeReference};

/// Client for consuming web services.
///
/// Holds no per-call state; share it behind an `Arc` freely.
#[derive(Clone)]
pub struct RestClientService {
    transport: Arc<dyn HttpTransport>,
    diagnostic_header: String,
}

impl RestClientService {
    /// Creates a client with the default reqwest transport.
    pub fn new() -> Result<Self, ConfigError> {
        Self::builder().build()
    }

    /// Creates a client with the default transport built from `config`.
    pub fn with_config(config: WebServiceConfig) -> Result<Self, ConfigError> {
        Self::builder().config(config).build()
    }

    /// Creates a client around an existing transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            diagnostic_header: crate::config::DEFAULT_DIAGNOSTIC_HEADER.to_string(),
        }
    }

    /// Creates a new client builder.
    pub fn builder() -> RestClientServiceBuilder {
        RestClientServiceBuilder::new()
    }

    /// Name of the response header read for diagnostic text.
    pub fn diagnostic_header(&self) -> &str {
        &self.diagnostic_header
    }

    /// Calls a web service with caller headers and an optional body.
    pub async fn exchange<REQ, RES>(
        &self,
        url: &str,
        method: Method,
        headers: Option<&HttpHeaders>,
        request: Option<REQ>,
        uri_params: Option<&UriParams>,
    ) -> WebServiceResult<ResponseEntity<RES>>
    where
        REQ: Serialize + Send + Sync,
        RES: DeserializeOwned,
    {
        let entity = create_http_entity(headers, request, None, None, None);
        self.exchange_entity(&entity, url, method, uri_params).await
    }

    /// Calls a web service using Basic authentication.
    ///
    /// Blank credentials send no `Authorization` header.
    #[allow(clippy::too_many_arguments)]
    pub async fn exchange_basic_auth<REQ, RES>(
        &self,
        url: &str,
        method: Method,
        username: &str,
        password: &str,
        headers: Option<&HttpHeaders>,
        request: Option<REQ>,
        uri_params: Option<&UriParams>,
    ) -> WebServiceResult<ResponseEntity<RES>>
    where
        REQ: Serialize + Send + Sync,
        RES: DeserializeOwned,
    {
        let entity = create_http_entity(headers, request, None, Some(username), Some(password));
        self.exchange_entity(&entity, url, method, uri_params).await
    }

    /// Calls a web service using stored Basic-auth credentials.
    pub async fn exchange_with_credentials<REQ, RES>(
        &self,
        url: &str,
        method: Method,
        credentials: &Credentials,
        headers: Option<&HttpHeaders>,
        request: Option<REQ>,
        uri_params: Option<&UriParams>,
    ) -> WebServiceResult<ResponseEntity<RES>>
    where
        REQ: Serialize + Send + Sync,
        RES: DeserializeOwned,
    {
        let entity = HttpEntity::builder()
            .maybe_headers(headers)
            .maybe_body(request)
            .basic_auth(credentials.username(), credentials.password())
            .build();
        self.exchange_entity(&entity, url, method, uri_params).await
    }

    /// Sends a prepared entity, decoding the body into `RES`.
    pub async fn exchange_entity<REQ, RES>(
        &self,
        entity: &HttpEntity<REQ>,
        url: &str,
        method: Method,
        uri_params: Option<&UriParams>,
    ) -> WebServiceResult<ResponseEntity<RES>>
    where
        REQ: Serialize + Sync,
        RES: DeserializeOwned,
    {
        self.dispatch(entity, url, method, TypeReference::new(), uri_params)
            .await
    }

    /// Sends a prepared entity, decoding the body into the shape described
    /// by `response_type`, e.g. `TypeReference::<Vec<Order>>::new()`.
    pub async fn exchange_entity_as<REQ, RES>(
        &self,
        entity: &HttpEntity<REQ>,
        url: &str,
        method: Method,
        response_type: TypeReference<RES>,
        uri_params: Option<&UriParams>,
    ) -> WebServiceResult<ResponseEntity<RES>>
    where
        REQ: Serialize + Sync,
        RES: DeserializeOwned,
    {
        self.dispatch(entity, url, method, response_type, uri_params)
            .await
    }

    #[instrument(skip_all, fields(method = %method, url = %url, response_type = response_type.type_name()))]
    async fn dispatch<REQ, RES>(
        &self,
        entity: &HttpEntity<REQ>,
        url: &str,
        method: Method,
        response_type: TypeReference<RES>,
        uri_params: Option<&UriParams>,
    ) -> WebServiceResult<ResponseEntity<RES>>
    where
        REQ: Serialize + Sync,
        RES: DeserializeOwned,
    {
        let handler = WebServiceErrorHandler::new(url, &self.diagnostic_header);

        match self
            .round_trip(entity, url, method, response_type, uri_params, &handler)
            .await
        {
            Ok(outcome) => outcome,
            Err(cause) => Err(handler.transport_fault(cause)),
        }
    }

    /// The outer `Err` is a transport fault; the inner result is the
    /// classified response.
    async fn round_trip<REQ, RES>(
        &self,
        entity: &HttpEntity<REQ>,
        url: &str,
        method: Method,
        response_type: TypeReference<RES>,
        uri_params: Option<&UriParams>,
        handler: &WebServiceErrorHandler<'_>,
    ) -> Result<WebServiceResult<ResponseEntity<RES>>, TransportError>
    where
        REQ: Serialize + Sync,
        RES: DeserializeOwned,
    {
        let body = entity
            .body()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| TransportError::Serialization {
                message: e.to_string(),
            })?;

        log_request(&method, url, entity.headers(), body.as_ref().map(Vec::len));

        let mut request = TransportRequest::new(method, url).with_headers(entity.headers().clone());
        request.body = body;

        let response = match uri_params.filter(|params| !params.is_empty()) {
            Some(params) => self.transport.exchange_with_params(request, params).await?,
            None => self.transport.exchange(request).await?,
        };

        log_response(url, response.status, response.body.len());

        if handler.has_error(&response) {
            return Ok(Err(handler.handle_error(&response)));
        }

        let body = decode_body(&response.body, response_type)?;
        Ok(Ok(ResponseEntity::new(response.status, response.headers, body)))
    }
}

/// Decodes a JSON body; an empty body decodes to `None`.
fn decode_body<RES: DeserializeOwned>(
    body: &[u8],
    response_type: TypeReference<RES>,
) -> Result<Option<RES>, TransportError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| TransportError::Deserialization {
            type_name: response_type.type_name().to_string(),
            message: e.to_string(),
        })
}

impl std::fmt::Debug for RestClientService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClientService")
            .field("diagnostic_header", &self.diagnostic_header)
            .finish()
    }
}

/// Builder for the web service client.
#[derive(Default)]
pub struct RestClientServiceBuilder {
    config: Option<WebServiceConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl RestClientServiceBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: WebServiceConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a custom transport. The configuration then only supplies the
    /// diagnostic header name.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<RestClientService, ConfigError> {
        let config = self.config.unwrap_or_default();

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };

        tracing::debug!(
            diagnostic_header = %config.diagnostic_header,
            "Web service client created"
        );

        Ok(RestClientService {
            transport,
            diagnostic_header: config.diagnostic_header,
        })
    }
}

impl std::fmt::Debug for RestClientServiceBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClientServiceBuilder")
            .field("config", &self.config)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

//! End-to-end tests for the web service client over the reqwest transport.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use integrations_webservice::{
    FailureKind, HttpHeaders, Method, RestClientService, StatusCode, TypeReference, UriParams,
    WebServiceConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: u64,
    sku: String,
}

fn client() -> RestClientService {
    RestClientService::new().expect("Failed to build client")
}

/// Serves one connection: reads the request head, writes `reply` verbatim,
/// then closes. Returns the base URL.
async fn serve_raw_once(reply: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        socket.write_all(reply.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_get_decodes_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "sku": "A-1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/orders/7", mock_server.uri());
    let response = client()
        .exchange::<(), Order>(&url, Method::GET, None, None, None)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.into_body(),
        Some(Order {
            id: 7,
            sku: "A-1".to_string()
        })
    );
}

#[tokio::test]
async fn test_post_sends_json_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("content-type", "application/json"))
        .and(header("x-tenant", "acme"))
        .and(body_json(json!({"id": 0, "sku": "B-2"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 8, "sku": "B-2"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/orders", mock_server.uri());
    let headers = HttpHeaders::new().with("X-Tenant", "acme");
    let order = Order {
        id: 0,
        sku: "B-2".to_string(),
    };

    let response = client()
        .exchange::<Order, Order>(&url, Method::POST, Some(&headers), Some(order), None)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.body().map(|o| o.id), Some(8));
}

#[tokio::test]
async fn test_basic_auth_header_reaches_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/secure", mock_server.uri());
    let response = client()
        .exchange_basic_auth::<(), Order>(&url, Method::GET, "user", "pass", None, None, None)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(!response.has_body());
}

#[tokio::test]
async fn test_uri_params_are_expanded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/acme/orders/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 42, "sku": "C"}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let template = format!("{}/{{tenant}}/orders/{{id}}", mock_server.uri());
    let params: UriParams = [
        ("tenant".to_string(), "acme".to_string()),
        ("id".to_string(), "42".to_string()),
    ]
    .into_iter()
    .collect();

    let entity = integrations_webservice::HttpEntity::<()>::default();
    let response = client()
        .exchange_entity_as(
            &entity,
            &template,
            Method::GET,
            TypeReference::<Vec<Order>>::new(),
            Some(&params),
        )
        .await
        .unwrap();

    assert_eq!(response.into_body().map(|orders| orders.len()), Some(1));
}

#[tokio::test]
async fn test_not_found_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/orders/404", mock_server.uri());
    let err = client()
        .exchange::<(), Order>(&url, Method::GET, None, None, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::HttpError);
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        err.to_string(),
        format!("Web service error calling {}:\nNot Found (404 NOT_FOUND)", url)
    );
}

#[tokio::test]
async fn test_server_error_carries_service_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("service_reply", "db timeout")
                .set_body_string("Internal Server Error"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/orders", mock_server.uri());
    let err = client()
        .exchange::<(), Order>(&url, Method::GET, None, None, None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        err.message(),
        format!(
            "Web service error calling {}:\nInternal Server Error (500 INTERNAL_SERVER_ERROR) - db timeout",
            url
        )
    );
    assert_eq!(err.service_reply(), Some("db timeout"));
}

#[tokio::test]
async fn test_redirect_returned_when_not_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/elsewhere"))
        .mount(&mock_server)
        .await;

    let config = WebServiceConfig::builder()
        .follow_redirects(false)
        .build()
        .unwrap();
    let client = RestClientService::with_config(config).unwrap();

    let url = format!("{}/moved", mock_server.uri());
    let response = client
        .exchange::<(), Order>(&url, Method::GET, None, None, None)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get_first("Location"), Some("/elsewhere"));
}

#[tokio::test]
async fn test_timeout_is_transport_fault() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let config = WebServiceConfig::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let client = RestClientService::with_config(config).unwrap();

    let url = format!("{}/slow", mock_server.uri());
    let err = client
        .exchange::<(), Order>(&url, Method::GET, None, None, None)
        .await
        .unwrap_err();

    assert!(err.is_transport_fault());
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unreachable_host_is_transport_fault() {
    let url = "http://127.0.0.1:1/orders";

    let err = client()
        .exchange::<(), Order>(url, Method::GET, None, None, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::TransportFault);
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(err.message().starts_with(
        "Web service error calling http://127.0.0.1:1/orders: Service Unavailable (503 SERVICE_UNAVAILABLE)\nCause: "
    ));
    assert!(err.cause().is_some());
}

#[tokio::test]
async fn test_server_reason_phrase_is_kept() {
    let base = serve_raw_once(
        "HTTP/1.1 400 Order Rejected\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
    )
    .await;

    let url = format!("{}/orders", base);
    let err = client()
        .exchange::<(), Order>(&url, Method::GET, None, None, None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        err.message(),
        format!("Web service error calling {}:\nOrder Rejected (400 BAD_REQUEST)", url)
    );
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status_and_reply() {
    let base = serve_raw_once(
        "HTTP/1.1 500 Internal Server Error\r\nservice_reply: db down\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
    )
    .await;

    let url = format!("{}/orders", base);
    let err = client()
        .exchange::<(), Order>(&url, Method::GET, None, None, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::HttpError);
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.service_reply(), Some("db down"));
    assert!(err.message().ends_with("(500 INTERNAL_SERVER_ERROR) - db down"));
}

#[tokio::test]
async fn test_truncated_success_body_is_transport_fault() {
    let base = serve_raw_once(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\nConnection: close\r\n\r\n{\"id\"",
    )
    .await;

    let url = format!("{}/orders/7", base);
    let err = client()
        .exchange::<(), Order>(&url, Method::GET, None, None, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::TransportFault);
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}

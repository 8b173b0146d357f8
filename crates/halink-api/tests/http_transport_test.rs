#![allow(clippy::unwrap_used)]
// End-to-end tests for the real delivery mechanisms using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use halink_api::{
    Classification, ReqwestTransport, Transport, TransportClient, TransportConfig,
    TransportRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn client() -> TransportClient {
    TransportClient::from_config(&TransportConfig::default()).unwrap()
}

fn token() -> SecretString {
    "abc123".to_string().into()
}

fn url(server: &MockServer, suffix: &str) -> Url {
    Url::parse(&format!("{}{suffix}", server.uri())).unwrap()
}

/// A localhost URL on a port nothing listens on.
fn dead_url() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{port}/api")).unwrap()
}

// ── Primary mechanism ───────────────────────────────────────────────

#[tokio::test]
async fn test_reqwest_transport_sends_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/services/light/turn_off"))
        .and(header("X-Probe", "1"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "entity_id": "light.hall" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let transport = ReqwestTransport::with_client(reqwest::Client::new());
    let request = TransportRequest::post_json(
        url(&server, "/api/services/light/turn_off"),
        r#"{"entity_id":"light.hall"}"#.into(),
    )
    .with_header("X-Probe", "1");

    let raw = transport.execute(&request).await;

    assert_eq!(raw.status, 200);
    assert_eq!(raw.body.as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_reqwest_transport_reports_no_exchange_as_zero() {
    let dead = dead_url();

    let transport = ReqwestTransport::with_client(reqwest::Client::new());
    let raw = transport.execute(&TransportRequest::get(dead)).await;

    assert_eq!(raw.status, 0);
    assert!(raw.error.is_some());
}

// ── Full pipeline ───────────────────────────────────────────────────

#[tokio::test]
async fn test_primary_success_hits_server_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "API running." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = client()
        .send(TransportRequest::get(url(&server, "/api")), &token())
        .await
        .unwrap();

    assert!(body.contains("API running."));
}

#[cfg(feature = "fallback")]
#[tokio::test]
async fn test_unauthorized_is_retried_on_fallback_then_classified() {
    let server = MockServer::start().await;

    // Once by reqwest, once by ureq.
    Mock::given(method("POST"))
        .and(path("/api/services/light/turn_on"))
        .respond_with(ResponseTemplate::new(401).set_body_string("401: Unauthorized"))
        .expect(2)
        .mount(&server)
        .await;

    let err = client()
        .send(
            TransportRequest::post_json(url(&server, "/api/services/light/turn_on"), "{}".into()),
            &token(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.classification(), Some(Classification::Unauthorized));
}

#[cfg(feature = "fallback")]
#[tokio::test]
async fn test_empty_primary_body_accepted_from_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let body = client()
        .send(TransportRequest::get(url(&server, "/api")), &token())
        .await
        .unwrap();

    assert_eq!(body, "");
}

#[cfg(feature = "fallback")]
#[tokio::test]
async fn test_server_error_detail_is_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/states/light.kitchen"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client()
        .send(
            TransportRequest::get(url(&server, "/api/states/light.kitchen")),
            &token(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.classification(), Some(Classification::HttpError));
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("boom"));
}

#[cfg(feature = "fallback")]
#[tokio::test]
async fn test_dead_host_is_unreachable() {
    let dead = dead_url();

    let err = client()
        .send(TransportRequest::get(dead), &token())
        .await
        .unwrap_err();

    assert_eq!(err.classification(), Some(Classification::Unreachable));
    assert_eq!(err.status(), Some(0));
}

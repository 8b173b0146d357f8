#![allow(clippy::unwrap_used)]
// Fallback and classification tests for `TransportClient` using
// call-counting stub mechanisms.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use url::Url;

use halink_api::{
    Classification, DiagnosticSink, Error, NoFallback, RawResponse, Transport, TransportClient,
    TransportRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct Stub {
    name: &'static str,
    response: RawResponse,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<TransportRequest>>>,
}

impl Stub {
    fn new(name: &'static str, response: RawResponse) -> Self {
        Self {
            name,
            response,
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> TransportRequest {
        self.last_request.lock().unwrap().clone().unwrap()
    }
}

impl Transport for Stub {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn execute(&self, request: &TransportRequest) -> RawResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.response.clone()
    }
}

#[derive(Default)]
struct RecordingSink {
    records: Mutex<Vec<(String, String)>>,
}

impl DiagnosticSink for RecordingSink {
    fn trace(&self, category: &str, payload: &str) {
        self.records
            .lock()
            .unwrap()
            .push((category.to_owned(), payload.to_owned()));
    }
}

fn token() -> SecretString {
    SecretString::from("abc123".to_owned())
}

fn post() -> TransportRequest {
    let url = Url::parse("http://hub.local:8123/api/services/light/turn_on").unwrap();
    TransportRequest::post_json(url, r#"{"entity_id":"light.kitchen"}"#.into())
}

fn pair(primary: RawResponse, fallback: RawResponse) -> (Stub, Stub, TransportClient<Stub, Stub>) {
    let p = Stub::new("primary", primary);
    let s = Stub::new("secondary", fallback);
    let client = TransportClient::new(p.clone(), Some(s.clone()));
    (p, s, client)
}

// ── Fallback behavior ───────────────────────────────────────────────

#[tokio::test]
async fn test_primary_success_skips_fallback() {
    let (p, s, client) = pair(RawResponse::new(200, "[{}]"), RawResponse::new(200, "x"));

    let body = client.send(post(), &token()).await.unwrap();

    assert_eq!(body, "[{}]");
    assert_eq!(p.calls(), 1);
    assert_eq!(s.calls(), 0);
}

#[tokio::test]
async fn test_empty_primary_falls_back_once() {
    let (p, s, client) = pair(RawResponse::new(200, ""), RawResponse::new(200, "[]"));

    let body = client.send(post(), &token()).await.unwrap();

    assert_eq!(body, "[]");
    assert_eq!(p.calls(), 1);
    assert_eq!(s.calls(), 1);
}

#[tokio::test]
async fn test_failed_primary_falls_back_once() {
    let (p, s, client) = pair(
        RawResponse::unreachable("connection refused"),
        RawResponse::new(200, "[]"),
    );

    assert_eq!(client.send(post(), &token()).await.unwrap(), "[]");
    assert_eq!(p.calls(), 1);
    assert_eq!(s.calls(), 1);
}

#[tokio::test]
async fn test_primary_http_error_is_not_trusted() {
    // A primary 500 never surfaces directly; the fallback decides.
    let (_, s, client) = pair(RawResponse::new(500, "boom"), RawResponse::new(200, "[]"));

    assert_eq!(client.send(post(), &token()).await.unwrap(), "[]");
    assert_eq!(s.calls(), 1);
}

#[tokio::test]
async fn test_no_fallback_is_transport_unavailable() {
    let p = Stub::new("primary", RawResponse::unreachable("refused"));
    let client: TransportClient<Stub, NoFallback> = TransportClient::new(p.clone(), None);

    let result = client.send(post(), &token()).await;

    assert!(
        matches!(result, Err(Error::TransportUnavailable)),
        "expected TransportUnavailable, got: {result:?}"
    );
    assert_eq!(p.calls(), 1);
}

// ── Classification ──────────────────────────────────────────────────

#[tokio::test]
async fn test_fallback_401_is_unauthorized() {
    let (_, _, client) = pair(RawResponse::new(401, ""), RawResponse::new(401, ""));

    let err = client.send(post(), &token()).await.unwrap_err();

    assert_eq!(err.classification(), Some(Classification::Unauthorized));
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_fallback_0_is_unreachable() {
    let (_, _, client) = pair(
        RawResponse::unreachable("dns"),
        RawResponse::unreachable("dns"),
    );

    let err = client.send(post(), &token()).await.unwrap_err();

    assert_eq!(err.classification(), Some(Classification::Unreachable));
    assert!(err.is_unreachable());
}

#[tokio::test]
async fn test_fallback_500_carries_body() {
    let (_, _, client) = pair(RawResponse::new(500, "boom"), RawResponse::new(500, "boom"));

    let err = client.send(post(), &token()).await.unwrap_err();

    assert_eq!(err.classification(), Some(Classification::HttpError));
    assert!(err.to_string().contains("boom"), "{err}");
}

#[tokio::test]
async fn test_fallback_403_and_404() {
    let (_, _, client) = pair(RawResponse::new(403, ""), RawResponse::new(403, ""));
    let err = client.send(post(), &token()).await.unwrap_err();
    assert_eq!(err.classification(), Some(Classification::Forbidden));

    let (_, _, client) = pair(RawResponse::new(404, ""), RawResponse::new(404, ""));
    let err = client.send(post(), &token()).await.unwrap_err();
    assert_eq!(err.classification(), Some(Classification::NotFound));
}

// ── Credentials ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_token_makes_no_network_calls() {
    let (p, s, client) = pair(RawResponse::new(200, "[]"), RawResponse::new(200, "[]"));

    for blank in ["", "   "] {
        let result = client.send(post(), &SecretString::from(blank.to_owned())).await;
        assert!(
            matches!(result, Err(Error::Configuration(ref m)) if m == "token is empty"),
            "expected Configuration error, got: {result:?}"
        );
    }

    assert_eq!(p.calls(), 0);
    assert_eq!(s.calls(), 0);
}

#[tokio::test]
async fn test_bearer_header_is_trimmed_and_first() {
    let (p, s, client) = pair(RawResponse::new(200, ""), RawResponse::new(200, "[]"));

    client
        .send(post(), &SecretString::from("  abc123\n".to_owned()))
        .await
        .unwrap();

    for seen in [p.last_request(), s.last_request()] {
        assert_eq!(
            seen.headers[0],
            ("Authorization".to_owned(), "Bearer abc123".to_owned())
        );
        assert_eq!(seen.header("content-type"), Some("application/json"));
    }
}

// ── Diagnostics ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_trace_records_each_stage() {
    let sink = Arc::new(RecordingSink::default());
    let (_, _, client) = pair(
        RawResponse::unreachable("refused"),
        RawResponse::new(200, "[]"),
    );
    let client = client.with_sink(sink.clone());

    client.send(post(), &token()).await.unwrap();

    let records = sink.records.lock().unwrap();
    let categories: Vec<&str> = records.iter().map(|(c, _)| c.as_str()).collect();
    assert_eq!(
        categories,
        [
            "POST URL",
            "POST Body",
            "primary status",
            "primary error",
            "secondary status",
        ]
    );
    assert_eq!(records[2].1, "0");
    assert!(
        records.iter().all(|(_, payload)| !payload.contains("abc123")),
        "token leaked into diagnostics"
    );
}

// Delivery mechanisms and the request/response shapes they share.
//
// The primary mechanism is the pooled async `reqwest` client. The fallback
// mechanism is a separate blocking `ureq` stack, compiled in with the
// `fallback` feature. Both speak `TransportRequest` -> `RawResponse` and
// never classify anything themselves; that happens in `client`.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use url::Url;

#[cfg(feature = "fallback")]
pub mod fallback;
pub mod http;

/// Request timeout for service calls (POST).
pub const POST_TIMEOUT: Duration = Duration::from_millis(5000);
/// Request timeout for connectivity probes and state reads (GET).
pub const GET_TIMEOUT: Duration = Duration::from_millis(3000);
/// Connect timeout of the fallback mechanism.
pub const FALLBACK_CONNECT_TIMEOUT: Duration = Duration::from_millis(3000);
/// Overall timeout of the fallback mechanism.
pub const FALLBACK_TIMEOUT: Duration = Duration::from_millis(5000);

pub(crate) const USER_AGENT: &str = concat!("halink/", env!("CARGO_PKG_VERSION"));

/// HTTP verbs used against the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
        }
    }
}

/// A single outbound request, built fresh per call.
#[derive(Clone)]
pub struct TransportRequest {
    pub url: Url,
    pub method: Method,
    /// Ordered `(name, value)` pairs, sent as given.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl TransportRequest {
    /// A bodiless GET with the probe/read timeout.
    pub fn get(url: Url) -> Self {
        Self {
            url,
            method: Method::Get,
            headers: Vec::new(),
            body: None,
            timeout: GET_TIMEOUT,
        }
    }

    /// A POST carrying a JSON document, with the service-call timeout.
    pub fn post_json(url: Url, body: String) -> Self {
        Self {
            url,
            method: Method::Post,
            headers: vec![("Content-Type".into(), "application/json".into())],
            body: Some(body),
            timeout: POST_TIMEOUT,
        }
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of the named header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<String> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    format!("{name}: ****")
                } else {
                    format!("{name}: {value}")
                }
            })
            .collect();

        f.debug_struct("TransportRequest")
            .field("url", &self.url.as_str())
            .field("method", &self.method)
            .field("headers", &headers)
            .field("body", &self.body)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// What a mechanism observed, before classification.
///
/// `status == 0` means no HTTP exchange happened (DNS, refused, timeout).
/// `body` is `None` when the body could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<String>,
    /// Transport-level error text, for diagnostics only.
    pub error: Option<String>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Some(body.into()),
            error: None,
        }
    }

    /// No HTTP exchange took place.
    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            status: 0,
            body: None,
            error: Some(error.into()),
        }
    }

    /// A status arrived but the body could not be read.
    pub fn unreadable(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body, if this response counts as a usable primary result:
    /// a 2xx status with a non-empty body. Otherwise hands `self` back.
    pub fn into_usable_body(self) -> Result<String, Self> {
        if self.is_success() && self.body.as_deref().is_some_and(|b| !b.is_empty()) {
            Ok(self.body.unwrap_or_default())
        } else {
            Err(self)
        }
    }
}

/// A delivery mechanism.
///
/// Implementations never fail: every problem is folded into the returned
/// [`RawResponse`] so the caller can decide whether to fall back.
pub trait Transport: Send + Sync {
    /// Short label used in diagnostics.
    fn name(&self) -> &'static str;

    fn execute(&self, request: &TransportRequest) -> impl Future<Output = RawResponse> + Send;
}

/// Placeholder fallback for builds without a secondary mechanism.
///
/// Uninhabited: a `TransportClient` typed with it can only hold `None`.
#[derive(Debug, Clone, Copy)]
pub enum NoFallback {}

impl Transport for NoFallback {
    fn name(&self) -> &'static str {
        match *self {}
    }

    async fn execute(&self, _request: &TransportRequest) -> RawResponse {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("http://hub.local:8123/api").expect("valid url")
    }

    #[test]
    fn method_renders_uppercase() {
        assert_eq!(Method::Get.as_ref(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }

    #[test]
    fn timeouts_follow_method() {
        assert_eq!(TransportRequest::get(url()).timeout, GET_TIMEOUT);
        assert_eq!(
            TransportRequest::post_json(url(), "{}".into()).timeout,
            POST_TIMEOUT
        );
    }

    #[test]
    fn debug_redacts_authorization() {
        let req = TransportRequest::get(url()).with_header("Authorization", "Bearer abc123");
        let rendered = format!("{req:?}");
        assert!(!rendered.contains("abc123"), "{rendered}");
        assert!(rendered.contains("Authorization: ****"));
        assert_eq!(req.header("authorization"), Some("Bearer abc123"));
    }

    #[test]
    fn usable_body_requires_2xx_and_content() {
        assert_eq!(RawResponse::new(200, "[]").into_usable_body(), Ok("[]".into()));
        assert!(RawResponse::new(200, "").into_usable_body().is_err());
        assert!(RawResponse::new(500, "boom").into_usable_body().is_err());
        assert!(RawResponse::unreachable("refused").into_usable_body().is_err());

        let back = RawResponse::new(404, "nope")
            .into_usable_body()
            .expect_err("404 is not usable");
        assert_eq!(back.body.as_deref(), Some("nope"));
    }
}

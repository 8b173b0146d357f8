// Two-tier delivery: primary mechanism, then exactly one fallback attempt.
//
// The primary result is only trusted when it is a 2xx with a non-empty
// body. Anything else goes to the fallback mechanism, whose status code
// decides the final outcome. There is no loop and no retry of the same
// mechanism.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::Error;
use crate::transport::http::{ReqwestTransport, TransportConfig};
use crate::transport::{RawResponse, Transport, TransportRequest};

#[cfg(feature = "fallback")]
pub type DefaultFallback = crate::transport::fallback::UreqTransport;
#[cfg(not(feature = "fallback"))]
pub type DefaultFallback = crate::transport::NoFallback;

/// Maximum number of characters of a response body kept in an error.
const DETAIL_LIMIT: usize = 300;

/// Actionable category of a failed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Classification {
    #[strum(to_string = "Unauthorized")]
    Unauthorized,
    #[strum(to_string = "Forbidden")]
    Forbidden,
    #[strum(to_string = "Not found")]
    NotFound,
    #[strum(to_string = "Unreachable")]
    Unreachable,
    #[strum(to_string = "HTTP error")]
    HttpError,
}

/// Classified result of a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    Success(String),
    Failure {
        classification: Classification,
        status: Option<u16>,
        detail: String,
    },
}

impl TransportOutcome {
    /// Classify what the fallback mechanism observed.
    pub fn classify(raw: RawResponse) -> Self {
        match raw.status {
            200..=299 => match raw.body {
                Some(body) => Self::Success(body),
                None => Self::failure(
                    Classification::HttpError,
                    raw.status,
                    raw.error
                        .unwrap_or_else(|| "response body could not be read".into()),
                ),
            },
            401 => Self::failure(
                Classification::Unauthorized,
                401,
                "token invalid or missing",
            ),
            403 => Self::failure(
                Classification::Forbidden,
                403,
                "access denied -- check URL/proxy/CORS",
            ),
            404 => Self::failure(
                Classification::NotFound,
                404,
                "endpoint wrong -- check base URL/port/path",
            ),
            0 => Self::failure(
                Classification::Unreachable,
                0,
                "no connection -- network/firewall/host unreachable",
            ),
            status => {
                let detail = match raw.body {
                    Some(body) if !body.is_empty() => body.chars().take(DETAIL_LIMIT).collect(),
                    _ => raw.error.unwrap_or_else(|| format!("HTTP {status}")),
                };
                Self::failure(Classification::HttpError, status, detail)
            }
        }
    }

    fn failure(classification: Classification, status: u16, detail: impl Into<String>) -> Self {
        Self::Failure {
            classification,
            status: Some(status),
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The body on success, a [`Error::Delivery`] otherwise.
    pub fn into_result(self) -> Result<String, Error> {
        match self {
            Self::Success(body) => Ok(body),
            Self::Failure {
                classification,
                status,
                detail,
            } => Err(Error::Delivery {
                classification,
                status,
                detail,
            }),
        }
    }
}

/// Authenticated request delivery with a single fallback step.
///
/// Generic over both mechanisms so tests can substitute counting stubs.
/// The default type parameters are the production pair: `reqwest` as
/// primary and, with the `fallback` feature, `ureq` as secondary.
pub struct TransportClient<P = ReqwestTransport, S = DefaultFallback> {
    primary: P,
    fallback: Option<S>,
    sink: Arc<dyn DiagnosticSink>,
}

impl TransportClient {
    /// Primary built from `config`, plus the compiled-in fallback (if any).
    pub fn from_config(config: &TransportConfig) -> Result<Self, Error> {
        let primary = ReqwestTransport::new(config)?;
        #[cfg(feature = "fallback")]
        let fallback = Some(crate::transport::fallback::UreqTransport::new());
        #[cfg(not(feature = "fallback"))]
        let fallback = None;
        Ok(Self::new(primary, fallback))
    }
}

impl<P: Transport, S: Transport> TransportClient<P, S> {
    pub fn new(primary: P, fallback: Option<S>) -> Self {
        Self {
            primary,
            fallback,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostics sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> Option<&S> {
        self.fallback.as_ref()
    }

    /// Send `request` with bearer authentication and return the body.
    ///
    /// Fails with [`Error::Configuration`] before touching the network if
    /// the token is empty after trimming.
    pub async fn send(
        &self,
        mut request: TransportRequest,
        token: &SecretString,
    ) -> Result<String, Error> {
        let token = token.expose_secret().trim();
        if token.is_empty() {
            self.sink.trace("token", "token is empty");
            return Err(Error::Configuration("token is empty".into()));
        }

        request
            .headers
            .insert(0, ("Authorization".into(), format!("Bearer {token}")));

        self.deliver(&request).await?.into_result()
    }

    /// Run the two-tier delivery for an already-authenticated request.
    ///
    /// Only fails outright with [`Error::TransportUnavailable`]; every
    /// other result is a [`TransportOutcome`].
    pub async fn deliver(&self, request: &TransportRequest) -> Result<TransportOutcome, Error> {
        let method = request.method;
        self.sink
            .trace(&format!("{method} URL"), request.url.as_str());
        if let Some(ref body) = request.body {
            self.sink.trace(&format!("{method} Body"), body);
        }

        // ── Primary ──
        let primary = self.primary.execute(request).await;
        let primary_label = self.primary.name();
        self.sink.trace(
            &format!("{primary_label} status"),
            &primary.status.to_string(),
        );

        let primary = match primary.into_usable_body() {
            Ok(body) => return Ok(TransportOutcome::Success(body)),
            Err(raw) => raw,
        };
        if let Some(ref error) = primary.error {
            self.sink.trace(&format!("{primary_label} error"), error);
        }

        // ── Fallback ──
        let Some(ref fallback) = self.fallback else {
            self.sink.trace("fallback", "no fallback transport available");
            return Err(Error::TransportUnavailable);
        };

        let raw = fallback.execute(request).await;
        let fallback_label = fallback.name();
        self.sink
            .trace(&format!("{fallback_label} status"), &raw.status.to_string());
        if let Some(ref error) = raw.error {
            self.sink.trace(&format!("{fallback_label} error"), error);
        }

        Ok(TransportOutcome::classify(raw))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn classification_of(raw: RawResponse) -> Option<Classification> {
        match TransportOutcome::classify(raw) {
            TransportOutcome::Failure { classification, .. } => Some(classification),
            TransportOutcome::Success(_) => None,
        }
    }

    #[test]
    fn success_keeps_body_verbatim() {
        assert_eq!(
            TransportOutcome::classify(RawResponse::new(201, "[]")),
            TransportOutcome::Success("[]".into())
        );
        // An empty 2xx body is still a success on the fallback path.
        assert!(TransportOutcome::classify(RawResponse::new(200, "")).is_success());
    }

    #[test]
    fn well_known_statuses() {
        assert_eq!(
            classification_of(RawResponse::new(401, "")),
            Some(Classification::Unauthorized)
        );
        assert_eq!(
            classification_of(RawResponse::new(403, "")),
            Some(Classification::Forbidden)
        );
        assert_eq!(
            classification_of(RawResponse::new(404, "")),
            Some(Classification::NotFound)
        );
        assert_eq!(
            classification_of(RawResponse::unreachable("connection refused")),
            Some(Classification::Unreachable)
        );
        assert_eq!(
            classification_of(RawResponse::new(502, "bad gateway")),
            Some(Classification::HttpError)
        );
    }

    #[test]
    fn unreadable_2xx_is_an_http_error() {
        assert_eq!(
            classification_of(RawResponse::unreadable(200, "decode failed")),
            Some(Classification::HttpError)
        );
    }

    #[test]
    fn http_error_detail_is_truncated_by_characters() {
        let body = "ä".repeat(400);
        let TransportOutcome::Failure { status, detail, .. } =
            TransportOutcome::classify(RawResponse::new(500, body))
        else {
            panic!("expected failure");
        };
        assert_eq!(status, Some(500));
        assert_eq!(detail.chars().count(), DETAIL_LIMIT);
    }

    #[test]
    fn http_error_without_body_uses_status() {
        let err = TransportOutcome::classify(RawResponse::new(418, ""))
            .into_result()
            .expect_err("418 is a failure");
        assert_eq!(err.to_string(), "HTTP error: HTTP 418");
        assert_eq!(err.status(), Some(418));
    }

    #[test]
    fn failure_maps_to_delivery_error() {
        let err = TransportOutcome::classify(RawResponse::new(401, "nope"))
            .into_result()
            .expect_err("401 is a failure");
        assert_eq!(err.classification(), Some(Classification::Unauthorized));
        assert!(err.is_auth_error());
        assert_eq!(err.to_string(), "Unauthorized: token invalid or missing");
    }
}

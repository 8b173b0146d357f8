use thiserror::Error;

use crate::client::Classification;

/// Top-level error type for the `halink-api` crate.
///
/// Covers every way a delivery can end without a response body:
/// missing configuration, a classified HTTP failure, or the absence of
/// any usable transport. `halink-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// A required setting is missing. Raised before any network activity.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Delivery ────────────────────────────────────────────────────
    /// The fallback mechanism reached a verdict other than success.
    #[error("{classification}: {detail}")]
    Delivery {
        classification: Classification,
        /// HTTP status as seen by the fallback mechanism (`0` = no exchange).
        status: Option<u16>,
        detail: String,
    },

    /// The primary mechanism gave no usable response and no fallback
    /// mechanism is present.
    #[error("HTTP request failed -- no fallback transport available")]
    TransportUnavailable,

    // ── Transport setup ─────────────────────────────────────────────
    /// TLS configuration or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),
}

impl Error {
    /// The outcome classification, for delivery failures.
    pub fn classification(&self) -> Option<Classification> {
        match self {
            Self::Delivery { classification, .. } => Some(*classification),
            _ => None,
        }
    }

    /// HTTP status observed by the fallback mechanism, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Delivery { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` if the hub rejected the credentials or the route.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.classification(),
            Some(Classification::Unauthorized | Classification::Forbidden)
        )
    }

    /// Returns `true` if no HTTP exchange took place at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::TransportUnavailable)
            || self.classification() == Some(Classification::Unreachable)
    }
}

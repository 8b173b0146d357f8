// ── Core error types ──
//
// What callers of the gateway see. Transport-layer errors are folded in
// through `From<halink_api::Error>`; delivery classifications pass through
// unchanged so the caller can act on them.

use thiserror::Error;

use halink_api::Classification;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Caller-side problems (no network attempt made) ──────────────
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Failed to encode payload: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Delivery outcomes ────────────────────────────────────────────
    #[error("{classification}: {detail}")]
    Delivery {
        classification: Classification,
        /// HTTP status (`0` = no exchange), when known.
        status: Option<u16>,
        detail: String,
    },

    #[error("HTTP request failed -- no fallback transport available")]
    TransportUnavailable,
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn classification(&self) -> Option<Classification> {
        match self {
            Self::Delivery { classification, .. } => Some(*classification),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Delivery { status, .. } => *status,
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<halink_api::Error> for CoreError {
    fn from(err: halink_api::Error) -> Self {
        match err {
            halink_api::Error::Configuration(message) => Self::Configuration { message },
            halink_api::Error::Delivery {
                classification,
                status,
                detail,
            } => Self::Delivery {
                classification,
                status,
                detail,
            },
            halink_api::Error::TransportUnavailable => Self::TransportUnavailable,
            halink_api::Error::Tls(message) => Self::Configuration {
                message: format!("TLS error: {message}"),
            },
        }
    }
}

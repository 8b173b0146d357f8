//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use halink_config::ConfigError;
use halink_core::{Classification, CoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the hub: {detail}")]
    #[diagnostic(
        code(halink::unreachable),
        help(
            "Check that the hub is running and the base URL is right.\n\
             Try: halink ping --base-url http://homeassistant.local:8123"
        )
    )]
    Unreachable { detail: String },

    #[error("HTTP request failed and no fallback transport is available")]
    #[diagnostic(
        code(halink::transport_unavailable),
        help("Build with the `fallback` feature to enable the secondary HTTP stack.")
    )]
    TransportUnavailable,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {detail}")]
    #[diagnostic(
        code(halink::auth_failed),
        help(
            "Create a long-lived access token on your Home Assistant profile page.\n\
             Store it with: halink config set-token"
        )
    )]
    AuthFailed { detail: String },

    #[error("No token configured for profile '{profile}'")]
    #[diagnostic(
        code(halink::no_credentials),
        help(
            "Configure a token with: halink config init\n\
             Or set the HALINK_TOKEN environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("Access denied: {detail}")]
    #[diagnostic(
        code(halink::forbidden),
        help("A reverse proxy or the hub's http settings are rejecting the request.")
    )]
    Forbidden { detail: String },

    // ── Hub responses ────────────────────────────────────────────────
    #[error("Not found: {detail}")]
    #[diagnostic(
        code(halink::not_found),
        help("Check the base URL, the service name, and the entity ID.")
    )]
    NotFound { detail: String },

    #[error("Hub returned HTTP {status}: {detail}")]
    #[diagnostic(code(halink::http_error))]
    Http { status: u16, detail: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(halink::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(halink::configuration),
        help("Review your profile with: halink config show")
    )]
    Configuration { message: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(halink::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: halink config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No hub configured")]
    #[diagnostic(
        code(halink::no_config),
        help(
            "Create a config with: halink config init\n\
             Expected at: {path}\n\
             Or pass --base-url and --token."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(halink::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(halink::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(halink::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unreachable { .. } | Self::TransportUnavailable => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Forbidden { .. } => exit_code::PERMISSION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Delivery {
                classification,
                status,
                detail,
            } => match classification {
                Classification::Unauthorized => Self::AuthFailed { detail },
                Classification::Forbidden => Self::Forbidden { detail },
                Classification::NotFound => Self::NotFound { detail },
                Classification::Unreachable => Self::Unreachable { detail },
                Classification::HttpError => Self::Http {
                    status: status.unwrap_or_default(),
                    detail,
                },
            },

            CoreError::TransportUnavailable => Self::TransportUnavailable,

            CoreError::Configuration { message } => Self::Configuration { message },

            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Serialization(e) => Self::Json(e),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile { profile } => Self::ProfileNotFound {
                name: profile,
                available: "(see: halink config profiles)".into(),
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

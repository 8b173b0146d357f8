// ── Runtime gateway configuration ──
//
// Describes *where* the hub lives and *how* to authenticate. Carries the
// credential but never touches disk: `halink-config` builds one of these
// from a profile and hands it in.

use secrecy::SecretString;
use url::Url;

use halink_api::TlsMode;

use crate::error::CoreError;

/// Configuration for talking to a single hub.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base of the hub API (e.g. `http://homeassistant.local:8123`).
    /// A trailing slash is insignificant.
    pub base_url: String,
    /// Long-lived access token, sent as a bearer credential.
    pub token: SecretString,
    /// Entity used when a command names none. May be empty.
    pub default_entity: String,
    /// TLS verification for the primary transport.
    pub tls: TlsMode,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            default_entity: String::new(),
            tls: TlsMode::default(),
        }
    }

    pub fn with_default_entity(mut self, entity: impl Into<String>) -> Self {
        self.default_entity = entity.into();
        self
    }

    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    ///
    /// `endpoint(&["api", "states", "light.kitchen"])` on
    /// `http://hub:8123/` yields `http://hub:8123/api/states/light.kitchen`.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, CoreError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(CoreError::Configuration {
                message: "base URL is empty".into(),
            });
        }

        let mut url = Url::parse(base).map_err(|e| CoreError::Configuration {
            message: format!("invalid base URL '{base}': {e}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Configuration {
                message: format!("base URL '{base}' must use http or https"),
            });
        }

        url.path_segments_mut()
            .map_err(|()| CoreError::Configuration {
                message: format!("base URL '{base}' cannot carry a path"),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

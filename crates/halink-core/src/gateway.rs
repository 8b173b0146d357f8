// ── Gateway ──
//
// Composition root: resolves the target entity, builds the service call,
// and hands it to the transport client. Every operation is one request
// and one response; the only state is the swappable config snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use halink_api::{
    DefaultFallback, ReqwestTransport, Transport, TransportClient, TransportConfig,
    TransportRequest,
};

use crate::config::GatewayConfig;
use crate::entity;
use crate::error::CoreError;
use crate::service::ServiceCall;

/// Brightness used by [`Gateway::self_test_on`].
const SELF_TEST_ON_PERCENT: i32 = 100;
/// Percentage used by [`Gateway::self_test_dim`].
const SELF_TEST_DIM_PERCENT: i32 = 50;

/// High-level command surface for one hub.
///
/// `Send + Sync`; concurrent calls share only the read-only config
/// snapshot and the primary transport's connection pool.
pub struct Gateway<P = ReqwestTransport, S = DefaultFallback> {
    config: ArcSwap<GatewayConfig>,
    transport: TransportClient<P, S>,
}

impl Gateway {
    /// Build a gateway with the production transports.
    pub fn new(config: GatewayConfig) -> Result<Self, CoreError> {
        let transport = TransportClient::from_config(&TransportConfig {
            tls: config.tls.clone(),
        })?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<P: Transport, S: Transport> Gateway<P, S> {
    pub fn with_transport(config: GatewayConfig, transport: TransportClient<P, S>) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            transport,
        }
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<GatewayConfig> {
        self.config.load_full()
    }

    /// Replace the configuration for subsequent calls.
    ///
    /// Calls already in flight finish with the snapshot they started with.
    /// TLS settings belong to the transport and are not affected.
    pub fn reconfigure(&self, config: GatewayConfig) {
        self.config.store(Arc::new(config));
    }

    pub fn transport(&self) -> &TransportClient<P, S> {
        &self.transport
    }

    // ── Service calls ────────────────────────────────────────────────

    /// `POST /api/services/{domain}/{service}` with `payload` as the body.
    pub async fn call_service(
        &self,
        domain: &str,
        service: &str,
        payload: Map<String, Value>,
    ) -> Result<String, CoreError> {
        let config = self.config.load_full();
        self.dispatch(&config, &ServiceCall::custom(domain, service, payload))
            .await
    }

    pub async fn turn_on(
        &self,
        entity: &str,
        brightness_pct: Option<i32>,
        transition: Option<f64>,
    ) -> Result<String, CoreError> {
        let config = self.config.load_full();
        let entity = entity::resolve(entity, &config.default_entity)?;
        if let Some(seconds) = transition {
            validate_transition(seconds)?;
        }
        self.dispatch(
            &config,
            &ServiceCall::turn_on(&entity, brightness_pct, transition),
        )
        .await
    }

    pub async fn turn_off(&self, entity: &str) -> Result<String, CoreError> {
        let config = self.config.load_full();
        let entity = entity::resolve(entity, &config.default_entity)?;
        self.dispatch(&config, &ServiceCall::turn_off(&entity)).await
    }

    /// Set a light to `pct` percent; `0` turns it off.
    pub async fn set_percent(&self, entity: &str, pct: i32) -> Result<String, CoreError> {
        let config = self.config.load_full();
        let entity = entity::resolve(entity, &config.default_entity)?;
        self.dispatch(&config, &ServiceCall::set_percent(&entity, pct))
            .await
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Probe `GET /api`. Any 2xx counts, whatever the body says.
    ///
    /// Only ever yields `Ok(true)`; an unreachable or rejecting hub comes
    /// back as the classified `Err`.
    pub async fn test_connection(&self) -> Result<bool, CoreError> {
        let config = self.config.load_full();
        let url = config.endpoint(&["api"])?;
        debug!(%url, "probing hub");
        self.transport
            .send(TransportRequest::get(url), &config.token)
            .await?;
        Ok(true)
    }

    /// `GET /api/states/{entity}`, returning the raw state document.
    pub async fn fetch_entity_state(&self, entity: &str) -> Result<String, CoreError> {
        if entity.trim().is_empty() {
            return Err(CoreError::validation("entity must not be empty"));
        }
        let config = self.config.load_full();
        let url = config.endpoint(&["api", "states", entity])?;
        debug!(%url, "fetching entity state");
        Ok(self
            .transport
            .send(TransportRequest::get(url), &config.token)
            .await?)
    }

    // ── Self-test actions (default entity only) ──────────────────────

    /// Turn the default entity on at full brightness.
    pub async fn self_test_on(&self) -> Result<String, CoreError> {
        let entity = self.default_entity()?;
        self.turn_on(&entity, Some(SELF_TEST_ON_PERCENT), None).await
    }

    /// Turn the default entity off.
    pub async fn self_test_off(&self) -> Result<String, CoreError> {
        let entity = self.default_entity()?;
        self.turn_off(&entity).await
    }

    /// Dim the default entity to half brightness.
    pub async fn self_test_dim(&self) -> Result<String, CoreError> {
        let entity = self.default_entity()?;
        self.set_percent(&entity, SELF_TEST_DIM_PERCENT).await
    }

    // ── Internals ────────────────────────────────────────────────────

    fn default_entity(&self) -> Result<String, CoreError> {
        let entity = self.config.load().default_entity.clone();
        if entity.is_empty() {
            return Err(CoreError::Configuration {
                message: "no default entity configured".into(),
            });
        }
        Ok(entity)
    }

    #[instrument(skip_all, fields(domain = %call.domain, service = %call.service))]
    async fn dispatch(
        &self,
        config: &GatewayConfig,
        call: &ServiceCall,
    ) -> Result<String, CoreError> {
        validate_identifier("domain", &call.domain)?;
        validate_identifier("service", &call.service)?;

        let url = config.endpoint(&["api", "services", &call.domain, &call.service])?;
        let body = call.body()?;
        debug!(entity = call.entity_id(), "calling service");

        Ok(self
            .transport
            .send(TransportRequest::post_json(url, body), &config.token)
            .await?)
    }
}

/// Domains and services are snake_case identifiers.
fn validate_identifier(field: &str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::validation(format!("{field} must not be empty")));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CoreError::validation(format!(
            "{field} '{value}' may only contain letters, digits, and '_'"
        )));
    }
    Ok(())
}

fn validate_transition(seconds: f64) -> Result<(), CoreError> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::validation(format!(
            "transition must be a non-negative number of seconds, got {seconds}"
        )))
    }
}

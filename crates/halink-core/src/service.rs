// ── Service calls ──
//
// A `ServiceCall` is the domain/service/payload triple posted to
// `/api/services/{domain}/{service}`. The constructors below are the only
// place that knows how light commands are shaped.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::brightness::to_device_range;

/// Domain of the light commands.
pub const LIGHT_DOMAIN: &str = "light";

/// A command addressed to one service of one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub payload: Map<String, Value>,
}

impl ServiceCall {
    /// Pass-through for arbitrary services.
    pub fn custom(
        domain: impl Into<String>,
        service: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Self {
            domain: domain.into(),
            service: service.into(),
            payload,
        }
    }

    /// `light.turn_on`, optionally with brightness (percent) and transition (seconds).
    pub fn turn_on(entity: &str, brightness_pct: Option<i32>, transition: Option<f64>) -> Self {
        let mut payload = entity_payload(entity);
        if let Some(pct) = brightness_pct {
            payload.insert("brightness".into(), json!(to_device_range(pct)));
        }
        if let Some(seconds) = transition {
            payload.insert("transition".into(), json!(seconds));
        }
        Self::custom(LIGHT_DOMAIN, "turn_on", payload)
    }

    /// `light.turn_off`.
    pub fn turn_off(entity: &str) -> Self {
        Self::custom(LIGHT_DOMAIN, "turn_off", entity_payload(entity))
    }

    /// Set a light to a percentage. 0 % means off, not minimum brightness.
    pub fn set_percent(entity: &str, pct: i32) -> Self {
        match pct.clamp(0, 100) {
            0 => Self::turn_off(entity),
            pct => Self::turn_on(entity, Some(pct), None),
        }
    }

    /// The entity this call targets, if any.
    pub fn entity_id(&self) -> Option<&str> {
        self.payload.get("entity_id").and_then(Value::as_str)
    }

    /// Compact JSON body; `/` is left unescaped.
    pub fn body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.payload)
    }
}

fn entity_payload(entity: &str) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("entity_id".into(), Value::String(entity.to_owned()));
    payload
}

//! Generic service call handler.

use serde_json::{Map, Value};

use halink_core::Gateway;

use crate::cli::{CallArgs, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn handle(gateway: &Gateway, args: CallArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let payload = match (args.data, args.from_file) {
        (Some(data), _) => {
            let value = serde_json::from_str(&data).map_err(|e| CliError::Validation {
                field: "data".into(),
                reason: format!("invalid JSON: {e}"),
            })?;
            payload_object("data", value)?
        }
        (None, Some(path)) => payload_object("from-file", util::read_json_file(&path)?)?,
        (None, None) => Map::new(),
    };

    let body = gateway
        .call_service(&args.domain, &args.service, payload)
        .await?;
    util::print_body(&body, global)
}

/// Service data must be a JSON object.
fn payload_object(field: &str, value: Value) -> Result<Map<String, Value>, CliError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Validation {
            field: field.into(),
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}

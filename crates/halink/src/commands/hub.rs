//! Read-only hub commands: ping and state.

use serde_json::json;

use halink_core::Gateway;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn ping(gateway: &Gateway, global: &GlobalOpts) -> Result<(), CliError> {
    // Failures surface as classified errors, so reaching here means reachable.
    gateway.test_connection().await?;
    let base_url = gateway.config().base_url.clone();

    let out = output::render_value(
        global.output,
        &json!({ "base_url": base_url }),
        |_| format!("{} {base_url} is reachable", output::check_mark(util::color(global))),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn state(gateway: &Gateway, entity: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let body = gateway.fetch_entity_state(entity).await?;
    util::print_body(&body, global)
}

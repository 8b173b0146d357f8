//! Light command handlers.

use halink_core::Gateway;

use crate::cli::{GlobalOpts, LightArgs, LightCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(gateway: &Gateway, args: LightArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let body = match args.command {
        LightCommand::On {
            entity,
            brightness,
            transition,
        } => {
            gateway
                .turn_on(entity.as_deref().unwrap_or_default(), brightness, transition)
                .await?
        }
        LightCommand::Off { entity } => {
            gateway
                .turn_off(entity.as_deref().unwrap_or_default())
                .await?
        }
        LightCommand::Set { percent, entity } => {
            gateway
                .set_percent(entity.as_deref().unwrap_or_default(), percent)
                .await?
        }
    };
    util::print_body(&body, global)
}

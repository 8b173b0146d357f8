//! Command dispatch: bridges CLI args -> gateway operations -> output formatting.

pub mod call;
pub mod config_cmd;
pub mod hub;
pub mod light;
pub mod util;

use halink_core::Gateway;

use crate::cli::{GlobalOpts, HubCommand};
use crate::error::CliError;

/// Dispatch a hub-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: HubCommand,
    gateway: &Gateway,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        HubCommand::Call(args) => call::handle(gateway, args, global).await,
        HubCommand::Light(args) => light::handle(gateway, args, global).await,
        HubCommand::Ping => hub::ping(gateway, global).await,
        HubCommand::State { entity } => hub::state(gateway, &entity, global).await,
        HubCommand::SelfTest(args) => self_test::handle(gateway, args.command, global).await,
    }
}

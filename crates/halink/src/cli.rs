//! Clap derive structures for the `halink` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// halink -- call Home Assistant services from the command line
#[derive(Debug, Parser)]
#[command(
    name = "halink",
    version,
    about = "Call Home Assistant services from the command line",
    long_about = "Sends service calls and state queries to a Home Assistant hub.\n\n\
        Requests go out over the native HTTP client first, with one fallback\n\
        attempt over a second HTTP stack when the first gives no usable answer.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Hub profile to use
    #[arg(long, short = 'p', env = "HALINK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Hub base URL (overrides profile)
    #[arg(long, short = 'u', env = "HALINK_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Long-lived access token (overrides profile)
    #[arg(long, env = "HALINK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Entity used when a command names none (overrides profile)
    #[arg(long, short = 'e', env = "HALINK_DEFAULT_ENTITY", global = true)]
    pub default_entity: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HALINK_OUTPUT",
        default_value = "raw",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "HALINK_INSECURE", global = true)]
    pub insecure: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Response body exactly as the hub sent it (default)
    Raw,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(flatten)]
    Hub(HubCommand),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Commands that talk to the hub.
#[derive(Debug, Subcommand)]
pub enum HubCommand {
    /// Call any service: POST /api/services/<domain>/<service>
    Call(CallArgs),

    /// Switch and dim lights
    #[command(alias = "l")]
    Light(LightArgs),

    /// Check that the hub answers: GET /api
    Ping,

    /// Show the state document of an entity
    State {
        /// Entity ID (e.g. light.kitchen)
        entity: String,
    },

    /// Exercise the profile's default entity (on, off, dim to 50%)
    SelfTest(SelfTestArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CALL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Service domain (e.g. light, switch, scene)
    pub domain: String,

    /// Service name (e.g. turn_on)
    pub service: String,

    /// Payload as a JSON object
    #[arg(long, short = 'd', conflicts_with = "from_file")]
    pub data: Option<String>,

    /// Read the JSON payload from a file
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LIGHT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LightArgs {
    #[command(subcommand)]
    pub command: LightCommand,
}

#[derive(Debug, Subcommand)]
pub enum LightCommand {
    /// Turn a light on
    On {
        /// Entity ID (default entity if omitted)
        entity: Option<String>,

        /// Brightness in percent
        #[arg(long, short = 'b', value_parser = clap::value_parser!(i32).range(0..=100))]
        brightness: Option<i32>,

        /// Transition time in seconds
        #[arg(long, short = 't')]
        transition: Option<f64>,
    },

    /// Turn a light off
    Off {
        /// Entity ID (default entity if omitted)
        entity: Option<String>,
    },

    /// Set a light to a percentage (0 turns it off)
    Set {
        /// Brightness in percent
        #[arg(value_parser = clap::value_parser!(i32).range(0..=100))]
        percent: i32,

        /// Entity ID (default entity if omitted)
        entity: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SELF-TEST
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SelfTestArgs {
    #[command(subcommand)]
    pub command: SelfTestCommand,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum SelfTestCommand {
    /// Turn the default entity on at full brightness
    On,
    /// Turn the default entity off
    Off,
    /// Dim the default entity to 50%
    Dim,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (tokens masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// One of: base_url, token_env, default_entity, ca_cert, insecure
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a token in the system keyring
    SetToken {
        /// Profile name (active profile if omitted)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn hub_commands_parse_at_top_level() {
        let cli = Cli::try_parse_from(["halink", "ping"]).unwrap();
        assert!(matches!(cli.command, Command::Hub(HubCommand::Ping)));

        let cli = Cli::try_parse_from(["halink", "l", "off", "light.hall"]).unwrap();
        assert!(matches!(cli.command, Command::Hub(HubCommand::Light(_))));

        let cli = Cli::try_parse_from(["halink", "config", "show"]).unwrap();
        assert!(matches!(cli.command, Command::Config(_)));
    }
}

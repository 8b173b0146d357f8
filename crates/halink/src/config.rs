//! CLI configuration: thin wrapper around `halink_config`.
//!
//! Adds the resolution that respects `GlobalOpts` flag overrides
//! (--base-url, --token, --default-entity, --insecure).

use secrecy::SecretString;

use halink_core::{GatewayConfig, TlsMode};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use halink_config::{Config, Profile, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Build the gateway configuration from file, profile, and CLI overrides.
pub fn build_gateway_config(global: &GlobalOpts) -> Result<GatewayConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, cfg.defaults.insecure, global);
    }

    // No profile -- flags / env vars alone
    let base_url = global.base_url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    halink_config::validate_base_url(base_url)?;

    let token = global
        .token
        .clone()
        .map(SecretString::from)
        .ok_or(CliError::NoCredentials {
            profile: profile_name,
        })?;

    let tls = if global.insecure || cfg.defaults.insecure {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    Ok(GatewayConfig::new(base_url.trim(), token)
        .with_default_entity(global.default_entity.clone().unwrap_or_default())
        .with_tls(tls))
}

/// Translate a `Profile` + global flags into a `GatewayConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    default_insecure: bool,
    global: &GlobalOpts,
) -> Result<GatewayConfig, CliError> {
    // 1. Base URL (flag > env > profile)
    let base_url = global.base_url.as_deref().unwrap_or(&profile.base_url);
    halink_config::validate_base_url(base_url)?;

    // 2. Token (flag > token_env > keyring > plaintext)
    let token = match global.token {
        Some(ref token) => SecretString::from(token.clone()),
        None => halink_config::resolve_token(profile, profile_name)?,
    };

    // 3. Default entity (flag > profile)
    let default_entity = global
        .default_entity
        .clone()
        .or_else(|| profile.default_entity.clone())
        .unwrap_or_default();

    // 4. TLS
    let tls = if global.insecure {
        TlsMode::DangerAcceptInvalid
    } else {
        halink_config::profile_tls(profile, default_insecure)
    };

    Ok(GatewayConfig::new(base_url.trim(), token)
        .with_default_entity(default_entity)
        .with_tls(tls))
}

//! Shared helpers for command handlers.

use std::path::Path;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Render and print a hub response body.
pub fn print_body(body: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_body(global.output, body)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub fn color(global: &GlobalOpts) -> bool {
    output::should_color(global.color)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<serde_json::Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON in {}: {e}", path.display()),
    })
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

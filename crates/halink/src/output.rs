//! Output formatting: raw, JSON, YAML.
//!
//! Hub responses arrive as raw text. `raw` prints them untouched; the
//! structured formats re-render the body (or any serde value) through
//! serde. A body that is not JSON is rendered as a JSON string.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled on stderr.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Success marker for status lines.
pub fn check_mark(color: bool) -> String {
    if color {
        "✓".green().bold().to_string()
    } else {
        "✓".into()
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a hub response body in the chosen format.
pub fn render_body(format: OutputFormat, body: &str) -> Result<String, CliError> {
    if format == OutputFormat::Raw {
        return Ok(body.to_owned());
    }
    let value = serde_json::from_str::<Value>(body).unwrap_or_else(|_| Value::String(body.into()));
    render_value(format, &value, |_| body.to_owned())
}

/// Render any serializable value; `raw` uses `raw_fn`.
pub fn render_value<T>(
    format: OutputFormat,
    data: &T,
    raw_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
{
    Ok(match format {
        OutputFormat::Raw => raw_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

use crate::error::CoreError;

/// Pick the entity a command targets.
///
/// An explicit entity wins; otherwise the configured default is used.
pub fn resolve(explicit: &str, default: &str) -> Result<String, CoreError> {
    if !explicit.is_empty() {
        return Ok(explicit.to_owned());
    }
    if !default.is_empty() {
        return Ok(default.to_owned());
    }
    Err(CoreError::Configuration {
        message: "no entity provided and no default configured".into(),
    })
}

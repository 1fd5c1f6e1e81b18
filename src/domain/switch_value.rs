//! Parsing of observed switch values posted by the sensor bridge.

use crate::error::SwitchifierError;

/// Parses a posted switch value into the state it represents.
///
/// Matching is case-insensitive. Anything starting with `t` (`true`, `T`,
/// `tru`) or exactly `1` means open; every other non-empty value means
/// closed.
///
/// # Errors
///
/// Returns [`SwitchifierError::Validation`] for an empty value.
pub fn parse_switch_value(raw: &str) -> Result<bool, SwitchifierError> {
    let value = raw.to_lowercase();
    if value.is_empty() {
        return Err(SwitchifierError::Validation(
            "missing switch value".to_string(),
        ));
    }
    Ok(value.starts_with('t') || value == "1")
}

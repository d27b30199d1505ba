//! `${VAR}` references in `press.toml` string values.
//!
//! Only the braced forms are recognised, `${VAR}` and `${VAR:-default}`.
//! A bare `$` is common in URLs and is never touched.

use std::borrow::Cow;

use crate::ConfigError;

/// Unset variable referenced without a default.
struct Unset(String);

/// Substitute variable references in `value`, resolving names with `lookup`.
///
/// `field` names the config key in the error raised for an unset variable.
pub(crate) fn expand_vars(
    value: &str,
    field: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| {
        lookup(name)
            .map(Some)
            .ok_or_else(|| Unset(name.to_owned()))
    })
    .map(Cow::into_owned)
    .map_err(|err| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", err.cause.0),
    })
}

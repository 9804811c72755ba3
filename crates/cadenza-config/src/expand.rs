//! `${VAR}` expansion for configuration strings.

use crate::ConfigError;

/// Variable that was referenced without a default but is not set.
struct UnsetVar(String);

/// Expand `${VAR}` and `${VAR:-default}` references in a configuration value.
///
/// Values without `${` are returned unchanged, so a literal `$` in a title
/// needs no escaping.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var: &str| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

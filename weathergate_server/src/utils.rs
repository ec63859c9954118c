use std::collections::HashMap;

use serde::{Deserialize, Deserializer, de::Error};

pub fn default_server_binding_addr() -> String {
    "0.0.0.0:8000".to_string()
}

pub fn default_upstream_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

pub fn default_upstream_timeout_secs() -> u64 {
    10
}

pub fn default_true() -> bool {
    true
}

/// Replace `${VAR}` references in a string with values from the environment.
/// Variables whose names or values contain template characters are skipped.
pub fn substitute_env(value: &str) -> Result<String, String> {
    let variables: HashMap<String, String> = dotenvy::vars()
        .filter(|(name, var)| {
            !name.contains(['$', '{', '}']) && !var.contains(['$', '{', '}'])
        })
        .collect();
    envsubst::substitute(value, &variables).map_err(|err| format!("{err:?}"))
}

pub fn deserialize_with_envsubst<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    substitute_env(&value).map_err(D::Error::custom)
}

pub fn deserialize_optional_with_envsubst<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|value| substitute_env(&value).map_err(D::Error::custom))
        .transpose()
}

/// Shorten a response body so it can be logged without flooding output.
pub fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

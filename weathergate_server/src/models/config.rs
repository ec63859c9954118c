use serde::Deserialize;
use std::time::Duration;

use crate::utils;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(
        default = "utils::default_server_binding_addr",
        deserialize_with = "utils::deserialize_with_envsubst"
    )]
    pub bind_addr: String,
    /// Allow cross-origin requests from anywhere.
    #[serde(default = "utils::default_true")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: utils::default_server_binding_addr(),
            cors: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpstreamConfig {
    #[serde(
        default = "utils::default_upstream_base_url",
        deserialize_with = "utils::deserialize_with_envsubst"
    )]
    pub base_url: String,
    #[serde(default = "utils::default_upstream_timeout_secs")]
    pub timeout_secs: u64,
    /// Falls back to `OPENWEATHERMAP_API_KEY` when not set.
    #[serde(default, deserialize_with = "utils::deserialize_optional_with_envsubst")]
    pub api_key: Option<String>,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: utils::default_upstream_base_url(),
            timeout_secs: utils::default_upstream_timeout_secs(),
            api_key: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TimeFormat {
    /// `HH:MM`
    #[default]
    Short,
    /// `HH:MM:SS` followed by the zone abbreviation and UTC offset.
    Full,
}

impl TimeFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::Short => "%H:%M",
            TimeFormat::Full => "%H:%M:%S %Z%z",
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "utils::default_true")]
    pub include_country: bool,
    #[serde(default)]
    pub time_format: TimeFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_country: true,
            time_format: TimeFormat::default(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WeatherGateConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

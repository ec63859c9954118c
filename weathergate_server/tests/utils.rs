#![allow(dead_code)]

use std::sync::Arc;

use reqwest::Response;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use weathergate_server::{
    models::config::{OutputConfig, WeatherGateConfig},
    timezone::TimezoneLookup,
};

pub const API_KEY: &str = "test-key";

/// Timezone lookup that ignores coordinates.
pub struct FixedTimezone(pub Option<&'static str>);

impl TimezoneLookup for FixedTimezone {
    fn timezone_at(&self, _latitude: f64, _longitude: f64) -> Option<String> {
        self.0.map(str::to_string)
    }
}

pub async fn assert_ok_response(response: Response) -> Result<Response, String> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let body = response.text().await.map_err(|err| format!("{err:?}"))?;
        Err(body)
    }
}

/// Config pointing the gateway at a mock upstream.
pub fn config(upstream_url: &str, output: OutputConfig) -> WeatherGateConfig {
    let mut config = WeatherGateConfig::default();
    config.upstream.base_url = upstream_url.to_string();
    config.output = output;
    config
}

/// Serve the gateway on an ephemeral port and return its base URL.
pub async fn spawn_gateway(
    config: WeatherGateConfig,
    timezones: Arc<dyn TimezoneLookup>,
) -> Result<String, Box<dyn std::error::Error>> {
    let state = weathergate_server::build_state(&config, API_KEY.to_string(), timezones)?;
    let router = weathergate_server::app(state, &config.server);
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(format!("http://{addr}"))
}

pub fn london_payload() -> Value {
    json!({
        "name": "London",
        "sys": {"country": "GB"},
        "main": {"temp": 15.2, "humidity": 70, "feels_like": 14.8},
        "wind": {"speed": 3.1},
        "dt": 1700000000
    })
}

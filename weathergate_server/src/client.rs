use axum::http::StatusCode;

use crate::{
    models::{config::UpstreamConfig, error::WeatherError, weather::CurrentWeather},
    utils,
};

const CURRENT_WEATHER_ENDPOINT: &str = "/data/2.5/weather";
/// Current-conditions payloads are a few hundred bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(config: &UpstreamConfig, api_key: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Fetch current conditions in metric units for a coordinate pair.
    pub async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}{CURRENT_WEATHER_ENDPOINT}", self.base_url);
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
                ("lat", latitude.as_str()),
                ("lon", longitude.as_str()),
            ])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Err(WeatherError::LocationNotFound),
            status => {
                let body = read_limited(response).await.unwrap_or_default();
                tracing::warn!(
                    %status,
                    body = utils::truncate_body(&body),
                    "weather provider request failed"
                );
                return Err(WeatherError::Upstream { status });
            }
        }

        let body = read_limited(response).await?;
        tracing::debug!(body = body.as_str(), "weather provider response");
        serde_json::from_str(&body).map_err(|err| WeatherError::UpstreamDataMalformed {
            message: err.to_string(),
        })
    }
}

/// Read a response body as text, refusing bodies over `MAX_BODY_BYTES`.
async fn read_limited(mut response: reqwest::Response) -> Result<String, WeatherError> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(WeatherError::UpstreamDataMalformed {
                message: format!("response body exceeds {MAX_BODY_BYTES} bytes"),
            });
        }
        body.extend_from_slice(&chunk);
    }
    String::from_utf8(body).map_err(|err| WeatherError::UpstreamDataMalformed {
        message: err.to_string(),
    })
}

use bon::Builder;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current weather conditions at a location, with date and time given in the
/// location's own timezone.
#[derive(Builder, Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct WeatherRecord {
    /// Full country name, or "Unknown" when the provider gives no usable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Location name as reported by the provider.
    pub city: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: u8,
    /// Wind speed in meters per second.
    pub wind_speed: f64,
    /// Precipitation volume over the last hour in millimeters.
    #[builder(default)]
    pub precipitation: f64,
    /// Perceived temperature in degrees Celsius.
    pub feels_like: f64,
    /// Local date in YYYY-MM-DD format.
    pub date: String,
    /// Local time of day.
    pub time: String,
}

/// Body of every error response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Clone, Copy, Debug, Deserialize, IntoParams, Serialize)]
#[into_params(parameter_in = Query)]
pub struct WeatherQueryParams {
    /// Latitude for which to retrieve weather.
    pub lat: f64,
    /// Longitude for which to retrieve weather.
    pub lon: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentSys {
    /// Two-letter ISO 3166 country code.
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    /// Whole percent; the provider always sends integers, so a fractional
    /// value is treated as a malformed payload.
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWind {
    pub speed: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrentRain {
    #[serde(rename = "1h")]
    pub one_hour: Option<f64>,
}

/// Current conditions as returned by the OpenWeatherMap `/data/2.5/weather`
/// endpoint. Only the fields used to build a weather record are kept.
#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub name: Option<String>,
    #[serde(default)]
    pub sys: CurrentSys,
    pub main: CurrentMain,
    pub wind: CurrentWind,
    pub rain: Option<CurrentRain>,
    /// Time of the report as Unix seconds.
    pub dt: i64,
}

impl CurrentWeather {
    pub fn precipitation(&self) -> f64 {
        self.rain
            .as_ref()
            .and_then(|rain| rain.one_hour)
            .unwrap_or(0.0)
            .max(0.0)
    }
}

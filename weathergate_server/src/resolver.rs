use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use weathergate::WeatherRecord;

use crate::{
    client::OpenWeatherClient,
    country::CountryTable,
    models::{config::OutputConfig, error::WeatherError, weather::CurrentWeather},
    timezone::TimezoneLookup,
};

const UNKNOWN: &str = "Unknown";

/// Turns coordinates into a weather record stamped with the location's local
/// date and time.
pub struct Resolver {
    client: OpenWeatherClient,
    countries: CountryTable,
    timezones: Arc<dyn TimezoneLookup>,
    output: OutputConfig,
}

impl Resolver {
    pub fn new(
        client: OpenWeatherClient,
        timezones: Arc<dyn TimezoneLookup>,
        output: OutputConfig,
    ) -> Self {
        Self {
            client,
            countries: CountryTable::new(),
            timezones,
            output,
        }
    }

    pub async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherRecord, WeatherError> {
        let current = self.client.current(latitude, longitude).await?;
        self.assemble(latitude, longitude, current)
    }

    /// Build a record from a provider report for the given coordinates.
    pub fn assemble(
        &self,
        latitude: f64,
        longitude: f64,
        current: CurrentWeather,
    ) -> Result<WeatherRecord, WeatherError> {
        let precipitation = current.precipitation();
        let CurrentWeather {
            name,
            sys,
            main,
            wind,
            dt,
            ..
        } = current;

        let reported_at = DateTime::<Utc>::from_timestamp(dt, 0).ok_or_else(|| {
            WeatherError::UpstreamDataMalformed {
                message: format!("report timestamp {dt} is out of range"),
            }
        })?;
        let tz = self.local_timezone(latitude, longitude)?;
        let local = reported_at.with_timezone(&tz);

        let country = self
            .output
            .include_country
            .then(|| self.country_name(sys.country.as_deref()));

        Ok(WeatherRecord {
            country,
            city: name.unwrap_or_else(|| UNKNOWN.to_string()),
            temperature: main.temp,
            humidity: main.humidity,
            wind_speed: wind.speed,
            precipitation,
            feels_like: main.feels_like,
            date: local.format("%Y-%m-%d").to_string(),
            time: local.format(self.output.time_format.pattern()).to_string(),
        })
    }

    fn local_timezone(&self, latitude: f64, longitude: f64) -> Result<Tz, WeatherError> {
        let name = self
            .timezones
            .timezone_at(latitude, longitude)
            .ok_or(WeatherError::TimezoneNotFound)?;
        name.parse::<Tz>()
            .map_err(|err| WeatherError::TimezoneInvalid {
                message: err.to_string(),
            })
    }

    fn country_name(&self, code: Option<&str>) -> String {
        let Some(code) = code else {
            return UNKNOWN.to_string();
        };
        match self.countries.name(code) {
            Some(name) => name.to_string(),
            None => {
                tracing::warn!(code, "unrecognized country code");
                UNKNOWN.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{TimeFormat, UpstreamConfig};

    struct FixedTimezone(Option<&'static str>);

    impl TimezoneLookup for FixedTimezone {
        fn timezone_at(&self, _latitude: f64, _longitude: f64) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn resolver(timezone: Option<&'static str>, output: OutputConfig) -> Resolver {
        let client = OpenWeatherClient::new(&UpstreamConfig::default(), "test-key".to_string())
            .expect("client builds");
        Resolver::new(client, Arc::new(FixedTimezone(timezone)), output)
    }

    fn report(json: serde_json::Value) -> CurrentWeather {
        serde_json::from_value(json).expect("report parses")
    }

    fn london_report() -> CurrentWeather {
        report(serde_json::json!({
            "name": "London",
            "sys": {"country": "GB"},
            "main": {"temp": 15.2, "humidity": 70, "feels_like": 14.8},
            "wind": {"speed": 3.1},
            "dt": 1700000000
        }))
    }

    #[test]
    fn london_report_becomes_local_record() {
        let resolver = resolver(Some("Europe/London"), OutputConfig::default());
        let record = resolver
            .assemble(51.5074, -0.1278, london_report())
            .expect("record assembles");
        assert_eq!(
            record,
            WeatherRecord {
                country: Some("United Kingdom".to_string()),
                city: "London".to_string(),
                temperature: 15.2,
                humidity: 70,
                wind_speed: 3.1,
                precipitation: 0.0,
                feels_like: 14.8,
                date: "2023-11-14".to_string(),
                time: "22:13".to_string(),
            }
        );
    }

    #[test]
    fn local_date_follows_timezone_not_utc() {
        let resolver = resolver(Some("Asia/Tokyo"), OutputConfig::default());
        let record = resolver
            .assemble(35.6762, 139.6503, london_report())
            .expect("record assembles");
        assert_eq!(record.date, "2023-11-15");
        assert_eq!(record.time, "07:13");
    }

    #[test]
    fn full_time_format_appends_zone_and_offset() {
        let output = OutputConfig {
            include_country: false,
            time_format: TimeFormat::Full,
        };
        let resolver = resolver(Some("America/New_York"), output);
        let record = resolver
            .assemble(40.7128, -74.0060, london_report())
            .expect("record assembles");
        assert_eq!(record.country, None);
        assert_eq!(record.date, "2023-11-14");
        assert_eq!(record.time, "17:13:20 EST-0500");
    }

    #[test]
    fn missing_fields_fall_back_to_unknown() {
        let resolver = resolver(Some("Europe/London"), OutputConfig::default());
        let current = report(serde_json::json!({
            "sys": {},
            "main": {"temp": 1.0, "humidity": 99, "feels_like": -1.5},
            "wind": {"speed": 0.0},
            "dt": 1700000000
        }));
        let record = resolver
            .assemble(51.5, -0.1, current)
            .expect("record assembles");
        assert_eq!(record.city, "Unknown");
        assert_eq!(record.country.as_deref(), Some("Unknown"));
    }

    #[test]
    fn unrecognized_country_code_falls_back_to_unknown() {
        let resolver = resolver(Some("Europe/London"), OutputConfig::default());
        let current = report(serde_json::json!({
            "name": "Nowhere",
            "sys": {"country": "ZZ"},
            "main": {"temp": 1.0, "humidity": 99, "feels_like": -1.5},
            "wind": {"speed": 0.0},
            "dt": 1700000000
        }));
        let record = resolver
            .assemble(51.5, -0.1, current)
            .expect("record assembles");
        assert_eq!(record.country.as_deref(), Some("Unknown"));
    }

    #[test]
    fn precipitation_defaults_to_zero() {
        let without_rain = london_report();
        assert_eq!(without_rain.precipitation(), 0.0);

        let without_hourly = report(serde_json::json!({
            "main": {"temp": 9.0, "humidity": 88, "feels_like": 7.0},
            "wind": {"speed": 5.5},
            "rain": {"3h": 2.5},
            "dt": 1700000000
        }));
        assert_eq!(without_hourly.precipitation(), 0.0);

        let with_hourly = report(serde_json::json!({
            "main": {"temp": 9.0, "humidity": 88, "feels_like": 7.0},
            "wind": {"speed": 5.5},
            "rain": {"1h": 0.42},
            "dt": 1700000000
        }));
        assert_eq!(with_hourly.precipitation(), 0.42);
    }

    #[test]
    fn missing_timezone_is_an_error() {
        let resolver = resolver(None, OutputConfig::default());
        let err = resolver
            .assemble(0.0, 0.0, london_report())
            .expect_err("no timezone");
        assert_eq!(err, WeatherError::TimezoneNotFound);
    }

    #[test]
    fn invalid_timezone_carries_parser_message() {
        let resolver = resolver(Some("Mars/Olympus_Mons"), OutputConfig::default());
        let err = resolver
            .assemble(0.0, 0.0, london_report())
            .expect_err("bad timezone");
        match err {
            WeatherError::TimezoneInvalid { message } => assert!(!message.is_empty()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_required_fields_do_not_parse() {
        let result = serde_json::from_value::<CurrentWeather>(serde_json::json!({
            "name": "London",
            "main": {"temp": 15.2, "feels_like": 14.8},
            "wind": {"speed": 3.1},
            "dt": 1700000000
        }));
        assert!(result.is_err());
    }
}

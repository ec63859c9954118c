use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use weathergate::ErrorDetail;

#[derive(Debug, Error, PartialEq)]
pub enum WeatherError {
    #[error("{message}")]
    InvalidQuery { message: String },
    #[error("Location not found")]
    LocationNotFound,
    #[error("Failed to fetch weather data")]
    Upstream { status: StatusCode },
    #[error("Timezone not found for the given coordinates")]
    TimezoneNotFound,
    #[error("{message}")]
    TimezoneInvalid { message: String },
    #[error("Malformed weather data from provider: {message}")]
    UpstreamDataMalformed { message: String },
    #[error("Weather provider unavailable: {message}")]
    UpstreamUnavailable { message: String },
    #[error("Weather provider timed out")]
    UpstreamTimeout,
}

impl WeatherError {
    pub fn status(&self) -> StatusCode {
        match self {
            WeatherError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            WeatherError::LocationNotFound => StatusCode::NOT_FOUND,
            WeatherError::Upstream { status } => *status,
            WeatherError::TimezoneNotFound | WeatherError::TimezoneInvalid { .. } => {
                StatusCode::BAD_REQUEST
            }
            WeatherError::UpstreamDataMalformed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            WeatherError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            WeatherError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::UpstreamTimeout
        } else {
            // The request URL carries the API key.
            WeatherError::UpstreamUnavailable {
                message: err.without_url().to_string(),
            }
        }
    }
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorDetail::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_mirrored() {
        let err = WeatherError::Upstream {
            status: StatusCode::UNAUTHORIZED,
        };
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Failed to fetch weather data");
    }

    #[test]
    fn timezone_failures_are_client_errors() {
        let invalid = WeatherError::TimezoneInvalid {
            message: "'Mars/Olympus' is not a valid timezone".to_string(),
        };
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), "'Mars/Olympus' is not a valid timezone");
        assert_eq!(
            WeatherError::TimezoneNotFound.status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn provider_failures_map_to_gateway_statuses() {
        let malformed = WeatherError::UpstreamDataMalformed {
            message: "missing field `main`".to_string(),
        };
        assert_eq!(malformed.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(WeatherError::UpstreamTimeout.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(WeatherError::LocationNotFound.status(), StatusCode::NOT_FOUND);
    }
}

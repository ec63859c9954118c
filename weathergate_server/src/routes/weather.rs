use std::sync::Arc;

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use weathergate::{ErrorDetail, WeatherRecord};

use crate::{
    models::{error::WeatherError, state::WeatherGateState, weather::WeatherQueryParams},
    resolver::Resolver,
};

pub fn router(state: WeatherGateState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_current_weather))
        .with_state(state)
}

/// Get the current weather at a latitude/longitude.
///
/// The report's date and time are given in the timezone of the location.
#[utoipa::path(
    get,
    path = "/weather",
    params(WeatherQueryParams),
    responses(
        (status = 200, description = "Successfully got current weather", body = WeatherRecord),
        (status = 400, description = "Coordinates are malformed or have no valid timezone", body = ErrorDetail),
        (status = 404, description = "Weather provider has no data for the location", body = ErrorDetail),
        (status = 422, description = "Weather provider returned an unexpected payload", body = ErrorDetail),
        (status = 502, description = "Weather provider could not be reached", body = ErrorDetail),
        (status = 504, description = "Weather provider did not answer in time", body = ErrorDetail)
    )
)]
#[axum::debug_handler]
pub async fn get_current_weather(
    State(resolver): State<Arc<Resolver>>,
    params: Result<Query<WeatherQueryParams>, QueryRejection>,
) -> Result<Json<WeatherRecord>, WeatherError> {
    let Query(WeatherQueryParams { lat, lon }) =
        params.map_err(|rejection| WeatherError::InvalidQuery {
            message: rejection.body_text(),
        })?;
    let record = resolver.resolve(lat, lon).await?;
    Ok(Json(record))
}

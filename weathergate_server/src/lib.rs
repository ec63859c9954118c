use std::{fs::File, sync::Arc};

use axum::Router;
use ctrlc::set_handler;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub mod client;
pub mod country;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod timezone;
mod utils;

#[derive(OpenApi)]
#[openapi(info(
    title = "Weather Gateway",
    description = "Current weather conditions for a coordinate pair, stamped with local date and time"
))]
struct ApiDoc;

type BindingAddress = String;

/// Read the optional config file named by `WEATHERGATE_CONFIG_PATH`.
pub fn load_config() -> Result<models::config::WeatherGateConfig, Box<dyn std::error::Error>> {
    match dotenvy::var("WEATHERGATE_CONFIG_PATH") {
        Ok(config_path) => load_config_file(&config_path),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => {
            Ok(models::config::WeatherGateConfig::default())
        }
        Err(err) => Err(err.into()),
    }
}

pub fn load_config_file(
    config_path: &str,
) -> Result<models::config::WeatherGateConfig, Box<dyn std::error::Error>> {
    let config_file = File::open(config_path)?;
    Ok(serde_json::from_reader(config_file)?)
}

/// The upstream API key from config, or `OPENWEATHERMAP_API_KEY` otherwise.
pub fn resolve_api_key(
    upstream: &models::config::UpstreamConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    let api_key = match &upstream.api_key {
        Some(api_key) => api_key.clone(),
        None => dotenvy::var("OPENWEATHERMAP_API_KEY")
            .map_err(|err| format!("OPENWEATHERMAP_API_KEY must be set: {err}"))?,
    };
    if api_key.trim().is_empty() {
        return Err("weather provider API key is empty".into());
    }
    if api_key.contains("${") {
        return Err(
            format!("weather provider API key has an unresolved reference: {api_key}").into(),
        );
    }
    Ok(api_key)
}

/// Build shared state for the given config and timezone lookup.
pub fn build_state(
    config: &models::config::WeatherGateConfig,
    api_key: String,
    timezones: Arc<dyn timezone::TimezoneLookup>,
) -> Result<models::state::WeatherGateState, Box<dyn std::error::Error>> {
    let client = client::OpenWeatherClient::new(&config.upstream, api_key)?;
    let resolver = resolver::Resolver::new(client, timezones, config.output);
    Ok(models::state::WeatherGateState {
        resolver: Arc::new(resolver),
    })
}

/// Assemble the full application router with docs, tracing, and CORS.
pub fn app(
    state: models::state::WeatherGateState,
    server_config: &models::config::ServerConfig,
) -> Router {
    let openapi_router =
        OpenApiRouter::with_openapi(ApiDoc::openapi()).merge(routes::weather::router(state));
    let (router, api) = openapi_router.split_for_parts();
    let router = router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        );
    if server_config.cors {
        router.layer(CorsLayer::very_permissive())
    } else {
        router
    }
}

pub async fn init() -> Result<(BindingAddress, Router), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    // Configuration comes from environment variables and an optional config
    // file.
    let config = load_config()?;
    let api_key = resolve_api_key(&config.upstream)?;

    // The timezone finder is loaded once and only read afterwards.
    let timezones = Arc::new(timezone::TzfLookup::new());
    let state = build_state(&config, api_key, timezones)?;
    tracing::info!(
        bind_addr = %config.server.bind_addr,
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout_secs,
        "weather gateway configured"
    );

    let router = app(state, &config.server);
    Ok((config.server.bind_addr, router))
}

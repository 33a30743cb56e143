use crate::{
    Config, Coordinates, CurrentWeather, RiskError,
    provider::{open_elevation::OpenElevationProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod demo;
pub mod open_elevation;
pub mod openweather;

pub use demo::DemoProvider;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_coordinates(&self, coords: Coordinates)
    -> Result<CurrentWeather, RiskError>;

    async fn current_by_place(&self, place: &str) -> Result<CurrentWeather, RiskError>;
}

/// Elevation lookups degrade instead of failing: `None` means "unknown".
#[async_trait]
pub trait ElevationProvider: Send + Sync + Debug {
    async fn elevation(&self, coords: Coordinates) -> Option<f64>;
}

/// Construct the OpenWeather provider from config.
///
/// `explicit_key` (e.g. from `--api-key`) takes precedence over the
/// environment and the config file.
pub fn weather_provider_from_config(
    config: &Config,
    explicit_key: Option<&str>,
) -> Result<Box<dyn WeatherProvider>, RiskError> {
    let api_key = config
        .resolve_api_key(explicit_key)
        .ok_or(RiskError::MissingCredential)?;

    let provider = OpenWeatherProvider::new(api_key, &config.openweather)?;
    Ok(Box::new(provider))
}

pub fn elevation_provider_from_config(
    config: &Config,
) -> Result<Box<dyn ElevationProvider>, RiskError> {
    Ok(Box::new(OpenElevationProvider::new(&config.elevation)?))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

use async_trait::async_trait;

use crate::{
    error::RiskError,
    model::{Coordinates, CurrentWeather, WeatherObservation},
};

use super::{ElevationProvider, WeatherProvider};

/// Fixed sample data: a clear, cool day high in the mountains.
///
/// Serves both weather and elevation without touching the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoProvider;

impl DemoProvider {
    pub const ELEVATION_M: f64 = 3200.0;

    pub fn sample_weather() -> CurrentWeather {
        CurrentWeather {
            location_name: Some("Demo location".to_string()),
            observed_at: None,
            observation: WeatherObservation::new("Clear", "clear sky")
                .with_temperature(4.5)
                .with_wind(3.2),
        }
    }
}

#[async_trait]
impl WeatherProvider for DemoProvider {
    async fn current_by_coordinates(
        &self,
        _coords: Coordinates,
    ) -> Result<CurrentWeather, RiskError> {
        Ok(Self::sample_weather())
    }

    async fn current_by_place(&self, _place: &str) -> Result<CurrentWeather, RiskError> {
        Ok(Self::sample_weather())
    }
}

#[async_trait]
impl ElevationProvider for DemoProvider {
    async fn elevation(&self, _coords: Coordinates) -> Option<f64> {
        Some(Self::ELEVATION_M)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RiskError;

/// Current conditions, normalised from a provider payload.
///
/// Text fields are lowercased. Anything missing from the payload is left at
/// its neutral value (empty string, `None` temperature, zero amounts).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub condition_main: String,
    pub condition_description: String,
    pub temperature_c: Option<f64>,
    pub wind_speed_ms: f64,
    pub rain_1h_mm: f64,
    pub snow_1h_mm: f64,
}

impl WeatherObservation {
    /// Build an observation, lowercasing the condition text.
    pub fn new(condition_main: &str, condition_description: &str) -> Self {
        Self {
            condition_main: condition_main.to_lowercase(),
            condition_description: condition_description.to_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature_c: f64) -> Self {
        self.temperature_c = Some(temperature_c);
        self
    }

    pub fn with_wind(mut self, wind_speed_ms: f64) -> Self {
        self.wind_speed_ms = wind_speed_ms;
        self
    }

    pub fn with_rain(mut self, rain_1h_mm: f64) -> Self {
        self.rain_1h_mm = rain_1h_mm;
        self
    }

    pub fn with_snow(mut self, snow_1h_mm: f64) -> Self {
        self.snow_1h_mm = snow_1h_mm;
        self
    }
}

/// What a weather provider hands back for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
    pub observation: WeatherObservation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = RiskError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, RiskError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(RiskError::invalid_location(
                "Latitude must be between -90 and 90 and longitude between -180 and 180.",
            ));
        }
        Ok(Self { latitude, longitude })
    }

    /// Parse user-entered latitude/longitude text.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, RiskError> {
        let (latitude, longitude) = (latitude.trim(), longitude.trim());
        if latitude.is_empty() || longitude.is_empty() {
            return Err(RiskError::invalid_location(
                "Please provide both latitude and longitude.",
            ));
        }

        match (latitude.parse::<f64>(), longitude.parse::<f64>()) {
            (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => Self::new(lat, lon),
            _ => Err(RiskError::invalid_location(
                "Latitude and Longitude must be numeric.",
            )),
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LocationQuery {
    Place { name: String },
    Coordinates(Coordinates),
}

impl LocationQuery {
    pub fn place(name: &str) -> Result<Self, RiskError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RiskError::invalid_location("Please provide a place name."));
        }
        Ok(Self::Place { name: name.to_string() })
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Coordinates(coords) => Some(*coords),
            Self::Place { .. } => None,
        }
    }
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Place { name } => f.write_str(name),
            Self::Coordinates(coords) => write!(f, "{coords}"),
        }
    }
}

/// One "check risk" action.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRequest {
    pub location: LocationQuery,
    /// Look up elevation when the location is given as coordinates.
    pub auto_elevation: bool,
    /// Treat the location as mountainous regardless of elevation.
    pub force_mountainous: bool,
}

impl CheckRequest {
    pub const DEMO_LATITUDE: f64 = 35.2137;
    pub const DEMO_LONGITUDE: f64 = 75.4460;

    pub fn new(location: LocationQuery) -> Self {
        Self {
            location,
            auto_elevation: true,
            force_mountainous: false,
        }
    }

    /// Request used in demo mode, always classified as mountainous.
    pub fn demo() -> Self {
        Self {
            location: LocationQuery::Coordinates(Coordinates {
                latitude: Self::DEMO_LATITUDE,
                longitude: Self::DEMO_LONGITUDE,
            }),
            auto_elevation: true,
            force_mountainous: true,
        }
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::OpenWeatherConfig,
    error::RiskError,
    model::{Coordinates, CurrentWeather, WeatherObservation},
    provider::truncate_body,
};

use super::WeatherProvider;

const PROVIDER_NAME: &str = "OpenWeather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, config: &OpenWeatherConfig) -> Result<Self, RiskError> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(RiskError::MissingCredential);
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RiskError::Request(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn fetch_current(&self, query: &[(&str, String)]) -> Result<CurrentWeather, RiskError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(url = %url, "Fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| {
                RiskError::Request(format!("Failed to send request to OpenWeather: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            RiskError::Request(format!("Failed to read OpenWeather response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(RiskError::Http {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| RiskError::Parse(format!("OpenWeather current JSON: {e}")))?;

        Ok(parsed.into())
    }
}

// Every field is optional: OpenWeather omits `rain`/`snow` entirely when dry,
// and the rest may be missing for sparse stations.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwMain {
    temp: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwPrecipitation {
    #[serde(rename = "1h")]
    one_hour: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwCurrentResponse {
    name: Option<String>,
    dt: Option<i64>,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
    rain: OwPrecipitation,
    snow: OwPrecipitation,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(raw: OwCurrentResponse) -> Self {
        let condition = raw.weather.into_iter().next().unwrap_or_default();

        let observation = WeatherObservation {
            condition_main: condition.main.to_lowercase(),
            condition_description: condition.description.to_lowercase(),
            temperature_c: raw.main.temp,
            wind_speed_ms: raw.wind.speed,
            rain_1h_mm: raw.rain.one_hour,
            snow_1h_mm: raw.snow.one_hour,
        };

        Self {
            location_name: raw.name.filter(|n| !n.is_empty()),
            observed_at: raw.dt.and_then(unix_to_utc),
            observation,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(lat = %coords.latitude, lon = %coords.longitude))]
    async fn current_by_coordinates(
        &self,
        coords: Coordinates,
    ) -> Result<CurrentWeather, RiskError> {
        self.fetch_current(&[
            ("lat", coords.latitude.to_string()),
            ("lon", coords.longitude.to_string()),
        ])
        .await
    }

    #[instrument(skip(self))]
    async fn current_by_place(&self, place: &str) -> Result<CurrentWeather, RiskError> {
        self.fetch_current(&[("q", place.to_string())]).await
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

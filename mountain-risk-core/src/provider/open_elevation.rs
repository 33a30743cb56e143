use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{config::ElevationConfig, error::RiskError, model::Coordinates};

use super::ElevationProvider;

/// Open-Elevation lookup client. No credential required.
#[derive(Debug, Clone)]
pub struct OpenElevationProvider {
    base_url: String,
    http: Client,
}

impl OpenElevationProvider {
    pub fn new(config: &ElevationConfig) -> Result<Self, RiskError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RiskError::Request(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn lookup(&self, coords: Coordinates) -> Result<Option<f64>, RiskError> {
        let url = format!("{}/api/v1/lookup", self.base_url);
        let locations = format!("{},{}", coords.latitude, coords.longitude);
        debug!(url = %url, locations = %locations, "Fetching elevation");

        let res = self
            .http
            .get(&url)
            .query(&[("locations", locations.as_str())])
            .send()
            .await
            .map_err(|e| RiskError::Request(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(RiskError::Http {
                provider: "Open-Elevation",
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let parsed: LookupResponse = res
            .json()
            .await
            .map_err(|e| RiskError::Parse(e.to_string()))?;

        Ok(parsed.results.into_iter().next().and_then(|r| r.elevation))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LookupResult {
    elevation: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[async_trait]
impl ElevationProvider for OpenElevationProvider {
    #[instrument(skip(self), fields(lat = %coords.latitude, lon = %coords.longitude))]
    async fn elevation(&self, coords: Coordinates) -> Option<f64> {
        match self.lookup(coords).await {
            Ok(Some(elevation)) => Some(elevation),
            Ok(None) => {
                warn!("Elevation lookup returned no result; treating elevation as unknown");
                None
            }
            Err(err) => {
                warn!(error = %err, "Elevation lookup failed; treating elevation as unknown");
                None
            }
        }
    }
}

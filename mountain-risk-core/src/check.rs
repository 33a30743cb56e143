//! The fetch → classify → evaluate sequence behind one "check risk" action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::RiskError,
    model::{CheckRequest, CurrentWeather, LocationQuery},
    mountain::is_mountainous,
    provider::{DemoProvider, ElevationProvider, WeatherProvider},
    risk::{RiskAssessment, RiskEvaluator, RiskThresholds},
};

/// Everything the shell needs to render one result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub location: LocationQuery,
    pub location_name: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
    pub elevation_m: Option<f64>,
    pub mountainous: bool,
    pub elevation_threshold_m: f64,
    pub label: String,
    pub assessment: RiskAssessment,
}

#[derive(Debug)]
pub struct RiskChecker {
    weather: Box<dyn WeatherProvider>,
    elevation: Option<Box<dyn ElevationProvider>>,
    evaluator: RiskEvaluator,
}

impl RiskChecker {
    pub fn new(
        weather: Box<dyn WeatherProvider>,
        elevation: Option<Box<dyn ElevationProvider>>,
        thresholds: RiskThresholds,
    ) -> Self {
        Self {
            weather,
            elevation,
            evaluator: RiskEvaluator::new(thresholds),
        }
    }

    /// Checker backed by [`DemoProvider`] for both weather and elevation.
    pub fn demo(thresholds: RiskThresholds) -> Self {
        Self::new(Box::new(DemoProvider), Some(Box::new(DemoProvider)), thresholds)
    }

    /// Run one check. The evaluator only runs once the weather call succeeded.
    #[instrument(skip(self), fields(location = %request.location))]
    pub async fn check(&self, request: &CheckRequest) -> Result<RiskReport, RiskError> {
        let current = match &request.location {
            LocationQuery::Place { name } => self.weather.current_by_place(name).await?,
            LocationQuery::Coordinates(coords) => {
                self.weather.current_by_coordinates(*coords).await?
            }
        };

        let elevation_m = match (request.location.coordinates(), &self.elevation) {
            (Some(coords), Some(provider)) if request.auto_elevation => {
                provider.elevation(coords).await
            }
            _ => None,
        };

        let threshold_m = self.evaluator.thresholds().mountain_elevation_m;
        let mountainous = is_mountainous(elevation_m, request.force_mountainous, threshold_m);
        info!(?elevation_m, mountainous, "Location classified");

        Ok(self.report(request, current, elevation_m, mountainous))
    }

    fn report(
        &self,
        request: &CheckRequest,
        current: CurrentWeather,
        elevation_m: Option<f64>,
        mountainous: bool,
    ) -> RiskReport {
        let assessment = self.evaluator.evaluate(&current.observation, mountainous);
        info!(level = %assessment.level, score = assessment.score, "Risk evaluated");

        RiskReport {
            location: request.location.clone(),
            location_name: current.location_name,
            observed_at: current.observed_at,
            elevation_m,
            mountainous,
            elevation_threshold_m: self.evaluator.thresholds().mountain_elevation_m,
            label: assessment.label(),
            assessment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Coordinates, WeatherObservation},
        risk::{CLEAR_REASON, LOWLAND_REASON, RiskLevel},
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug)]
    struct FixedWeather(WeatherObservation);

    #[async_trait]
    impl WeatherProvider for FixedWeather {
        async fn current_by_coordinates(
            &self,
            _coords: Coordinates,
        ) -> Result<CurrentWeather, RiskError> {
            self.current_by_place("coords").await
        }

        async fn current_by_place(&self, place: &str) -> Result<CurrentWeather, RiskError> {
            Ok(CurrentWeather {
                location_name: Some(place.to_string()),
                observed_at: None,
                observation: self.0.clone(),
            })
        }
    }

    #[derive(Debug)]
    struct FailingWeather;

    #[async_trait]
    impl WeatherProvider for FailingWeather {
        async fn current_by_coordinates(
            &self,
            _coords: Coordinates,
        ) -> Result<CurrentWeather, RiskError> {
            Err(RiskError::Http { provider: "test", status: 500, body: "boom".into() })
        }

        async fn current_by_place(&self, _place: &str) -> Result<CurrentWeather, RiskError> {
            Err(RiskError::Http { provider: "test", status: 404, body: "city not found".into() })
        }
    }

    #[derive(Debug, Clone, Default)]
    struct CountingElevation {
        value: Option<f64>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ElevationProvider for CountingElevation {
        async fn elevation(&self, _coords: Coordinates) -> Option<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.value
        }
    }

    fn coords_request() -> CheckRequest {
        CheckRequest::new(LocationQuery::Coordinates(Coordinates {
            latitude: 46.5,
            longitude: 7.9,
        }))
    }

    fn storm() -> WeatherObservation {
        WeatherObservation::new("Thunderstorm", "thunderstorm")
    }

    #[tokio::test]
    async fn demo_check_is_low_and_mountainous() {
        let checker = RiskChecker::demo(RiskThresholds::default());
        let report = checker.check(&CheckRequest::demo()).await.expect("demo never fails");

        assert_eq!(report.elevation_m, Some(3200.0));
        assert!(report.mountainous);
        assert_eq!(report.label, "Low");
        assert_eq!(report.assessment.reasons, vec![CLEAR_REASON.to_string()]);
    }

    #[tokio::test]
    async fn high_elevation_makes_storm_high() {
        let elevation = CountingElevation { value: Some(2400.0), ..Default::default() };
        let checker = RiskChecker::new(
            Box::new(FixedWeather(storm())),
            Some(Box::new(elevation.clone())),
            RiskThresholds::default(),
        );

        let report = checker.check(&coords_request()).await.expect("check succeeds");

        assert!(report.mountainous);
        assert_eq!(report.assessment.level, RiskLevel::High);
        assert_eq!(report.label, "High");
        assert_eq!(elevation.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_elevation_falls_back_to_lowland() {
        let checker = RiskChecker::new(
            Box::new(FixedWeather(storm())),
            Some(Box::new(CountingElevation::default())),
            RiskThresholds::default(),
        );

        let report = checker.check(&coords_request()).await.expect("check succeeds");

        assert_eq!(report.elevation_m, None);
        assert!(!report.mountainous);
        assert_eq!(report.label, "Medium");
        assert_eq!(report.assessment.reasons[0], LOWLAND_REASON);
    }

    #[tokio::test]
    async fn override_wins_over_low_elevation() {
        let checker = RiskChecker::new(
            Box::new(FixedWeather(storm())),
            Some(Box::new(CountingElevation { value: Some(120.0), ..Default::default() })),
            RiskThresholds::default(),
        );
        let request = CheckRequest { force_mountainous: true, ..coords_request() };

        let report = checker.check(&request).await.expect("check succeeds");

        assert_eq!(report.elevation_m, Some(120.0));
        assert!(report.mountainous);
        assert_eq!(report.label, "High");
    }

    #[tokio::test]
    async fn place_mode_skips_elevation_lookup() {
        let elevation = CountingElevation { value: Some(3000.0), ..Default::default() };
        let checker = RiskChecker::new(
            Box::new(FixedWeather(storm())),
            Some(Box::new(elevation.clone())),
            RiskThresholds::default(),
        );
        let request = CheckRequest::new(LocationQuery::place("Zermatt").expect("valid place"));

        let report = checker.check(&request).await.expect("check succeeds");

        assert_eq!(report.location_name.as_deref(), Some("Zermatt"));
        assert_eq!(report.elevation_m, None);
        assert!(!report.mountainous);
        assert_eq!(elevation.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disabled_auto_elevation_skips_lookup() {
        let elevation = CountingElevation { value: Some(3000.0), ..Default::default() };
        let checker = RiskChecker::new(
            Box::new(FixedWeather(storm())),
            Some(Box::new(elevation.clone())),
            RiskThresholds::default(),
        );
        let request = CheckRequest { auto_elevation: false, ..coords_request() };

        let report = checker.check(&request).await.expect("check succeeds");

        assert_eq!(report.elevation_m, None);
        assert_eq!(elevation.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn weather_failure_aborts_before_elevation() {
        let elevation = CountingElevation { value: Some(3000.0), ..Default::default() };
        let checker = RiskChecker::new(
            Box::new(FailingWeather),
            Some(Box::new(elevation.clone())),
            RiskThresholds::default(),
        );

        let err = checker.check(&coords_request()).await.unwrap_err();

        assert!(matches!(err, RiskError::Http { status: 500, .. }));
        assert_eq!(elevation.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn custom_elevation_threshold_is_used() {
        let thresholds = RiskThresholds { mountain_elevation_m: 2500.0, ..Default::default() };
        let checker = RiskChecker::new(
            Box::new(FixedWeather(storm())),
            Some(Box::new(CountingElevation { value: Some(2400.0), ..Default::default() })),
            thresholds,
        );

        let report = checker.check(&coords_request()).await.expect("check succeeds");

        assert!(!report.mountainous);
        assert_eq!(report.elevation_threshold_m, 2500.0);
    }
}

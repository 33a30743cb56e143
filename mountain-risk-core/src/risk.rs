//! Rule-based risk scoring for mountain trips.
//!
//! Each hazard that fires adds a fixed number of points, doubled when the
//! location is mountainous. The total is bucketed into Low / Medium / High.

use serde::{Deserialize, Serialize};

use crate::model::WeatherObservation;

pub const LOWLAND_QUALIFIER: &str = " (mountain hazard less likely due to low elevation)";

pub const CLEAR_REASON: &str = "Clear conditions currently.";

pub const NO_HAZARD_REASON: &str = "No significant weather hazards reported.";

pub const LOWLAND_REASON: &str = "Location is not identified as mountainous (lower elevation or user selected). \
     Risk is assessed for non-mountain conditions.";

const RAIN_POINTS: f64 = 2.0;
const SNOW_POINTS: f64 = 3.0;
const WIND_POINTS: f64 = 2.0;
const COLD_POINTS: f64 = 1.5;
const STORM_POINTS: f64 = 3.0;

static HIGH_ADVICE: [&str; 3] = [
    "Avoid travel if possible — high risk conditions for mountain areas.",
    "Postpone the trip or choose a lower-altitude route.",
    "If travel is necessary, carry warm waterproof gear, inform someone, and have emergency kit.",
];

static MEDIUM_ADVICE: [&str; 3] = [
    "Caution advised. Conditions may be risky, especially on exposed or steep terrain.",
    "Check local forecasts and consider delaying if the weather worsens.",
    "Bring waterproof layers, navigation, and an emergency plan.",
];

static LOW_ADVICE: [&str; 2] = [
    "Conditions appear OK for trips, but weather can change rapidly in mountains.",
    "Bring layers, sun protection, and check updates before leaving.",
];

/// Tunable limits used by classification and scoring.
///
/// Example TOML:
/// [thresholds]
/// strong_wind_ms = 12.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Elevation at or above which a location counts as mountainous.
    pub mountain_elevation_m: f64,
    pub strong_wind_ms: f64,
    /// Rain or snow in the last hour that counts as precipitation.
    pub precipitation_mm: f64,
    pub freezing_temp_c: f64,
    pub mountain_weight: f64,
    pub lowland_weight: f64,
    pub high_score: f64,
    pub medium_score: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            mountain_elevation_m: 1000.0,
            strong_wind_ms: 10.0,
            precipitation_mm: 0.1,
            freezing_temp_c: 0.0,
            mountain_weight: 2.0,
            lowland_weight: 1.0,
            high_score: 6.0,
            medium_score: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn advice(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::Low => &LOW_ADVICE,
            RiskLevel::Medium => &MEDIUM_ADVICE,
            RiskLevel::High => &HIGH_ADVICE,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HazardFlags {
    pub rain: bool,
    pub snow: bool,
    pub wind: bool,
    pub cold: bool,
    pub storm: bool,
}

impl HazardFlags {
    pub fn detect(obs: &WeatherObservation, thresholds: &RiskThresholds) -> Self {
        let main = obs.condition_main.as_str();
        let desc = obs.condition_description.as_str();

        Self {
            rain: main.contains("rain")
                || obs.rain_1h_mm >= thresholds.precipitation_mm
                || desc.contains("shower"),
            snow: main.contains("snow") || obs.snow_1h_mm >= thresholds.precipitation_mm,
            wind: obs.wind_speed_ms >= thresholds.strong_wind_ms,
            cold: obs.temperature_c.is_some_and(|t| t <= thresholds.freezing_temp_c),
            storm: desc.contains("thunder") || desc.contains("storm"),
        }
    }

    /// Hazards that suppress the clear-conditions reason. Storms do not.
    fn any_weather(&self) -> bool {
        self.rain || self.snow || self.wind || self.cold
    }
}

/// The values the score was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: Option<f64>,
    pub wind_speed_ms: f64,
    pub rain_1h_mm: f64,
    pub snow_1h_mm: f64,
    pub condition_main: String,
    pub condition_description: String,
}

impl From<&WeatherObservation> for WeatherSnapshot {
    fn from(obs: &WeatherObservation) -> Self {
        Self {
            temperature_c: obs.temperature_c,
            wind_speed_ms: obs.wind_speed_ms,
            rain_1h_mm: obs.rain_1h_mm,
            snow_1h_mm: obs.snow_1h_mm,
            condition_main: obs.condition_main.clone(),
            condition_description: obs.condition_description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Appended to the level when displayed, e.g. for High risk at low elevation.
    pub qualifier: Option<String>,
    pub score: f64,
    pub reasons: Vec<String>,
    pub advice: Vec<String>,
    pub snapshot: WeatherSnapshot,
}

impl RiskAssessment {
    /// Display form of the level, qualifier included.
    pub fn label(&self) -> String {
        match &self.qualifier {
            Some(q) => format!("{}{}", self.level, q),
            None => self.level.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskEvaluator {
    thresholds: RiskThresholds,
}

impl RiskEvaluator {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    pub fn level_for(&self, score: f64) -> RiskLevel {
        if score >= self.thresholds.high_score {
            RiskLevel::High
        } else if score >= self.thresholds.medium_score {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn evaluate(&self, obs: &WeatherObservation, is_mountainous: bool) -> RiskAssessment {
        let flags = HazardFlags::detect(obs, &self.thresholds);
        let weight = if is_mountainous {
            self.thresholds.mountain_weight
        } else {
            self.thresholds.lowland_weight
        };

        let mut score = 0.0;
        let mut reasons = Vec::new();

        if flags.rain {
            reasons.push(format!(
                "Precipitation detected (rain ~ {:?} mm in last hour).",
                obs.rain_1h_mm
            ));
            score += RAIN_POINTS * weight;
        }
        if flags.snow {
            reasons.push(format!(
                "Snow detected (snow ~ {:?} mm in last hour).",
                obs.snow_1h_mm
            ));
            score += SNOW_POINTS * weight;
        }
        if flags.wind {
            reasons.push(format!("Strong wind (~{:?} m/s).", obs.wind_speed_ms));
            score += WIND_POINTS * weight;
        }
        if let (true, Some(temp)) = (flags.cold, obs.temperature_c) {
            reasons.push(format!("Low temperature ({temp:?} °C)."));
            score += COLD_POINTS * weight;
        }
        if flags.storm {
            reasons.push(format!(
                "Thunderstorm / storm conditions reported: {}.",
                obs.condition_description
            ));
            score += STORM_POINTS * weight;
        }
        if obs.condition_main == "clear" && !flags.any_weather() {
            reasons.push(CLEAR_REASON.to_string());
        }

        let level = self.level_for(score);
        let mut qualifier = None;

        if !is_mountainous {
            reasons.insert(0, LOWLAND_REASON.to_string());
            if level == RiskLevel::High {
                qualifier = Some(LOWLAND_QUALIFIER.to_string());
            }
        }
        if reasons.is_empty() {
            reasons.push(NO_HAZARD_REASON.to_string());
        }

        RiskAssessment {
            level,
            qualifier,
            score,
            reasons,
            advice: level.advice().iter().map(|a| (*a).to_string()).collect(),
            snapshot: WeatherSnapshot::from(obs),
        }
    }
}

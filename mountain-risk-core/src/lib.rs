//! Core library for the `mountain-risk` CLI.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - Weather and elevation provider abstractions (OpenWeather, Open-Elevation, demo data)
//! - The rule-based risk evaluator and mountainous classification
//! - The check pipeline tying them together
//!
//! The evaluator is pure and needs no network; everything else is I/O glue around it.

pub mod check;
pub mod config;
pub mod error;
pub mod model;
pub mod mountain;
pub mod provider;
pub mod risk;

pub use check::{RiskChecker, RiskReport};
pub use config::Config;
pub use error::RiskError;
pub use model::{CheckRequest, Coordinates, CurrentWeather, LocationQuery, WeatherObservation};
pub use mountain::is_mountainous;
pub use provider::{DemoProvider, ElevationProvider, WeatherProvider};
pub use risk::{RiskAssessment, RiskEvaluator, RiskLevel, RiskThresholds};

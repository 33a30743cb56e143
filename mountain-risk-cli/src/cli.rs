use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use mountain_risk_core::{
    CheckRequest, Config, Coordinates, LocationQuery, RiskChecker, RiskError,
    provider::{elevation_provider_from_config, weather_provider_from_config},
};
use tracing::debug;

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "mountain-risk", version, about = "Weather risk checker for mountain trips")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides it.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store an OpenWeatherMap API key in the config file.
    Configure,

    /// Check the current risk for one location.
    Check(CheckArgs),

    /// Answer a few prompts, then run a single check.
    Interactive,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Place name, e.g. "Skardu, PK" or "Kathmandu".
    #[arg(conflicts_with_all = ["lat", "lon"])]
    pub place: Option<String>,

    /// Latitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<String>,

    /// Longitude in decimal degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<String>,

    /// Use built-in sample data; no API key or network needed.
    #[arg(long)]
    pub demo: bool,

    /// Skip the elevation lookup for coordinate queries.
    #[arg(long)]
    pub no_elevation: bool,

    /// Treat the location as mountainous regardless of elevation.
    #[arg(long)]
    pub force_mountainous: bool,

    /// OpenWeatherMap API key; falls back to OPENWEATHER_API_KEY, then the config file.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// A fully resolved check, ready to run.
#[derive(Debug, Clone)]
pub struct CheckPlan {
    pub request: CheckRequest,
    pub demo: bool,
    pub api_key: Option<String>,
    pub json: bool,
}

impl CheckArgs {
    pub fn to_plan(&self) -> Result<CheckPlan, RiskError> {
        if self.demo {
            return Ok(CheckPlan {
                request: CheckRequest::demo(),
                demo: true,
                api_key: None,
                json: self.json,
            });
        }

        let location = match (&self.place, &self.lat, &self.lon) {
            (Some(place), _, _) => LocationQuery::place(place)?,
            (None, None, None) => {
                return Err(RiskError::invalid_location(
                    "Provide a place name or both --lat and --lon (or use --demo).",
                ));
            }
            (None, lat, lon) => LocationQuery::Coordinates(Coordinates::parse(
                lat.as_deref().unwrap_or_default(),
                lon.as_deref().unwrap_or_default(),
            )?),
        };

        Ok(CheckPlan {
            request: CheckRequest {
                location,
                auto_elevation: !self.no_elevation,
                force_mountainous: self.force_mountainous,
            },
            demo: false,
            api_key: self.api_key.clone(),
            json: self.json,
        })
    }
}

/// Wire providers for a plan. Fails on a missing credential before any request is sent.
pub fn build_checker(config: &Config, plan: &CheckPlan) -> Result<RiskChecker, RiskError> {
    if plan.demo {
        return Ok(RiskChecker::demo(config.thresholds));
    }

    let weather = weather_provider_from_config(config, plan.api_key.as_deref())?;
    let elevation = match plan.request.location {
        LocationQuery::Coordinates(_) if plan.request.auto_elevation => {
            Some(elevation_provider_from_config(config)?)
        }
        _ => None,
    };

    Ok(RiskChecker::new(weather, elevation, config.thresholds))
}

pub async fn run_plan(config: &Config, plan: &CheckPlan) -> anyhow::Result<()> {
    debug!(request = ?plan.request, demo = plan.demo, "Running check");

    let checker = build_checker(config, plan)?;
    let report = checker.check(&plan.request).await?;

    if plan.json {
        println!("{}", render::render_json(&report)?);
    } else {
        print!("{}", render::render_text(&report)?);
    }

    Ok(())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => {
                let api_key = interactive::prompt_api_key()?;
                config.set_api_key(&api_key);
                config.save()?;

                let path = Config::config_file_path()?;
                println!("Saved OpenWeatherMap API key to {}", path.display());
            }
            Command::Check(args) => {
                let plan = args.to_plan()?;
                run_plan(&config, &plan).await?;
            }
            Command::Interactive => {
                let plan = interactive::prompt_plan(&config).context("Interactive check aborted")?;
                run_plan(&config, &plan).await?;
            }
        }

        Ok(())
    }
}

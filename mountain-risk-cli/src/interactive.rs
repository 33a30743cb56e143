use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};
use mountain_risk_core::{CheckRequest, Config, Coordinates, LocationQuery};

use crate::cli::CheckPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocationMode {
    PlaceName,
    Coordinates,
}

impl LocationMode {
    const ALL: [LocationMode; 2] = [LocationMode::PlaceName, LocationMode::Coordinates];
}

impl std::fmt::Display for LocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationMode::PlaceName => f.write_str("City name"),
            LocationMode::Coordinates => f.write_str("Latitude & Longitude"),
        }
    }
}

pub fn prompt_api_key() -> anyhow::Result<String> {
    let key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get a free key at https://openweathermap.org/api")
        .prompt()?;

    Ok(key)
}

/// Walk through the same choices as the `check` flags.
pub fn prompt_plan(config: &Config) -> anyhow::Result<CheckPlan> {
    let demo = Confirm::new("Use demo data (no API key required)?")
        .with_default(false)
        .prompt()?;

    if demo {
        println!("Demo mode: no external API calls. Using sample weather.");
        return Ok(CheckPlan {
            request: CheckRequest::demo(),
            demo: true,
            api_key: None,
            json: false,
        });
    }

    let api_key = prompt_optional_api_key(config)?;

    let mode = Select::new("Provide location by:", LocationMode::ALL.to_vec()).prompt()?;
    let location = match mode {
        LocationMode::PlaceName => {
            let city = Text::new("City (e.g. 'Skardu, PK' or 'Kathmandu'):")
                .with_default("Skardu")
                .prompt()?;
            LocationQuery::place(&city)?
        }
        LocationMode::Coordinates => {
            let lat = Text::new("Latitude:").with_default("35.2137").prompt()?;
            let lon = Text::new("Longitude:").with_default("75.4460").prompt()?;
            LocationQuery::Coordinates(Coordinates::parse(&lat, &lon)?)
        }
    };

    let auto_elevation = match mode {
        LocationMode::Coordinates => Confirm::new("Auto-detect elevation?")
            .with_default(true)
            .with_help_message("Locations at or above the elevation threshold count as mountainous")
            .prompt()?,
        LocationMode::PlaceName => false,
    };

    let force_mountainous = Confirm::new("Force mark as mountainous (override)?")
        .with_default(false)
        .prompt()?;

    Ok(CheckPlan {
        request: CheckRequest { location, auto_elevation, force_mountainous },
        demo: false,
        api_key,
        json: false,
    })
}

/// Blank input keeps whatever key the environment or config file provides.
fn prompt_optional_api_key(config: &Config) -> anyhow::Result<Option<String>> {
    let help = if config.resolve_api_key(None).is_some() {
        "Leave blank to use the key from OPENWEATHER_API_KEY or the config file"
    } else {
        "No key configured yet; without one the weather lookup cannot run"
    };

    let key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()?;

    Ok(Some(key).filter(|k| !k.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_modes_are_labelled() {
        let labels: Vec<String> = LocationMode::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["City name", "Latitude & Longitude"]);
    }
}

use std::fmt::Write;

use mountain_risk_core::{LocationQuery, RiskError, RiskReport};

const DISCLAIMER: &str = "This is a simple, conservative assessment for guidance only. \
     Always check local authorities and live weather alerts before travelling.";

pub fn render_text(report: &RiskReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &RiskReport) -> std::fmt::Result {
    let assessment = &report.assessment;
    let raw = &assessment.snapshot;

    writeln!(out, "{}", location_line(report))?;
    if let Some(observed_at) = report.observed_at {
        writeln!(out, "Observed: {}", observed_at.format("%Y-%m-%d %H:%M UTC"))?;
    }
    writeln!(out)?;

    writeln!(out, "Risk level: {}", report.label)?;
    writeln!(out)?;

    writeln!(out, "Why this assessment?")?;
    for reason in &assessment.reasons {
        writeln!(out, "- {reason}")?;
    }
    writeln!(out)?;

    writeln!(out, "Recommendations")?;
    for advice in &assessment.advice {
        writeln!(out, "- {advice}")?;
    }
    writeln!(out)?;

    writeln!(out, "Weather snapshot (raw values)")?;
    match raw.temperature_c {
        Some(temp) => writeln!(out, "Temperature: {temp:?} °C")?,
        None => writeln!(out, "Temperature: N/A")?,
    }
    writeln!(out, "Weather: {} — {}", raw.condition_main, raw.condition_description)?;
    writeln!(out, "Wind speed: {:?} m/s", raw.wind_speed_ms)?;
    writeln!(out, "Rain (1h): {:?} mm", raw.rain_1h_mm)?;
    writeln!(out, "Snow (1h): {:?} mm", raw.snow_1h_mm)?;

    match report.elevation_m {
        Some(elevation) => {
            writeln!(out, "Elevation (auto-detected): {elevation} m")?;
            writeln!(
                out,
                "Mountainous (threshold {} m): {}",
                report.elevation_threshold_m,
                if report.mountainous { "Yes" } else { "No" }
            )?;
        }
        None => {
            writeln!(
                out,
                "Elevation: N/A (provide lat/lon and enable auto-detect to fetch elevation)."
            )?;
            if report.mountainous {
                writeln!(out, "Mountainous: Yes (override)")?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{DISCLAIMER}")
}

fn location_line(report: &RiskReport) -> String {
    match (&report.location_name, &report.location) {
        (Some(name), LocationQuery::Coordinates(coords)) => format!("Location: {name} ({coords})"),
        (Some(name), LocationQuery::Place { .. }) => format!("Location: {name}"),
        (None, query) => format!("Location: {query}"),
    }
}

pub fn render_json(report: &RiskReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Message shown for a failed run.
///
/// Known failures are shown as-is; anything else gets a generic prefix.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<RiskError>() {
        Some(risk_err) => risk_err.to_string(),
        None => format!("An error occurred: {err:#}"),
    }
}

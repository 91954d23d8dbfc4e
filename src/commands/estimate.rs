use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use std::fs;
use std::path::Path;
use tracing::info;

use carbonscope::config::EstimatorConfig;
use carbonscope::engine;
use carbonscope::model::Summary;

/// Execute the estimate command
///
/// Loads configuration, runs the engine over the usage document, applies the
/// optional day/range post-filter, and renders the Summary. Rounding happens
/// only here, at presentation time.
#[allow(clippy::too_many_arguments)]
pub fn execute(
    regions_path: &Path,
    profiles_path: &Path,
    usage_path: &Path,
    region: &str,
    day: Option<NaiveDate>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let config = EstimatorConfig::load(regions_path, profiles_path)?;
    let document = fs::read_to_string(usage_path)
        .with_context(|| format!("failed to read usage document {}", usage_path.display()))?;

    let summary = engine::compute(&document, region, &config)?;
    info!(region, profiles = summary.profiles.len(), "estimate computed");

    let summary = match day {
        Some(date) => summary.for_day(date),
        None if start.is_some() || end.is_some() => summary.clamp_range(start, end),
        None => summary,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &Summary) {
    println!(
        "{} {}",
        "Region:".bold(),
        summary.region.as_str().cyan()
    );
    println!();

    for profile in &summary.profiles {
        println!(
            "{}  {} inferences, {:.4} kWh, {:.2} g CO2e",
            profile.profile.as_str().green().bold(),
            profile.total_inferences,
            profile.total_energy_kwh,
            profile.total_carbon_gco2e,
        );
        for dayline in &profile.days {
            println!(
                "  {}  {:>8}  {:>12.4} kWh  {:>12.2} g",
                dayline.date, dayline.inferences, dayline.energy_kwh, dayline.carbon_gco2e,
            );
        }
        println!();
    }

    let totals = summary.totals();
    println!(
        "{}  {} inferences, {:.4} kWh, {:.2} g CO2e",
        "Total:".bold(),
        totals.inferences,
        totals.energy_kwh,
        totals.carbon_gco2e,
    );
}

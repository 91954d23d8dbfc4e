use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::info;

use carbonscope::config::EstimatorConfig;

/// Execute the config show command
///
/// Displays the merged configuration as TOML.
pub fn show(regions_path: &Path, profiles_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());

    let cfg = EstimatorConfig::load(regions_path, profiles_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&cfg)?;
    println!("{}", toml_string);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
///
/// Loading already runs full validation, so reaching the summary line means
/// every factor is in range.
pub fn validate(regions_path: &Path, profiles_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = EstimatorConfig::load(regions_path, profiles_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Regions: {}", cfg.regions.len());
    println!("  Profiles: {}", cfg.profiles.len());

    info!("Configuration validation successful");
    Ok(())
}

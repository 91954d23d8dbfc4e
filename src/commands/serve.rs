use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use tracing::info;

use carbonscope::config::EstimatorConfig;
use carbonscope::server;

/// Execute the serve command
///
/// Loads and validates configuration once, then hands it to the service; the
/// loaded configuration is treated as read-only for the lifetime of the
/// process.
pub async fn execute(
    regions_path: &Path,
    profiles_path: &Path,
    host: &str,
    port: u16,
) -> Result<()> {
    println!("{}", "Starting estimator service...".green());

    let config = EstimatorConfig::load(regions_path, profiles_path)?;
    info!(
        regions = config.regions.len(),
        profiles = config.profiles.len(),
        "configuration loaded"
    );

    server::start_server(config, host, port).await
}

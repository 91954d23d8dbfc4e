use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Grid parameters for one deployment region
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Region {
    /// Ratio of total data-center draw to IT-equipment draw, >= 1.0
    pub power_usage_effectiveness: f64,
    /// Grams of CO2-equivalent per kWh of the regional grid mix, >= 0
    pub carbon_intensity_gco2e_per_kwh: f64,
}

/// Effective power draw contributed by each compute resource during inference
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HardwareProfile {
    pub gpu_power_watts: f64,
    pub cpu_power_watts: f64,
    /// Fraction of GPU rated power attributable to the workload, in [0, 1]
    pub gpu_efficiency: f64,
    /// Fraction of CPU rated power attributable to the workload, in [0, 1]
    pub cpu_efficiency: f64,
}

/// A named interaction pattern (chatbot, completion, translation, ...) with
/// characteristic request sizes, throughput, and the hardware it runs on
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UsageProfile {
    pub average_input_tokens: f64,
    pub average_output_tokens: f64,
    /// Decode throughput in tokens per second, > 0
    pub throughput_tokens_per_second: f64,
    pub hardware: HardwareProfile,
}

/// Immutable configuration for one calculation run
///
/// Loaded from two independent documents (region factors keyed by region
/// name, hardware/profile factors keyed by profile name), validated once,
/// then treated as read-only. There is no process-wide singleton: the caller
/// owns the value and may share it across concurrent runs behind an `Arc`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EstimatorConfig {
    pub regions: HashMap<String, Region>,
    pub profiles: HashMap<String, UsageProfile>,
}

impl EstimatorConfig {
    /// Load and validate configuration from the two TOML documents
    pub fn load(regions_path: &Path, profiles_path: &Path) -> Result<Self, ConfigError> {
        let regions = read_toml(regions_path)?;
        let profiles = read_toml(profiles_path)?;
        Self::from_parts(regions, profiles)
    }

    /// Build a configuration from already-deserialized registries,
    /// validating every value before it can reach a calculation
    pub fn from_parts(
        regions: HashMap<String, Region>,
        profiles: HashMap<String, UsageProfile>,
    ) -> Result<Self, ConfigError> {
        let cfg = Self { regions, profiles };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Resolve a region by name
    pub fn region(&self, name: &str) -> Result<&Region, ConfigError> {
        self.regions
            .get(name)
            .ok_or_else(|| ConfigError::UnknownRegion(name.to_string()))
    }

    /// Resolve a usage profile (and, through it, its hardware) by name
    pub fn profile(&self, name: &str) -> Result<&UsageProfile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    /// Validate every loaded value
    ///
    /// Out-of-range factors fail here, at load time, so NaN or negative
    /// figures can never propagate into a Summary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, region) in &self.regions {
            check(
                region.power_usage_effectiveness >= 1.0,
                format!("regions.{}.power_usage_effectiveness", name),
                region.power_usage_effectiveness,
            )?;
            check(
                region.carbon_intensity_gco2e_per_kwh >= 0.0,
                format!("regions.{}.carbon_intensity_gco2e_per_kwh", name),
                region.carbon_intensity_gco2e_per_kwh,
            )?;
        }

        for (name, profile) in &self.profiles {
            check(
                profile.average_input_tokens >= 0.0,
                format!("profiles.{}.average_input_tokens", name),
                profile.average_input_tokens,
            )?;
            check(
                profile.average_output_tokens >= 0.0,
                format!("profiles.{}.average_output_tokens", name),
                profile.average_output_tokens,
            )?;
            check(
                profile.throughput_tokens_per_second > 0.0
                    && profile.throughput_tokens_per_second.is_finite(),
                format!("profiles.{}.throughput_tokens_per_second", name),
                profile.throughput_tokens_per_second,
            )?;

            let hw = &profile.hardware;
            check(
                hw.gpu_power_watts >= 0.0,
                format!("profiles.{}.hardware.gpu_power_watts", name),
                hw.gpu_power_watts,
            )?;
            check(
                hw.cpu_power_watts >= 0.0,
                format!("profiles.{}.hardware.cpu_power_watts", name),
                hw.cpu_power_watts,
            )?;
            check(
                (0.0..=1.0).contains(&hw.gpu_efficiency),
                format!("profiles.{}.hardware.gpu_efficiency", name),
                hw.gpu_efficiency,
            )?;
            check(
                (0.0..=1.0).contains(&hw.cpu_efficiency),
                format!("profiles.{}.hardware.cpu_efficiency", name),
                hw.cpu_efficiency,
            )?;
        }

        Ok(())
    }
}

// NaN fails every comparison above, so it is rejected like any other
// out-of-range value.
fn check(ok: bool, field: String, value: f64) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&raw)?)
}

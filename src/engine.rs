use tracing::debug;

use crate::aggregator;
use crate::calculator;
use crate::config::EstimatorConfig;
use crate::error::EngineError;
use crate::model::Summary;
use crate::parser;

/// Run one full estimation: parse the usage document, cost every record,
/// aggregate into a Summary
///
/// The region and every profile are resolved once from the caller-owned
/// configuration; the whole run fails on the first bad record or unknown
/// name, so a returned Summary is never partial. Stateless and free of I/O,
/// concurrent invocations are fully independent.
pub fn compute(
    usage_document: &str,
    region_name: &str,
    config: &EstimatorConfig,
) -> Result<Summary, EngineError> {
    let region = config.region(region_name)?;
    let records = parser::parse_usage(usage_document, config)?;

    debug!(
        region = region_name,
        records = records.len(),
        "costing usage records"
    );

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let profile = config.profile(&record.profile)?;
        let input_tokens = record.input_tokens.unwrap_or(profile.average_input_tokens);
        let output_tokens = record.output_tokens.unwrap_or(profile.average_output_tokens);
        let cost = calculator::inference_cost(input_tokens, output_tokens, profile, region);
        rows.push((record, cost));
    }

    Ok(aggregator::aggregate(region_name, &rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HardwareProfile, Region, UsageProfile};
    use crate::error::{ConfigError, ParseError};
    use std::collections::HashMap;

    fn test_config() -> EstimatorConfig {
        let mut regions = HashMap::new();
        regions.insert(
            "eu-west".to_string(),
            Region {
                power_usage_effectiveness: 1.2,
                carbon_intensity_gco2e_per_kwh: 55.0,
            },
        );

        let mut profiles = HashMap::new();
        profiles.insert(
            "chatbot".to_string(),
            UsageProfile {
                average_input_tokens: 1000.0,
                average_output_tokens: 200.0,
                throughput_tokens_per_second: 60.0,
                hardware: HardwareProfile {
                    gpu_power_watts: 400.0,
                    cpu_power_watts: 100.0,
                    gpu_efficiency: 1.0,
                    cpu_efficiency: 0.2,
                },
            },
        );

        EstimatorConfig::from_parts(regions, profiles).unwrap()
    }

    #[test]
    fn test_single_inference_matches_reference_figures() {
        let document = r#"{
            "entries": [{"date": "2025-08-12", "profile": "chatbot", "count": 1}]
        }"#;

        let summary = compute(document, "eu-west", &test_config()).unwrap();
        let profile = &summary.profiles[0];

        assert_eq!(summary.region, "eu-west");
        assert_eq!(profile.total_inferences, 1);
        assert!((profile.total_energy_kwh - 2.3338).abs() < 1e-4);
        assert!((profile.total_carbon_gco2e - 128.36).abs() < 1e-2);
    }

    #[test]
    fn test_carbon_is_energy_times_intensity() {
        let document = r#"{
            "entries": [
                {"date": "2025-08-12", "profile": "chatbot", "count": 7},
                {"date": "2025-08-13", "profile": "chatbot", "count": 3}
            ]
        }"#;

        let summary = compute(document, "eu-west", &test_config()).unwrap();
        let profile = &summary.profiles[0];

        assert!(
            (profile.total_carbon_gco2e - profile.total_energy_kwh * 55.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_unknown_region_fails() {
        let document = r#"{"entries": []}"#;

        let err = compute(document, "atlantis", &test_config()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Config(ConfigError::UnknownRegion(_))
        ));
    }

    #[test]
    fn test_unknown_profile_fails_with_no_summary() {
        let document = r#"{
            "entries": [
                {"date": "2025-08-12", "profile": "chatbot", "count": 10},
                {"date": "2025-08-12", "profile": "summarizer", "count": 1}
            ]
        }"#;

        let err = compute(document, "eu-west", &test_config()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Parse(ParseError::UnknownProfile(name)) if name == "summarizer"
        ));
    }

    #[test]
    fn test_token_overrides_replace_profile_averages() {
        let config = test_config();
        let with_override = r#"{
            "entries": [{"date": "2025-08-12", "profile": "chatbot", "count": 1,
                         "input_tokens": 0.0, "output_tokens": 0.0}]
        }"#;

        let summary = compute(with_override, "eu-west", &config).unwrap();
        let profile = &summary.profiles[0];

        assert_eq!(profile.total_energy_kwh, 0.0);
        assert_eq!(profile.total_carbon_gco2e, 0.0);
    }

    #[test]
    fn test_empty_document_yields_empty_summary() {
        let summary = compute(r#"{"entries": []}"#, "eu-west", &test_config()).unwrap();
        assert!(summary.profiles.is_empty());
        assert_eq!(summary.totals().inferences, 0);
    }
}

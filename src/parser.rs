use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::EstimatorConfig;
use crate::error::ParseError;
use crate::model::UsageRecord;

/// Raw usage document shape
///
/// Entries each name a calendar day, a profile, and an observed inference
/// count. Token overrides are optional; absent values fall back to the
/// profile's configured averages downstream.
#[derive(Debug, Deserialize)]
struct UsageDocument {
    entries: Vec<UsageEntry>,
}

#[derive(Debug, Deserialize)]
struct UsageEntry {
    date: NaiveDate,
    profile: String,
    count: u64,
    #[serde(default)]
    input_tokens: Option<f64>,
    #[serde(default)]
    output_tokens: Option<f64>,
}

/// Parse a raw usage document into normalized records
///
/// Records come out in document order with no deduplication; multiple entries
/// for the same (date, profile) stay distinct and are summed by the
/// aggregator. The whole batch fails on the first bad record, so callers can
/// rely on a returned batch being complete.
pub fn parse_usage(
    document: &str,
    config: &EstimatorConfig,
) -> Result<Vec<UsageRecord>, ParseError> {
    let doc: UsageDocument =
        serde_json::from_str(document).map_err(|err| ParseError::Malformed {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        })?;

    let mut records = Vec::with_capacity(doc.entries.len());
    for (index, entry) in doc.entries.into_iter().enumerate() {
        if config.profile(&entry.profile).is_err() {
            return Err(ParseError::UnknownProfile(entry.profile));
        }
        check_override(index, "input_tokens", entry.input_tokens)?;
        check_override(index, "output_tokens", entry.output_tokens)?;

        records.push(UsageRecord {
            date: entry.date,
            profile: entry.profile,
            count: entry.count,
            input_tokens: entry.input_tokens,
            output_tokens: entry.output_tokens,
        });
    }

    Ok(records)
}

fn check_override(
    entry: usize,
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ParseError> {
    match value {
        Some(v) if !(v >= 0.0 && v.is_finite()) => Err(ParseError::InvalidOverride {
            entry,
            field,
            value: v,
        }),
        _ => Ok(()),
    }
}

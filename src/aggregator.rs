use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::model::{DailyFootprint, InferenceCost, ProfileSummary, Summary, UsageRecord};

/// Fold per-record costs into a reportable Summary
///
/// Energy and carbon scale linearly with each record's inference count.
/// Latency does not: it is a per-inference figure and never enters the
/// Summary. Profiles keep first-seen document order and daily buckets come
/// out sorted by date ascending, so the same document always produces the
/// same Summary. Repeated (date, profile) entries accumulate into one bucket
/// rather than overwriting each other.
pub fn aggregate(region: &str, rows: &[(UsageRecord, InferenceCost)]) -> Summary {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, BTreeMap<NaiveDate, DailyFootprint>> = HashMap::new();

    for (record, cost) in rows {
        if !buckets.contains_key(&record.profile) {
            order.push(record.profile.clone());
        }
        let days = buckets.entry(record.profile.clone()).or_default();
        let day = days.entry(record.date).or_insert_with(|| DailyFootprint {
            date: record.date,
            inferences: 0,
            energy_kwh: 0.0,
            carbon_gco2e: 0.0,
        });

        let count = record.count as f64;
        day.inferences += record.count;
        day.energy_kwh += cost.energy_kwh * count;
        day.carbon_gco2e += cost.carbon_gco2e * count;
    }

    let profiles = order
        .into_iter()
        .map(|name| {
            let days: Vec<DailyFootprint> = buckets
                .remove(&name)
                .map(|by_date| by_date.into_values().collect())
                .unwrap_or_default();

            // totals are derived from the buckets themselves, so they always
            // equal the sum of the daily breakdown
            let mut summary = ProfileSummary {
                profile: name,
                total_inferences: 0,
                total_energy_kwh: 0.0,
                total_carbon_gco2e: 0.0,
                days,
            };
            for day in &summary.days {
                summary.total_inferences += day.inferences;
                summary.total_energy_kwh += day.energy_kwh;
                summary.total_carbon_gco2e += day.carbon_gco2e;
            }
            summary
        })
        .collect();

    Summary {
        region: region.to_string(),
        profiles,
    }
}

use chrono::NaiveDate;
use serde::Serialize;

/// One observed usage occurrence, produced by the usage parser
///
/// Immutable once created. Token overrides are per-entry: when absent, the
/// profile's configured averages apply.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub profile: String,
    pub count: u64,
    pub input_tokens: Option<f64>,
    pub output_tokens: Option<f64>,
}

/// Computed cost of a single inference under one (profile, hardware, region)
/// triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InferenceCost {
    pub time_seconds: f64,
    pub energy_kwh: f64,
    pub carbon_gco2e: f64,
}

/// Per-day slice of a profile's footprint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyFootprint {
    pub date: NaiveDate,
    pub inferences: u64,
    pub energy_kwh: f64,
    pub carbon_gco2e: f64,
}

/// Aggregated footprint of one usage profile over the whole document
///
/// Totals are always the exact sum of the daily breakdown entries. Latency is
/// a per-inference figure and is deliberately absent here: it does not sum.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub profile: String,
    pub total_inferences: u64,
    pub total_energy_kwh: f64,
    pub total_carbon_gco2e: f64,
    /// Sorted by date ascending
    pub days: Vec<DailyFootprint>,
}

/// Grand totals across every profile in a Summary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub inferences: u64,
    pub energy_kwh: f64,
    pub carbon_gco2e: f64,
}

/// The normalized output of one calculation run
///
/// Profiles appear in first-seen order from the input document, so repeated
/// runs over the same document are reproducible. Read-only after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub region: String,
    pub profiles: Vec<ProfileSummary>,
}

impl Summary {
    /// Restrict the summary to days within `[start, end]` (both inclusive,
    /// either side open when `None`)
    ///
    /// This is a pure post-filter over the daily breakdowns: profile totals
    /// are recomputed from the retained days, nothing is recalculated.
    pub fn clamp_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Summary {
        let profiles = self
            .profiles
            .iter()
            .map(|p| {
                let days: Vec<DailyFootprint> = p
                    .days
                    .iter()
                    .filter(|d| start.map_or(true, |s| d.date >= s))
                    .filter(|d| end.map_or(true, |e| d.date <= e))
                    .cloned()
                    .collect();

                let mut filtered = ProfileSummary {
                    profile: p.profile.clone(),
                    total_inferences: 0,
                    total_energy_kwh: 0.0,
                    total_carbon_gco2e: 0.0,
                    days,
                };
                for day in &filtered.days {
                    filtered.total_inferences += day.inferences;
                    filtered.total_energy_kwh += day.energy_kwh;
                    filtered.total_carbon_gco2e += day.carbon_gco2e;
                }
                filtered
            })
            .collect();

        Summary {
            region: self.region.clone(),
            profiles,
        }
    }

    /// Single-day slice, a convenience over [`Summary::clamp_range`]
    pub fn for_day(&self, date: NaiveDate) -> Summary {
        self.clamp_range(Some(date), Some(date))
    }

    /// Grand totals across all profiles
    pub fn totals(&self) -> Totals {
        let mut totals = Totals {
            inferences: 0,
            energy_kwh: 0.0,
            carbon_gco2e: 0.0,
        };
        for profile in &self.profiles {
            totals.inferences += profile.total_inferences;
            totals.energy_kwh += profile.total_energy_kwh;
            totals.carbon_gco2e += profile.total_carbon_gco2e;
        }
        totals
    }
}

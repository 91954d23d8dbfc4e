use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::config::EstimatorConfig;
use crate::engine;
use crate::error::EngineError;
use crate::model::Summary;

/// Shared read-only state for the service adapter
///
/// The configuration is resolved once at startup and shared across concurrent
/// requests; each request runs the engine independently.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EstimatorConfig>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateParams {
    pub region: String,
    /// Optional inclusive start of a date-range post-filter
    pub start: Option<NaiveDate>,
    /// Optional inclusive end of a date-range post-filter
    pub end: Option<NaiveDate>,
}

/// Handle POST /estimate
///
/// The request body is the raw usage document. It is processed in memory and
/// never written to durable storage; only the aggregated Summary leaves this
/// handler. Range parameters are pure post-filters over the computed daily
/// breakdowns.
pub async fn estimate(
    State(state): State<AppState>,
    Query(params): Query<EstimateParams>,
    body: String,
) -> Result<Json<Summary>, EngineError> {
    let summary = engine::compute(&body, &params.region, &state.config)?;

    info!(
        region = %params.region,
        profiles = summary.profiles.len(),
        "estimate computed"
    );

    let summary = if params.start.is_some() || params.end.is_some() {
        summary.clamp_range(params.start, params.end)
    } else {
        summary
    };

    Ok(Json(summary))
}

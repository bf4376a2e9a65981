//! Grid snapshot handlers.

use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::response::Response;
use climate_store::GridSnapshot;
use hazard_common::{BoundsQuery, HazardKind, Statistic};
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;
use super::{error_response, json_response};

/// Query parameters shared by the snapshot endpoints.
#[derive(Debug, Deserialize)]
pub struct SnapshotParams {
    pub time: String,
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
    #[serde(default = "default_stat")]
    pub stat: String,
    /// Only used by the generic endpoint.
    pub variable: Option<String>,
}

fn default_stat() -> String {
    "mean".to_string()
}

impl SnapshotParams {
    fn bounds(&self) -> BoundsQuery {
        BoundsQuery::new(self.lat_min, self.lat_max, self.lon_min, self.lon_max)
    }
}

/// GET /climate/wind-snapshot
pub async fn wind_snapshot_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SnapshotParams>,
) -> Response {
    snapshot(&state, HazardKind::Wind, &params)
}

/// GET /climate/wave-snapshot
pub async fn wave_snapshot_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SnapshotParams>,
) -> Response {
    snapshot(&state, HazardKind::Wave, &params)
}

/// GET /climate/snapshot (generic, `variable` selects the hazard)
pub async fn generic_snapshot_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<SnapshotParams>,
) -> Response {
    let hazard = match HazardKind::parse(params.variable.as_deref().unwrap_or("wind")) {
        Ok(hazard) => hazard,
        Err(err) => return error_response(&err),
    };
    snapshot(&state, hazard, &params)
}

fn snapshot(state: &AppState, hazard: HazardKind, params: &SnapshotParams) -> Response {
    let stat = match Statistic::parse(&params.stat) {
        Ok(stat) => stat,
        Err(err) => return error_response(&err),
    };

    match state
        .reader
        .grid_snapshot(hazard, stat, &params.time, &params.bounds())
    {
        Ok(snapshot) => json_response(&snapshot_payload(&snapshot)),
        Err(err) => {
            tracing::warn!(%err, %hazard, "snapshot query failed");
            error_response(&err)
        }
    }
}

/// Build the `{lat, lon, values, time}` wire payload.
pub(crate) fn snapshot_payload(snapshot: &GridSnapshot) -> serde_json::Value {
    json!({
        "lat": hazard_common::sanitize_series(&snapshot.lats),
        "lon": hazard_common::sanitize_series(&snapshot.lons),
        "values": hazard_common::sanitize_grid(&snapshot.values),
        "time": snapshot.time.to_rfc3339(),
    })
}

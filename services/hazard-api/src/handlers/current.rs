//! Live current snapshot handler.

use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::http::{header, StatusCode};
use axum::response::Response;
use hazard_common::BoundsQuery;
use serde::Deserialize;

use crate::state::AppState;
use super::{error_response, json_response};

/// Query parameters for the current snapshot endpoint.
#[derive(Debug, Deserialize)]
pub struct CurrentSnapshotParams {
    pub time: String,
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
}

/// GET /climate/current-snapshot
pub async fn current_snapshot_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<CurrentSnapshotParams>,
) -> Response {
    let Some(feed) = state.current.as_ref() else {
        let body = serde_json::json!({
            "error": "current feed not configured; set CURRENT_API_URL and CMEMS_USERNAME/CMEMS_PASSWORD"
        })
        .to_string();
        return Response::builder()
            .status(StatusCode::NOT_IMPLEMENTED)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("static response");
    };

    let bounds = BoundsQuery::new(params.lat_min, params.lat_max, params.lon_min, params.lon_max);
    match feed.snapshot(&params.time, &bounds).await {
        Ok(snapshot) => json_response(&snapshot.to_json()),
        Err(err) => {
            tracing::warn!(%err, "current snapshot failed");
            error_response(&err)
        }
    }
}

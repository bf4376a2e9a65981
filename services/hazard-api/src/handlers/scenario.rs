//! Scenario comparison handlers.

use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::response::Response;
use hazard_analytics::ComparisonRequest;
use hazard_common::HazardKind;
use serde::Deserialize;

use crate::state::AppState;
use super::{error_response, json_response};

fn default_scenario() -> String {
    "ssp585".to_string()
}

fn default_stat() -> String {
    "mean".to_string()
}

fn default_historical_period() -> String {
    "1985-2014".to_string()
}

fn default_future_period() -> String {
    "2035-2064".to_string()
}

/// Query parameters for the wind comparison endpoint; thresholds are in
/// knots.
#[derive(Debug, Deserialize)]
pub struct WindComparisonParams {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_scenario")]
    pub scenario: String,
    #[serde(default = "default_stat")]
    pub stat: String,
    #[serde(default = "default_historical_period")]
    pub historical_period: String,
    #[serde(default = "default_future_period")]
    pub future_period: String,
    #[serde(default = "default_wind_operational")]
    pub operational_max_knots: f64,
    #[serde(default = "default_wind_attention")]
    pub attention_max_knots: f64,
}

fn default_wind_operational() -> f64 {
    15.0
}

fn default_wind_attention() -> f64 {
    20.0
}

/// Query parameters for the wave comparison endpoint; thresholds are in
/// meters.
#[derive(Debug, Deserialize)]
pub struct WaveComparisonParams {
    pub lat: f64,
    pub lon: f64,
    #[serde(default = "default_scenario")]
    pub scenario: String,
    #[serde(default = "default_stat")]
    pub stat: String,
    #[serde(default = "default_historical_period")]
    pub historical_period: String,
    #[serde(default = "default_future_period")]
    pub future_period: String,
    #[serde(default = "default_wave_operational")]
    pub operational_max_meters: f64,
    #[serde(default = "default_wave_attention")]
    pub attention_max_meters: f64,
}

fn default_wave_operational() -> f64 {
    2.0
}

fn default_wave_attention() -> f64 {
    4.0
}

/// GET /climate/wind-scenario-comparison
pub async fn wind_comparison_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<WindComparisonParams>,
) -> Response {
    let request = ComparisonRequest {
        lat: params.lat,
        lon: params.lon,
        scenario: params.scenario,
        stat: params.stat,
        historical_period: params.historical_period,
        future_period: params.future_period,
        operational_max: params.operational_max_knots,
        attention_max: params.attention_max_knots,
    };
    compare(&state, HazardKind::Wind, request)
}

/// GET /climate/wave-scenario-comparison
pub async fn wave_comparison_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<WaveComparisonParams>,
) -> Response {
    let request = ComparisonRequest {
        lat: params.lat,
        lon: params.lon,
        scenario: params.scenario,
        stat: params.stat,
        historical_period: params.historical_period,
        future_period: params.future_period,
        operational_max: params.operational_max_meters,
        attention_max: params.attention_max_meters,
    };
    compare(&state, HazardKind::Wave, request)
}

fn compare(state: &AppState, hazard: HazardKind, request: ComparisonRequest) -> Response {
    match state.scenarios.compare(hazard, &request) {
        Ok(payload) => match serde_json::to_value(&payload) {
            Ok(value) => json_response(&value),
            Err(err) => {
                tracing::error!(%err, "failed to serialize comparison payload");
                error_response(&hazard_common::HazardError::DataRead(err.to_string()))
            }
        },
        Err(err) => {
            tracing::warn!(%err, %hazard, "scenario comparison rejected");
            error_response(&err)
        }
    }
}

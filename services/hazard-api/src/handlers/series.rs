//! Point time-series and regional statistics handlers.

use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::response::Response;
use hazard_analytics::summarize;
use hazard_common::{BoundsQuery, HazardKind, PeriodRange, Scenario, Statistic};
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;
use super::{error_response, json_response};

fn default_stat() -> String {
    "mean".to_string()
}

fn default_scenario() -> String {
    "ssp585".to_string()
}

/// Default thresholds per hazard, in reporting units.
fn default_thresholds(hazard: HazardKind) -> (f64, f64) {
    match hazard {
        HazardKind::Wind => (15.0, 20.0),
        HazardKind::Wave => (2.0, 4.0),
    }
}

/// Query parameters for the point time-series endpoint.
#[derive(Debug, Deserialize)]
pub struct TimeseriesParams {
    pub variable: String,
    pub lat: f64,
    pub lon: f64,
    pub start_year: i32,
    pub end_year: i32,
    #[serde(default = "default_stat")]
    pub stat: String,
    #[serde(default = "default_scenario")]
    pub scenario: String,
}

/// GET /climate/timeseries
pub async fn timeseries_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<TimeseriesParams>,
) -> Response {
    let parsed = (|| {
        let hazard = HazardKind::parse(&params.variable)?;
        let stat = Statistic::parse(&params.stat)?;
        let scenario = Scenario::parse(&params.scenario)?;
        let period = PeriodRange::parse(&format!("{}-{}", params.start_year, params.end_year))?;
        Ok::<_, hazard_common::HazardError>((hazard, stat, scenario, period))
    })();
    let (hazard, stat, scenario, period) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => return error_response(&err),
    };

    match state
        .reader
        .period_point_series(hazard, stat, scenario, params.lat, params.lon, period)
    {
        Ok(series) => {
            let factor = hazard.unit_factor();
            let values: Vec<f64> = series.values.iter().map(|v| v * factor).collect();
            let times: Vec<String> = series.times.iter().map(|t| t.to_rfc3339()).collect();
            json_response(&json!({
                "variable": params.variable,
                "units": hazard.unit(),
                "lat": params.lat,
                "lon": params.lon,
                "times": times,
                "values": hazard_common::sanitize_series(&values),
            }))
        }
        Err(err) => {
            tracing::warn!(%err, "timeseries query failed");
            error_response(&err)
        }
    }
}

/// Query parameters for the regional statistics endpoint.
#[derive(Debug, Deserialize)]
pub struct StatisticsParams {
    pub variable: String,
    pub start_year: i32,
    pub end_year: i32,
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
    #[serde(default = "default_stat")]
    pub stat: String,
    #[serde(default = "default_scenario")]
    pub scenario: String,
    pub operational_max: Option<f64>,
    pub attention_max: Option<f64>,
}

/// GET /climate/statistics
pub async fn statistics_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<StatisticsParams>,
) -> Response {
    let parsed = (|| {
        let hazard = HazardKind::parse(&params.variable)?;
        let stat = Statistic::parse(&params.stat)?;
        let scenario = Scenario::parse(&params.scenario)?;
        let period = PeriodRange::parse(&format!("{}-{}", params.start_year, params.end_year))?;
        Ok::<_, hazard_common::HazardError>((hazard, stat, scenario, period))
    })();
    let (hazard, stat, scenario, period) = match parsed {
        Ok(parsed) => parsed,
        Err(err) => return error_response(&err),
    };

    let (default_op, default_att) = default_thresholds(hazard);
    let operational_max = params.operational_max.unwrap_or(default_op);
    let attention_max = params.attention_max.unwrap_or(default_att);

    let bounds = BoundsQuery::new(params.lat_min, params.lat_max, params.lon_min, params.lon_max);
    match state
        .reader
        .region_samples(hazard, stat, scenario, period, &bounds)
    {
        Ok(samples) => {
            let factor = hazard.unit_factor();
            let converted: Vec<f64> = samples.iter().map(|v| v * factor).collect();
            let summary = summarize(&converted, operational_max, attention_max);
            json_response(&json!({
                "variable": params.variable,
                "units": hazard.unit(),
                "period": period.to_string(),
                "operational_max": operational_max,
                "attention_max": attention_max,
                "statistics": summary,
            }))
        }
        Err(err) => {
            tracing::warn!(%err, "statistics query failed");
            error_response(&err)
        }
    }
}

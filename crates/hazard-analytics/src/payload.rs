//! Scenario comparison payload types.

use serde::{Deserialize, Serialize};

use crate::aggregate::monthly_labels;
use crate::summary::SummaryStatistics;

/// Request echo attached to every comparison payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMeta {
    pub scenario: String,
    pub stat: String,
    pub lat: f64,
    pub lon: f64,
    pub historical_period: String,
    pub future_period: String,
    /// Reporting unit of every value in the payload ("kn" or "m").
    pub units: String,
    pub operational_max: f64,
    pub attention_max: f64,
}

/// Future minus historical on the headline fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDelta {
    pub mean: f64,
    pub p95: f64,
    pub stop_samples: i64,
}

/// Yearly and monthly mean series for both periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub historical_years: Vec<i32>,
    pub historical_yearly_mean: Vec<f64>,
    pub future_years: Vec<i32>,
    pub future_yearly_mean: Vec<f64>,
    /// Always "01".."12"; the monthly slots below follow this order.
    pub monthly_labels: Vec<String>,
    pub historical_monthly_mean: Vec<Option<f64>>,
    pub future_monthly_mean: Vec<Option<f64>>,
}

impl Default for ComparisonSeries {
    fn default() -> Self {
        Self {
            historical_years: Vec::new(),
            historical_yearly_mean: Vec::new(),
            future_years: Vec::new(),
            future_yearly_mean: Vec::new(),
            monthly_labels: monthly_labels(),
            historical_monthly_mean: vec![None; 12],
            future_monthly_mean: vec![None; 12],
        }
    }
}

/// Historical-vs-future comparison at one point. Built per request,
/// never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// False when a routed dataset file is missing; the rest of the
    /// payload is then zero-filled and `message` carries the cause.
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub meta: ComparisonMeta,
    pub historical: SummaryStatistics,
    pub future: SummaryStatistics,
    pub delta: ComparisonDelta,
    pub series: ComparisonSeries,
}

impl ScenarioComparison {
    /// The degraded payload for a missing dataset file.
    pub fn unavailable(meta: ComparisonMeta, message: String) -> Self {
        Self {
            available: false,
            message: Some(message),
            meta,
            historical: SummaryStatistics::default(),
            future: SummaryStatistics::default(),
            delta: ComparisonDelta::default(),
            series: ComparisonSeries::default(),
        }
    }
}

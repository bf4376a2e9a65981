//! Historical-vs-future scenario comparison pipeline.

use std::sync::Arc;

use climate_store::{ClimateReader, PointSeries};
use hazard_common::{HazardError, HazardKind, HazardResult, PeriodRange, Scenario, Statistic};

use crate::aggregate::{monthly_labels, monthly_means, yearly_means};
use crate::payload::{ComparisonDelta, ComparisonMeta, ComparisonSeries, ScenarioComparison};
use crate::summary::summarize;

/// Inputs to a scenario comparison, as received from the transport
/// layer. Scenario, statistic and period strings are validated here,
/// before any file is touched.
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub lat: f64,
    pub lon: f64,
    pub scenario: String,
    pub stat: String,
    pub historical_period: String,
    pub future_period: String,
    /// Threshold between operational and attention, in reporting units.
    pub operational_max: f64,
    /// Threshold between attention and stop, in reporting units.
    pub attention_max: f64,
}

/// Orchestrates router, handle cache, selector, summarizer and
/// aggregator into one comparison payload.
pub struct ScenarioService {
    reader: Arc<ClimateReader>,
}

impl ScenarioService {
    pub fn new(reader: Arc<ClimateReader>) -> Self {
        Self { reader }
    }

    /// Build a comparison for one hazard at one point.
    ///
    /// Validation failures surface immediately. A missing dataset file
    /// degrades to the `available: false` payload instead of failing
    /// the caller; it is the only recovered error.
    pub fn compare(
        &self,
        hazard: HazardKind,
        request: &ComparisonRequest,
    ) -> HazardResult<ScenarioComparison> {
        let historical_period = PeriodRange::parse(&request.historical_period)?;
        let future_period = PeriodRange::parse(&request.future_period)?;
        let stat = Statistic::parse(&request.stat)?;
        let scenario = Scenario::parse(&request.scenario)?;

        let meta = ComparisonMeta {
            scenario: scenario.to_string(),
            stat: stat.to_string(),
            lat: request.lat,
            lon: request.lon,
            historical_period: request.historical_period.clone(),
            future_period: request.future_period.clone(),
            units: hazard.unit().to_string(),
            operational_max: request.operational_max,
            attention_max: request.attention_max,
        };

        let loaded = self.load_series(
            hazard,
            stat,
            scenario,
            request.lat,
            request.lon,
            historical_period,
            future_period,
        );
        let (historical_series, future_series) = match loaded {
            Ok(pair) => pair,
            Err(err @ HazardError::DatasetNotFound { .. }) => {
                tracing::warn!(%err, "scenario comparison degraded to unavailable");
                return Ok(ScenarioComparison::unavailable(meta, err.to_string()));
            }
            Err(err) => return Err(err),
        };

        let factor = hazard.unit_factor();
        let historical_values: Vec<f64> =
            historical_series.values.iter().map(|v| v * factor).collect();
        let future_values: Vec<f64> = future_series.values.iter().map(|v| v * factor).collect();

        let historical = summarize(
            &historical_values,
            request.operational_max,
            request.attention_max,
        );
        let future = summarize(
            &future_values,
            request.operational_max,
            request.attention_max,
        );

        let delta = ComparisonDelta {
            mean: future.mean - historical.mean,
            p95: future.p95 - historical.p95,
            stop_samples: future.stop_samples as i64 - historical.stop_samples as i64,
        };

        let historical_yearly = yearly_means(&historical_series.times, &historical_values);
        let future_yearly = yearly_means(&future_series.times, &future_values);
        let series = ComparisonSeries {
            historical_years: historical_yearly.years,
            historical_yearly_mean: historical_yearly.means,
            future_years: future_yearly.years,
            future_yearly_mean: future_yearly.means,
            monthly_labels: monthly_labels(),
            historical_monthly_mean: monthly_means(&historical_series.times, &historical_values)
                .to_vec(),
            future_monthly_mean: monthly_means(&future_series.times, &future_values).to_vec(),
        };

        Ok(ScenarioComparison {
            available: true,
            message: None,
            meta,
            historical,
            future,
            delta,
            series,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn load_series(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        scenario: Scenario,
        lat: f64,
        lon: f64,
        historical_period: PeriodRange,
        future_period: PeriodRange,
    ) -> HazardResult<(PointSeries, PointSeries)> {
        let historical =
            self.reader
                .historical_point_series(hazard, stat, lat, lon, historical_period)?;
        let future =
            self.reader
                .future_point_series(hazard, stat, scenario, lat, lon, future_period)?;
        Ok((historical, future))
    }
}

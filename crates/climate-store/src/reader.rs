//! High-level extraction over the archival datasets.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use hazard_common::{
    parse_instant, parse_year, BoundsQuery, HazardKind, HazardResult, PeriodRange, Scenario,
    Statistic,
};

use crate::catalog::{DatasetCatalog, DatasetKey};
use crate::select::{axis_slice, nearest_index, nearest_time_index, normalize_lon_bounds};
use crate::store::DatasetStore;

/// A 2-D field at one instant, with its axis values.
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    /// Row-major (lat, lon) values in axis storage order.
    pub values: Vec<Vec<f64>>,
    /// The actually selected time step (nearest to the request).
    pub time: DateTime<Utc>,
}

/// A time-ordered series at one grid point.
///
/// Timestamps are non-decreasing, also after multi-file stitching.
#[derive(Debug, Clone, Default)]
pub struct PointSeries {
    pub times: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
}

impl PointSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn from_pairs(mut pairs: Vec<(DateTime<Utc>, f64)>) -> Self {
        pairs.sort_by_key(|(time, _)| *time);
        Self {
            times: pairs.iter().map(|(time, _)| *time).collect(),
            values: pairs.into_iter().map(|(_, value)| value).collect(),
        }
    }
}

/// Facade combining the catalog, handle cache and selectors.
pub struct ClimateReader {
    catalog: DatasetCatalog,
    store: DatasetStore,
}

impl ClimateReader {
    pub fn new(catalog: DatasetCatalog) -> Self {
        Self {
            catalog,
            store: DatasetStore::new(),
        }
    }

    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Extract a 2-D snapshot nearest to `timestamp`, optionally cropped.
    pub fn grid_snapshot(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        timestamp: &str,
        bounds: &BoundsQuery,
    ) -> HazardResult<GridSnapshot> {
        let key = self.catalog.snapshot_key(hazard, stat, timestamp)?;
        let dataset = self.store.open(&self.catalog.path(key))?;
        let var_name = dataset.variable_named(key.variable_candidates())?;

        let target = resolve_instant(timestamp)?;
        let time_index = nearest_time_index(dataset.times(), target).ok_or_else(|| {
            hazard_common::HazardError::DataRead(format!(
                "{} has an empty time axis",
                dataset.path().display()
            ))
        })?;

        let lat_range = axis_slice(dataset.lats(), bounds.lat_min, bounds.lat_max);
        let (lon_min, lon_max) =
            normalize_lon_bounds(dataset.lons(), bounds.lon_min, bounds.lon_max);
        let lon_range = axis_slice(dataset.lons(), lon_min, lon_max);

        let values =
            dataset.read_time_slice(&var_name, time_index, lat_range.clone(), lon_range.clone())?;

        Ok(GridSnapshot {
            lats: dataset.lats()[lat_range].to_vec(),
            lons: dataset.lons()[lon_range].to_vec(),
            values,
            time: dataset.times()[time_index],
        })
    }

    /// Point series for the historical era, filtered to `period`.
    pub fn historical_point_series(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        lat: f64,
        lon: f64,
        period: PeriodRange,
    ) -> HazardResult<PointSeries> {
        let key = self.catalog.historical_key(hazard, stat);
        self.point_series_from_keys(&[key], lat, lon, period)
    }

    /// Point series for the projection era, filtered to `period`.
    ///
    /// Wave periods spanning both projection windows read and stitch
    /// both files.
    pub fn future_point_series(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        scenario: Scenario,
        lat: f64,
        lon: f64,
        period: PeriodRange,
    ) -> HazardResult<PointSeries> {
        let keys = self.catalog.future_keys(hazard, stat, scenario, period);
        self.point_series_from_keys(&keys, lat, lon, period)
    }

    /// Point series over an arbitrary period, stitched across eras.
    pub fn period_point_series(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        scenario: Scenario,
        lat: f64,
        lon: f64,
        period: PeriodRange,
    ) -> HazardResult<PointSeries> {
        let keys = self.catalog.period_keys(hazard, stat, scenario, period);
        self.point_series_from_keys(&keys, lat, lon, period)
    }

    /// Every sample inside a bounding box over a period, flattened.
    ///
    /// Feeds the regional statistics operation; values are in storage
    /// units, non-finite samples included (the summarizer drops them).
    pub fn region_samples(
        &self,
        hazard: HazardKind,
        stat: Statistic,
        scenario: Scenario,
        period: PeriodRange,
        bounds: &BoundsQuery,
    ) -> HazardResult<Vec<f64>> {
        let mut samples = Vec::new();
        for key in self.catalog.period_keys(hazard, stat, scenario, period) {
            let dataset = self.store.open(&self.catalog.path(key))?;
            let var_name = dataset.variable_named(key.variable_candidates())?;

            let lat_range = axis_slice(dataset.lats(), bounds.lat_min, bounds.lat_max);
            let (lon_min, lon_max) =
                normalize_lon_bounds(dataset.lons(), bounds.lon_min, bounds.lon_max);
            let lon_range = axis_slice(dataset.lons(), lon_min, lon_max);

            for (time_index, time) in dataset.times().iter().enumerate() {
                if !period.contains_year(time.year()) {
                    continue;
                }
                let slab = dataset.read_time_slice(
                    &var_name,
                    time_index,
                    lat_range.clone(),
                    lon_range.clone(),
                )?;
                samples.extend(slab.into_iter().flatten());
            }
        }
        Ok(samples)
    }

    fn point_series_from_keys(
        &self,
        keys: &[DatasetKey],
        lat: f64,
        lon: f64,
        period: PeriodRange,
    ) -> HazardResult<PointSeries> {
        let mut pairs = Vec::new();
        for &key in keys {
            let dataset = self.store.open(&self.catalog.path(key))?;
            let var_name = dataset.variable_named(key.variable_candidates())?;

            let (Some(lat_index), Some(lon_index)) = (
                nearest_index(dataset.lats(), lat),
                nearest_index(dataset.lons(), wrap_lon_to_domain(dataset.lons(), lon)),
            ) else {
                continue;
            };

            let values = dataset.read_cell_series(&var_name, lat_index, lon_index)?;
            for (time, value) in dataset.times().iter().zip(values) {
                if period.contains_year(time.year()) {
                    pairs.push((*time, value));
                }
            }
        }
        Ok(PointSeries::from_pairs(pairs))
    }
}

/// Map a requested longitude into the dataset's own domain convention.
fn wrap_lon_to_domain(axis: &[f64], lon: f64) -> f64 {
    if lon < 0.0 && axis.iter().all(|&v| v >= 0.0) {
        lon.rem_euclid(360.0)
    } else {
        lon
    }
}

/// Resolve a request timestamp to an instant for nearest-time lookup.
///
/// Falls back to January 1st of the routed year for the non-ISO forms
/// the year parser tolerates.
fn resolve_instant(timestamp: &str) -> HazardResult<DateTime<Utc>> {
    if let Some(instant) = parse_instant(timestamp) {
        return Ok(instant);
    }
    let year = parse_year(timestamp)?;
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| hazard_common::HazardError::InvalidTimestamp(timestamp.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_lon_to_domain() {
        let wrapped = [0.0, 90.0, 180.0, 270.0];
        assert_eq!(wrap_lon_to_domain(&wrapped, -40.0), 320.0);
        assert_eq!(wrap_lon_to_domain(&wrapped, 40.0), 40.0);

        let signed = [-180.0, 0.0, 90.0];
        assert_eq!(wrap_lon_to_domain(&signed, -40.0), -40.0);
    }

    #[test]
    fn test_resolve_instant_fallback() {
        let instant = resolve_instant("2035-07").unwrap();
        assert_eq!(instant.year(), 2035);
        assert_eq!(instant.month(), 1);
        assert!(resolve_instant("garbage").is_err());
    }

    #[test]
    fn test_point_series_from_pairs_sorts() {
        let t = |month| Utc.with_ymd_and_hms(2020, month, 1, 0, 0, 0).unwrap();
        let series = PointSeries::from_pairs(vec![(t(3), 3.0), (t(1), 1.0), (t(2), 2.0)]);
        assert_eq!(series.values, vec![1.0, 2.0, 3.0]);
        assert!(series.times.windows(2).all(|w| w[0] <= w[1]));
    }
}

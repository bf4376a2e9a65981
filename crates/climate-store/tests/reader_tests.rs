//! Integration tests reading real NetCDF fixtures through the full
//! catalog → handle cache → selector pipeline.

use std::sync::Arc;

use chrono::Datelike;
use climate_store::{ClimateReader, DatasetCatalog, DatasetKey};
use hazard_common::{BoundsQuery, HazardKind, PeriodRange, Scenario, Statistic};
use test_utils::fixtures::value_cube;
use test_utils::{monthly_time_axis, write_series_file, SeriesFileSpec};

const LATS: [f64; 3] = [-30.0, -25.0, -20.0];
const LONS: [f64; 3] = [310.0, 315.0, 320.0];

/// Write a wind archive covering both eras under `base`.
fn write_wind_archive(base: &std::path::Path) {
    let (units, hist_offsets) = monthly_time_axis(2010, 2014);
    let hist_values = value_cube(hist_offsets.len(), LATS.len(), LONS.len(), |t, y, x| {
        5.0 + (t % 12) as f64 * 0.1 + y as f64 + x as f64 * 0.01
    });
    let spec = SeriesFileSpec::conventional(
        "sfcWind",
        &units,
        &hist_offsets,
        &LATS,
        &LONS,
        &hist_values,
    );
    write_series_file(
        &base.join(DatasetKey::WindHistorical(Statistic::Mean).relative_path()),
        &spec,
    )
    .unwrap();

    let (units, fut_offsets) = monthly_time_axis(2015, 2020);
    let fut_values = value_cube(fut_offsets.len(), LATS.len(), LONS.len(), |t, y, x| {
        7.0 + (t % 12) as f64 * 0.1 + y as f64 + x as f64 * 0.01
    });
    let spec = SeriesFileSpec::conventional(
        "sfcWind",
        &units,
        &fut_offsets,
        &LATS,
        &LONS,
        &fut_values,
    );
    write_series_file(
        &base.join(DatasetKey::WindFuture(Statistic::Mean).relative_path()),
        &spec,
    )
    .unwrap();
}

#[test]
fn grid_snapshot_selects_nearest_time_and_crops() {
    let dir = tempfile::tempdir().unwrap();
    write_wind_archive(dir.path());
    let reader = ClimateReader::new(DatasetCatalog::new(dir.path()));

    let snap = reader
        .grid_snapshot(
            HazardKind::Wind,
            Statistic::Mean,
            "2012-06-20T00:00:00Z",
            &BoundsQuery::new(Some(-26.0), Some(-19.0), None, None),
        )
        .unwrap();

    // Nearest monthly step is June 15th 2012.
    assert_eq!(snap.time.year(), 2012);
    assert_eq!(snap.time.month(), 6);
    assert_eq!(snap.time.day(), 15);

    // Latitude cropped to the two northern rows; longitude untouched.
    assert_eq!(snap.lats, vec![-25.0, -20.0]);
    assert_eq!(snap.lons.len(), 3);
    assert_eq!(snap.values.len(), 2);
    assert_eq!(snap.values[0].len(), 3);
}

#[test]
fn grid_snapshot_routes_to_future_after_cutoff() {
    let dir = tempfile::tempdir().unwrap();
    write_wind_archive(dir.path());
    let reader = ClimateReader::new(DatasetCatalog::new(dir.path()));

    let snap = reader
        .grid_snapshot(
            HazardKind::Wind,
            Statistic::Mean,
            "2015-01-01T00:00:00Z",
            &BoundsQuery::default(),
        )
        .unwrap();
    assert_eq!(snap.time.year(), 2015);
    // Future fixture baseline is 7.0 at the first cell.
    assert!(snap.values[0][0] >= 7.0);
}

#[test]
fn lon_wrap_crops_wrapped_domain_with_signed_bounds() {
    let dir = tempfile::tempdir().unwrap();
    write_wind_archive(dir.path());
    let reader = ClimateReader::new(DatasetCatalog::new(dir.path()));

    // The fixture axis lives in [0, 360); ask with [-180, 180) bounds.
    let snap = reader
        .grid_snapshot(
            HazardKind::Wind,
            Statistic::Mean,
            "2012-06-15T00:00:00Z",
            &BoundsQuery::new(None, None, Some(-50.0), Some(-44.0)),
        )
        .unwrap();
    // -50..-44 normalizes to 310..316, keeping the two western columns.
    assert_eq!(snap.lons, vec![310.0, 315.0]);
}

#[test]
fn missing_file_is_dataset_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let reader = ClimateReader::new(DatasetCatalog::new(dir.path()));

    let err = reader
        .grid_snapshot(
            HazardKind::Wave,
            Statistic::Mean,
            "1995-01-01",
            &BoundsQuery::default(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        hazard_common::HazardError::DatasetNotFound { .. }
    ));
    assert_eq!(err.http_status_code(), 404);
}

#[test]
fn handle_cache_returns_the_same_handle() {
    let dir = tempfile::tempdir().unwrap();
    write_wind_archive(dir.path());
    let catalog = DatasetCatalog::new(dir.path());
    let reader = ClimateReader::new(catalog.clone());

    let path = catalog.path(DatasetKey::WindHistorical(Statistic::Mean));
    let first = reader.store().open(&path).unwrap();
    let second = reader.store().open(&path).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(reader.store().len(), 1);
}

#[test]
fn period_series_stitches_across_the_era_boundary() {
    let dir = tempfile::tempdir().unwrap();
    write_wind_archive(dir.path());
    let reader = ClimateReader::new(DatasetCatalog::new(dir.path()));

    let series = reader
        .period_point_series(
            HazardKind::Wind,
            Statistic::Mean,
            Scenario::Ssp585,
            -24.0,
            -44.0, // wraps to 316, nearest column 315
            PeriodRange::new(2013, 2016),
        )
        .unwrap();

    // 4 years of monthly samples from two files.
    assert_eq!(series.len(), 48);
    assert!(series.times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(series.times.first().unwrap().year(), 2013);
    assert_eq!(series.times.last().unwrap().year(), 2016);
}

#[test]
fn alternate_axis_and_variable_names_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let (units, offsets) = monthly_time_axis(1990, 1990);
    let values = value_cube(offsets.len(), 2, 2, |_, _, _| 2.5);
    let spec = SeriesFileSpec {
        var_name: "swh",
        time_name: "t",
        lat_name: "latitude",
        lon_name: "longitude",
        time_units: &units,
        time_offsets: &offsets,
        lats: &[-25.0, -20.0],
        lons: &[315.0, 320.0],
        values: &values,
    };
    write_series_file(
        &dir.path()
            .join(DatasetKey::WaveHistorical(Statistic::Mean).relative_path()),
        &spec,
    )
    .unwrap();

    let reader = ClimateReader::new(DatasetCatalog::new(dir.path()));
    // "swh" is not the preferred "hs" spelling, but it is the only data
    // variable, so resolution falls back to it.
    let snap = reader
        .grid_snapshot(
            HazardKind::Wave,
            Statistic::Mean,
            "1990-03-01",
            &BoundsQuery::default(),
        )
        .unwrap();
    assert_eq!(snap.values[0][0], 2.5);
}

#[test]
fn region_samples_cover_period_and_bbox() {
    let dir = tempfile::tempdir().unwrap();
    write_wind_archive(dir.path());
    let reader = ClimateReader::new(DatasetCatalog::new(dir.path()));

    let samples = reader
        .region_samples(
            HazardKind::Wind,
            Statistic::Mean,
            Scenario::Ssp585,
            PeriodRange::new(2014, 2014),
            &BoundsQuery::new(Some(-26.0), Some(-19.0), Some(314.0), Some(321.0)),
        )
        .unwrap();

    // 12 months x 2 rows x 2 columns.
    assert_eq!(samples.len(), 48);
    assert!(samples.iter().all(|v| v.is_finite()));
}

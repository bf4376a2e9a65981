//! End-to-end scenario comparisons over real NetCDF fixtures.

use std::sync::Arc;

use climate_store::{ClimateReader, DatasetCatalog, DatasetKey, WaveWindow};
use hazard_analytics::{ComparisonRequest, ScenarioService};
use hazard_common::{HazardError, HazardKind, Statistic, KNOTS_PER_METER_PER_SECOND};
use test_utils::fixtures::value_cube;
use test_utils::{monthly_time_axis, write_series_file, write_series_file_with, SeriesFileSpec};

const LATS: [f64; 2] = [-24.0, -20.0];
const LONS: [f64; 2] = [315.0, 320.0];

fn write_constant_file(
    base: &std::path::Path,
    key: DatasetKey,
    var_name: &str,
    start_year: i32,
    end_year: i32,
    value: f64,
) {
    let (units, offsets) = monthly_time_axis(start_year, end_year);
    let values = value_cube(offsets.len(), LATS.len(), LONS.len(), |_, _, _| value);
    let spec =
        SeriesFileSpec::conventional(var_name, &units, &offsets, &LATS, &LONS, &values);
    write_series_file(&base.join(key.relative_path()), &spec).unwrap();
}

fn service(base: &std::path::Path) -> ScenarioService {
    ScenarioService::new(Arc::new(ClimateReader::new(DatasetCatalog::new(base))))
}

fn wind_request() -> ComparisonRequest {
    ComparisonRequest {
        lat: -22.0,
        lon: -41.0,
        scenario: "ssp585".into(),
        stat: "mean".into(),
        historical_period: "2000-2002".into(),
        future_period: "2035-2037".into(),
        operational_max: 15.0,
        attention_max: 20.0,
    }
}

#[test]
fn wind_comparison_converts_and_buckets() {
    let dir = tempfile::tempdir().unwrap();
    // Historical 6 m/s (~11.7 kn, operational); future 10 m/s (~19.4 kn,
    // attention).
    write_constant_file(
        dir.path(),
        DatasetKey::WindHistorical(Statistic::Mean),
        "sfcWind",
        2000,
        2002,
        6.0,
    );
    write_constant_file(
        dir.path(),
        DatasetKey::WindFuture(Statistic::Mean),
        "sfcWind",
        2035,
        2037,
        10.0,
    );

    let payload = service(dir.path())
        .compare(HazardKind::Wind, &wind_request())
        .unwrap();

    assert!(payload.available);
    assert_eq!(payload.meta.units, "kn");
    assert_eq!(payload.historical.samples, 36);
    assert_eq!(payload.future.samples, 36);

    let hist_knots = 6.0 * KNOTS_PER_METER_PER_SECOND;
    let fut_knots = 10.0 * KNOTS_PER_METER_PER_SECOND;
    assert!((payload.historical.mean - hist_knots).abs() < 1e-9);
    assert!((payload.future.mean - fut_knots).abs() < 1e-9);

    assert_eq!(payload.historical.operational_samples, 36);
    assert_eq!(payload.future.attention_samples, 36);
    assert!((payload.delta.mean - (fut_knots - hist_knots)).abs() < 1e-9);
    assert_eq!(payload.delta.stop_samples, 0);

    // Three years per period, twelve fully populated months.
    assert_eq!(payload.series.historical_years, vec![2000, 2001, 2002]);
    assert_eq!(payload.series.future_years, vec![2035, 2036, 2037]);
    assert_eq!(payload.series.monthly_labels.len(), 12);
    assert!(payload
        .series
        .future_monthly_mean
        .iter()
        .all(|m| m.map(|v| (v - fut_knots).abs() < 1e-9).unwrap_or(false)));
}

#[test]
fn wave_comparison_stitches_projection_windows() {
    let dir = tempfile::tempdir().unwrap();
    write_constant_file(
        dir.path(),
        DatasetKey::WaveHistorical(Statistic::Mean),
        "hs",
        2000,
        2001,
        1.5,
    );
    write_constant_file(
        dir.path(),
        DatasetKey::WaveFuture(Statistic::Mean, WaveWindow::Early),
        "hs",
        2015,
        2030,
        2.5,
    );
    write_constant_file(
        dir.path(),
        DatasetKey::WaveFuture(Statistic::Mean, WaveWindow::Late),
        "hs",
        2031,
        2060,
        3.5,
    );

    let request = ComparisonRequest {
        lat: -22.0,
        lon: -41.0,
        scenario: "ssp585".into(),
        stat: "mean".into(),
        historical_period: "2000-2001".into(),
        future_period: "2029-2032".into(),
        operational_max: 2.0,
        attention_max: 4.0,
    };
    let payload = service(dir.path())
        .compare(HazardKind::Wave, &request)
        .unwrap();

    assert!(payload.available);
    assert_eq!(payload.meta.units, "m");
    // Two years from the early window plus two from the late window.
    assert_eq!(payload.future.samples, 48);
    // Wave values are already meters; no unit conversion applied.
    assert!((payload.historical.mean - 1.5).abs() < 1e-12);
    assert_eq!(
        payload.series.future_years,
        vec![2029, 2030, 2031, 2032]
    );
    assert!((payload.series.future_yearly_mean[0] - 2.5).abs() < 1e-12);
    assert!((payload.series.future_yearly_mean[3] - 3.5).abs() < 1e-12);
    // All future samples are in [operational, attention).
    assert_eq!(payload.future.attention_samples, 48);
}

#[test]
fn missing_future_file_degrades_to_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    write_constant_file(
        dir.path(),
        DatasetKey::WindHistorical(Statistic::Mean),
        "sfcWind",
        2000,
        2002,
        6.0,
    );
    // No future file on disk.

    let payload = service(dir.path())
        .compare(HazardKind::Wind, &wind_request())
        .unwrap();

    assert!(!payload.available);
    let message = payload.message.unwrap();
    assert!(message.contains("sfcWind_ssp585_processado.nc"));
    assert_eq!(payload.historical.samples, 0);
    assert_eq!(payload.future.samples, 0);
    assert!(payload.series.historical_years.is_empty());
    assert_eq!(payload.series.historical_monthly_mean.len(), 12);
}

#[test]
fn validation_errors_propagate() {
    let dir = tempfile::tempdir().unwrap();
    let service = service(dir.path());

    let mut request = wind_request();
    request.historical_period = "2014-1985".into();
    assert!(matches!(
        service.compare(HazardKind::Wind, &request).unwrap_err(),
        HazardError::InvalidPeriod(_)
    ));

    let mut request = wind_request();
    request.stat = "median".into();
    assert!(matches!(
        service.compare(HazardKind::Wind, &request).unwrap_err(),
        HazardError::InvalidStatistic(_)
    ));

    let mut request = wind_request();
    request.scenario = "rcp26".into();
    assert!(matches!(
        service.compare(HazardKind::Wind, &request).unwrap_err(),
        HazardError::UnsupportedScenario(_)
    ));
}

#[test]
fn bias_corrected_wind_variable_is_preferred() {
    let dir = tempfile::tempdir().unwrap();
    let (units, offsets) = monthly_time_axis(2000, 2000);

    // File carrying both the raw and the corrected field; the corrected
    // one must win.
    let raw = value_cube(offsets.len(), LATS.len(), LONS.len(), |_, _, _| 4.0);
    let corrected = value_cube(offsets.len(), LATS.len(), LONS.len(), |_, _, _| 5.0);
    let spec = SeriesFileSpec::conventional("sfcWind", &units, &offsets, &LATS, &LONS, &raw);
    write_series_file_with(
        &dir.path()
            .join(DatasetKey::WindHistorical(Statistic::Mean).relative_path()),
        &spec,
        &[("sfcWind_corr", &corrected)],
    )
    .unwrap();

    write_constant_file(
        dir.path(),
        DatasetKey::WindFuture(Statistic::Mean),
        "sfcWind",
        2035,
        2037,
        5.0,
    );

    let mut request = wind_request();
    request.historical_period = "2000-2000".into();
    let payload = service(dir.path())
        .compare(HazardKind::Wind, &request)
        .unwrap();

    let expected = 5.0 * KNOTS_PER_METER_PER_SECOND;
    assert!((payload.historical.mean - expected).abs() < 1e-9);
}

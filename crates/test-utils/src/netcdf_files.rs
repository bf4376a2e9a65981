//! Builders for small on-disk NetCDF fixtures.

use chrono::NaiveDate;
use std::path::Path;

/// Specification for a (time, lat, lon) series file.
///
/// Axis names are configurable so tests can cover the heterogeneous
/// spellings found in real archives ("lat" vs "latitude" vs "y").
#[derive(Debug, Clone)]
pub struct SeriesFileSpec<'a> {
    /// Data variable name (e.g. "sfcWind", "hs").
    pub var_name: &'a str,
    pub time_name: &'a str,
    pub lat_name: &'a str,
    pub lon_name: &'a str,
    /// CF units string for the time axis (e.g. "days since 1950-01-01 00:00:00").
    pub time_units: &'a str,
    /// Offsets along the time axis, in the unit named by `time_units`.
    pub time_offsets: &'a [f64],
    pub lats: &'a [f64],
    pub lons: &'a [f64],
    /// Row-major (time, lat, lon) values; length must be
    /// `time_offsets.len() * lats.len() * lons.len()`.
    pub values: &'a [f64],
}

impl<'a> SeriesFileSpec<'a> {
    /// A spec with conventional axis names ("time"/"lat"/"lon").
    pub fn conventional(
        var_name: &'a str,
        time_units: &'a str,
        time_offsets: &'a [f64],
        lats: &'a [f64],
        lons: &'a [f64],
        values: &'a [f64],
    ) -> Self {
        Self {
            var_name,
            time_name: "time",
            lat_name: "lat",
            lon_name: "lon",
            time_units,
            time_offsets,
            lats,
            lons,
            values,
        }
    }
}

/// Write a (time, lat, lon) series dataset to `path`.
pub fn write_series_file(path: &Path, spec: &SeriesFileSpec<'_>) -> Result<(), netcdf::Error> {
    write_series_file_with(path, spec, &[])
}

/// Write a series dataset carrying additional data variables on the
/// same (time, lat, lon) grid (e.g. a raw field next to a corrected
/// one, or u/v current components).
pub fn write_series_file_with(
    path: &Path,
    spec: &SeriesFileSpec<'_>,
    extra_vars: &[(&str, &[f64])],
) -> Result<(), netcdf::Error> {
    let cube_len = spec.time_offsets.len() * spec.lats.len() * spec.lons.len();
    assert_eq!(
        spec.values.len(),
        cube_len,
        "values length must match time*lat*lon"
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("fixture directory");
    }

    let mut file = netcdf::create(path)?;

    file.add_dimension(spec.time_name, spec.time_offsets.len())?;
    file.add_dimension(spec.lat_name, spec.lats.len())?;
    file.add_dimension(spec.lon_name, spec.lons.len())?;

    let mut time_var = file.add_variable::<f64>(spec.time_name, &[spec.time_name])?;
    time_var.put_attribute("units", spec.time_units)?;
    time_var.put_attribute("calendar", "standard")?;
    time_var.put_values(spec.time_offsets, ..)?;

    let mut lat_var = file.add_variable::<f64>(spec.lat_name, &[spec.lat_name])?;
    lat_var.put_attribute("units", "degrees_north")?;
    lat_var.put_values(spec.lats, ..)?;

    let mut lon_var = file.add_variable::<f64>(spec.lon_name, &[spec.lon_name])?;
    lon_var.put_attribute("units", "degrees_east")?;
    lon_var.put_values(spec.lons, ..)?;

    let grid_dims = [spec.time_name, spec.lat_name, spec.lon_name];
    let mut data_var = file.add_variable::<f64>(spec.var_name, &grid_dims)?;
    data_var.put_values(spec.values, ..)?;

    for (name, values) in extra_vars {
        assert_eq!(values.len(), cube_len, "extra variable length must match");
        let mut var = file.add_variable::<f64>(name, &grid_dims)?;
        var.put_values(values, ..)?;
    }

    Ok(())
}

/// Build a monthly time axis covering `[start_year, end_year]` inclusive.
///
/// Returns the CF units string and one offset per month, anchored at the
/// 15th of each month (mirroring how the archival files are laid out).
pub fn monthly_time_axis(start_year: i32, end_year: i32) -> (String, Vec<f64>) {
    let epoch = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
    let mut offsets = Vec::new();
    for year in start_year..=end_year {
        for month in 1..=12 {
            let date = NaiveDate::from_ymd_opt(year, month, 15).unwrap();
            offsets.push((date - epoch).num_days() as f64);
        }
    }
    ("days since 1950-01-01 00:00:00".to_string(), offsets)
}

//! Open dataset handles.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use hazard_common::{
    axis::{LAT_CANDIDATES, LON_CANDIDATES, TIME_CANDIDATES},
    resolve_axis, HazardError, HazardResult,
};

use crate::timecode::decode_time_axis;

/// An opened handle to one gridded archive file.
///
/// Axis names are resolved and coordinate arrays decoded once at open;
/// the handle is immutable afterwards and shared for the process
/// lifetime by the [`crate::DatasetStore`]. Data variables are read on
/// demand so a multi-decade file costs only its coordinates up front.
pub struct GridDataset {
    path: PathBuf,
    file: netcdf::File,
    lat_name: String,
    lon_name: String,
    time_name: String,
    lats: Vec<f64>,
    lons: Vec<f64>,
    times: Vec<DateTime<Utc>>,
    data_vars: Vec<String>,
}

impl GridDataset {
    /// Open a file and resolve its axes.
    ///
    /// The caller (the handle cache) is responsible for existence checks
    /// and memoization; this constructor assumes the path exists.
    pub fn open(path: &Path) -> HazardResult<Self> {
        let file = netcdf::open(path)
            .map_err(|e| HazardError::DataRead(format!("{}: {e}", path.display())))?;

        // Coordinate variables are the 1-D variables named after their
        // own dimension; everything else is a data variable.
        let mut coord_names = Vec::new();
        let mut data_vars = Vec::new();
        for var in file.variables() {
            let dims = var.dimensions();
            if dims.len() == 1 && dims[0].name() == var.name() {
                coord_names.push(var.name().to_string());
            } else {
                data_vars.push(var.name().to_string());
            }
        }

        let lat_name = resolve_axis(&coord_names, LAT_CANDIDATES)?;
        let lon_name = resolve_axis(&coord_names, LON_CANDIDATES)?;
        let time_name = resolve_axis(&coord_names, TIME_CANDIDATES)?;

        let lats = read_axis_values(&file, &lat_name, path)?;
        let lons = read_axis_values(&file, &lon_name, path)?;

        let time_var = file
            .variable(&time_name)
            .ok_or_else(|| HazardError::DataRead(format!("missing time variable {time_name}")))?;
        let units = string_attr(&time_var, "units").ok_or_else(|| {
            HazardError::DataRead(format!(
                "time axis '{time_name}' in {} has no units attribute",
                path.display()
            ))
        })?;
        let offsets: Vec<f64> = time_var
            .get_values(..)
            .map_err(|e| HazardError::DataRead(format!("{}: {e}", path.display())))?;
        let times = decode_time_axis(&units, &offsets)?;

        tracing::debug!(
            path = %path.display(),
            lat = %lat_name,
            lon = %lon_name,
            time = %time_name,
            steps = times.len(),
            "opened dataset"
        );

        Ok(Self {
            path: path.to_path_buf(),
            file,
            lat_name,
            lon_name,
            time_name,
            lats,
            lons,
            times,
            data_vars,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lat_name(&self) -> &str {
        &self.lat_name
    }

    pub fn lon_name(&self) -> &str {
        &self.lon_name
    }

    pub fn time_name(&self) -> &str {
        &self.time_name
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn data_vars(&self) -> &[String] {
        &self.data_vars
    }

    /// Resolve the data variable to read: the first preferred spelling
    /// present, else the first data variable in the file.
    pub fn variable_named(&self, preferred: &[&str]) -> HazardResult<String> {
        for candidate in preferred {
            if self.data_vars.iter().any(|name| name == candidate) {
                return Ok((*candidate).to_string());
            }
        }
        self.data_vars.first().cloned().ok_or_else(|| {
            HazardError::DataRead(format!("{} has no data variables", self.path.display()))
        })
    }

    /// Read the full time series at one grid cell.
    pub fn read_cell_series(
        &self,
        var_name: &str,
        lat_index: usize,
        lon_index: usize,
    ) -> HazardResult<Vec<f64>> {
        let var = self.data_variable(var_name)?;
        self.check_dim_order(&var)?;
        var.get_values((.., lat_index, lon_index))
            .map_err(|e| self.read_error(var_name, e))
    }

    /// Read one time step over a lat/lon index window.
    ///
    /// Returns rows in latitude order, columns in longitude order, both
    /// following the axis storage order.
    pub fn read_time_slice(
        &self,
        var_name: &str,
        time_index: usize,
        lat_range: std::ops::Range<usize>,
        lon_range: std::ops::Range<usize>,
    ) -> HazardResult<Vec<Vec<f64>>> {
        let var = self.data_variable(var_name)?;
        self.check_dim_order(&var)?;

        let n_lon = lon_range.len();
        let flat: Vec<f64> = var
            .get_values((time_index, lat_range.clone(), lon_range))
            .map_err(|e| self.read_error(var_name, e))?;

        if n_lon == 0 {
            return Ok(vec![Vec::new(); lat_range.len()]);
        }
        Ok(flat.chunks(n_lon).map(|row| row.to_vec()).collect())
    }

    fn data_variable(&self, var_name: &str) -> HazardResult<netcdf::Variable<'_>> {
        self.file.variable(var_name).ok_or_else(|| {
            HazardError::DataRead(format!(
                "variable '{var_name}' not found in {}",
                self.path.display()
            ))
        })
    }

    /// Reads assume the archive's (time, lat, lon) storage order.
    fn check_dim_order(&self, var: &netcdf::Variable<'_>) -> HazardResult<()> {
        let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
        let expected = [
            self.time_name.as_str(),
            self.lat_name.as_str(),
            self.lon_name.as_str(),
        ];
        if dims.len() != 3 || dims.iter().zip(expected).any(|(d, e)| d.as_str() != e) {
            return Err(HazardError::DataRead(format!(
                "variable '{}' in {} has dimension order {:?}, expected {:?}",
                var.name(),
                self.path.display(),
                dims,
                expected
            )));
        }
        Ok(())
    }

    fn read_error(&self, var_name: &str, err: netcdf::Error) -> HazardError {
        HazardError::DataRead(format!(
            "reading '{var_name}' from {}: {err}",
            self.path.display()
        ))
    }
}

fn read_axis_values(file: &netcdf::File, name: &str, path: &Path) -> HazardResult<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| HazardError::DataRead(format!("missing axis variable {name}")))?;
    var.get_values(..)
        .map_err(|e| HazardError::DataRead(format!("{}: {e}", path.display())))
}

fn string_attr(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

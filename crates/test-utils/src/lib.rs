//! Shared test utilities for the ocean-hazards workspace.
//!
//! Provides builders that write small, real NetCDF files so data-access
//! tests exercise the same code paths as production reads.

pub mod fixtures;
pub mod netcdf_files;

pub use netcdf_files::{
    monthly_time_axis, write_series_file, write_series_file_with, SeriesFileSpec,
};

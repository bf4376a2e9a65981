//! Archival climate dataset access.
//!
//! This crate owns every read against the on-disk NetCDF archive:
//!
//! - **Catalog/Router**: the fixed enumeration of physical files per
//!   hazard, era, statistic and projection window, and the policy that
//!   maps a query's timestamp or period onto them.
//! - **Handle cache**: datasets are expensive to open, so each resolved
//!   path is opened at most once per process and shared behind `Arc`.
//! - **Selection**: nearest-time lookup and ascending/descending-aware
//!   bounding-box slicing, including longitude-domain normalization.
//! - **Extraction**: grid snapshots at an instant and point series over
//!   a period, stitching multi-file series in time order.
//!
//! # Example
//!
//! ```ignore
//! use climate_store::{ClimateReader, DatasetCatalog};
//! use hazard_common::{BoundsQuery, HazardKind, Statistic};
//!
//! let reader = ClimateReader::new(DatasetCatalog::from_env());
//! let snap = reader.grid_snapshot(
//!     HazardKind::Wind,
//!     Statistic::Mean,
//!     "1995-06-15T00:00:00Z",
//!     &BoundsQuery::default(),
//! )?;
//! ```

pub mod catalog;
pub mod dataset;
pub mod reader;
pub mod select;
pub mod store;
pub mod timecode;

pub use catalog::{DatasetCatalog, DatasetKey, WaveWindow, FUTURE_CUTOFF_YEAR};
pub use dataset::GridDataset;
pub use reader::{ClimateReader, GridSnapshot, PointSeries};
pub use store::DatasetStore;

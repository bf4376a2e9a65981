//! Shared types for the ocean-hazards services.
//!
//! This crate holds everything the data-access, analytics and transport
//! layers agree on: the error taxonomy, hazard/statistic/scenario
//! identifiers, period and timestamp parsing, bounding boxes, coordinate
//! name resolution and the JSON sanitizer for non-finite grids.

pub mod axis;
pub mod bbox;
pub mod error;
pub mod hazard;
pub mod period;
pub mod sanitize;

pub use axis::resolve_axis;
pub use bbox::BoundsQuery;
pub use error::{HazardError, HazardResult};
pub use hazard::{HazardKind, Scenario, Statistic, KNOTS_PER_METER_PER_SECOND};
pub use period::{parse_instant, parse_year, PeriodRange};
pub use sanitize::{sanitize_grid, sanitize_scalar, sanitize_series};

//! Scenario analytics over climate hazard series.
//!
//! Reduces point series extracted by `climate-store` into summary
//! statistics with threshold buckets, yearly/monthly mean series, and
//! full historical-vs-future scenario comparisons.

pub mod aggregate;
pub mod payload;
pub mod scenario;
pub mod summary;

pub use aggregate::{monthly_labels, monthly_means, yearly_means, YearlySeries};
pub use payload::{ComparisonDelta, ComparisonMeta, ComparisonSeries, ScenarioComparison};
pub use scenario::{ComparisonRequest, ScenarioService};
pub use summary::{percentile, summarize, SummaryStatistics};

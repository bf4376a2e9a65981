//! Error types for ocean-hazards services.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using HazardError.
pub type HazardResult<T> = Result<T, HazardError>;

/// Primary error type for climate hazard operations.
#[derive(Debug, Error)]
pub enum HazardError {
    // === Input validation ===
    #[error("unsupported scenario: {0}. Use 'ssp585'")]
    UnsupportedScenario(String),

    #[error("invalid period '{0}'. Use the 'YYYY-YYYY' format with start <= end")]
    InvalidPeriod(String),

    #[error("invalid statistic '{0}'. Use 'mean' or 'max'")]
    InvalidStatistic(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    // === Dataset errors ===
    #[error("dataset file not found: {path}. Set NETCDF_BASE_DIR to the root directory of the archival files")]
    DatasetNotFound { path: PathBuf },

    #[error("no coordinate found among candidates: {candidates:?}")]
    AxisNotFound { candidates: Vec<String> },

    #[error("failed to read dataset: {0}")]
    DataRead(String),

    // === Remote feed errors ===
    #[error("remote current feed is not configured: {0}")]
    RemoteAuth(String),

    #[error("remote current feed timed out: {0}")]
    RemoteTimeout(String),
}

impl HazardError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            HazardError::UnsupportedScenario(_)
            | HazardError::InvalidPeriod(_)
            | HazardError::InvalidStatistic(_)
            | HazardError::InvalidTimestamp(_) => 400,

            HazardError::DatasetNotFound { .. } => 404,

            HazardError::AxisNotFound { .. } | HazardError::DataRead(_) => 500,

            HazardError::RemoteAuth(_) => 503,
            HazardError::RemoteTimeout(_) => 504,
        }
    }

    /// Whether this failure is transient and a later request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, HazardError::RemoteTimeout(_))
    }
}

impl From<std::io::Error> for HazardError {
    fn from(err: std::io::Error) -> Self {
        HazardError::DataRead(err.to_string())
    }
}

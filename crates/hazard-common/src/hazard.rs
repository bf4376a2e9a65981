//! Hazard, statistic and scenario identifiers.

use serde::{Deserialize, Serialize};

use crate::error::{HazardError, HazardResult};

/// Conversion factor from meters per second to knots.
pub const KNOTS_PER_METER_PER_SECOND: f64 = 1.9438444924406;

/// The hazard variable a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    /// Surface wind speed, reported in knots.
    Wind,
    /// Significant wave height, reported in meters.
    Wave,
}

impl HazardKind {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> HazardResult<Self> {
        match s.to_lowercase().as_str() {
            "wind" => Ok(Self::Wind),
            "wave" => Ok(Self::Wave),
            other => Err(HazardError::DataRead(format!(
                "unknown hazard variable: {other}"
            ))),
        }
    }

    /// The reporting unit symbol for this hazard.
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Wind => "kn",
            Self::Wave => "m",
        }
    }

    /// Factor applied to stored values to reach the reporting unit.
    ///
    /// Wind fields are stored in m/s and reported in knots; wave fields
    /// are stored and reported in meters.
    pub fn unit_factor(&self) -> f64 {
        match self {
            Self::Wind => KNOTS_PER_METER_PER_SECOND,
            Self::Wave => 1.0,
        }
    }
}

impl std::fmt::Display for HazardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wind => write!(f, "wind"),
            Self::Wave => write!(f, "wave"),
        }
    }
}

/// Whether a field holds per-step mean or per-step maximum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Mean,
    Max,
}

impl Statistic {
    /// Parse from string; anything other than "mean"/"max" is rejected.
    pub fn parse(s: &str) -> HazardResult<Self> {
        match s {
            "mean" => Ok(Self::Mean),
            "max" => Ok(Self::Max),
            other => Err(HazardError::InvalidStatistic(other.to_string())),
        }
    }
}

impl std::fmt::Display for Statistic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mean => write!(f, "mean"),
            Self::Max => write!(f, "max"),
        }
    }
}

/// A named future-emissions pathway. Currently exactly one is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Ssp585,
}

impl Scenario {
    /// Parse a scenario identifier.
    ///
    /// Empty input defaults to ssp585; comparison is case-insensitive.
    /// Any other identifier is rejected before any file access happens.
    pub fn parse(s: &str) -> HazardResult<Self> {
        let normalized = s.trim().to_lowercase();
        if normalized.is_empty() || normalized == "ssp585" {
            Ok(Self::Ssp585)
        } else {
            Err(HazardError::UnsupportedScenario(s.to_string()))
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ssp585 => write!(f, "ssp585"),
        }
    }
}

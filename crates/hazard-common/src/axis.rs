//! Coordinate axis name resolution.
//!
//! Archival files and the remote feed disagree on axis spelling: latitude
//! may be stored as "lat", "latitude" or "y", and likewise for longitude
//! and time. Resolution picks the first candidate actually present.

use crate::error::{HazardError, HazardResult};

/// Candidate spellings for the latitude axis, in preference order.
pub const LAT_CANDIDATES: &[&str] = &["lat", "latitude", "y"];

/// Candidate spellings for the longitude axis, in preference order.
pub const LON_CANDIDATES: &[&str] = &["lon", "longitude", "x"];

/// Candidate spellings for the time axis, in preference order.
pub const TIME_CANDIDATES: &[&str] = &["time", "t"];

/// Return the first candidate present among a dataset's axis names.
///
/// A dataset missing a required axis cannot be queried at all, so a miss
/// is a hard `AxisNotFound` error, never retried.
pub fn resolve_axis<S: AsRef<str>>(available: &[S], candidates: &[&str]) -> HazardResult<String> {
    for candidate in candidates {
        if available.iter().any(|name| name.as_ref() == *candidate) {
            return Ok((*candidate).to_string());
        }
    }
    Err(HazardError::AxisNotFound {
        candidates: candidates.iter().map(|c| c.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_candidate_wins() {
        let available = vec!["latitude", "lat", "time"];
        // "lat" is preferred even though "latitude" appears first in the file.
        assert_eq!(resolve_axis(&available, LAT_CANDIDATES).unwrap(), "lat");
    }

    #[test]
    fn test_alternate_spelling() {
        let available = vec!["latitude".to_string(), "longitude".to_string(), "t".to_string()];
        assert_eq!(
            resolve_axis(&available, LAT_CANDIDATES).unwrap(),
            "latitude"
        );
        assert_eq!(
            resolve_axis(&available, LON_CANDIDATES).unwrap(),
            "longitude"
        );
        assert_eq!(resolve_axis(&available, TIME_CANDIDATES).unwrap(), "t");
    }

    #[test]
    fn test_missing_axis_is_hard_error() {
        let available = vec!["depth"];
        let err = resolve_axis(&available, TIME_CANDIDATES).unwrap_err();
        match err {
            HazardError::AxisNotFound { candidates } => {
                assert_eq!(candidates, vec!["time", "t"]);
            }
            other => panic!("expected AxisNotFound, got {other:?}"),
        }
    }
}

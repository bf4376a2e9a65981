//! Nearest-neighbor and bounding-box selection on coordinate axes.

use chrono::{DateTime, Utc};
use std::ops::Range;

/// Index of the axis value nearest to `target`.
///
/// Ties resolve to the first match in axis order. Returns `None` only
/// for an empty axis.
pub fn nearest_index(axis: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in axis.iter().enumerate() {
        let distance = (value - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the timestamp nearest to `target`.
pub fn nearest_time_index(times: &[DateTime<Utc>], target: DateTime<Utc>) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for (i, time) in times.iter().enumerate() {
        let distance = (*time - target).num_milliseconds().abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// Contiguous index range of axis values inside `[min, max]`.
///
/// Both bounds omitted returns the full axis; a single omitted bound
/// defaults to the axis's observed extreme. The axis may be stored
/// ascending or descending; traversal order is matched to the storage
/// order so a descending axis never produces an accidentally empty
/// slice.
pub fn axis_slice(axis: &[f64], min: Option<f64>, max: Option<f64>) -> Range<usize> {
    if axis.is_empty() {
        return 0..0;
    }
    if min.is_none() && max.is_none() {
        return 0..axis.len();
    }

    let observed_min = axis.iter().cloned().fold(f64::INFINITY, f64::min);
    let observed_max = axis.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lo = min.unwrap_or(observed_min);
    let hi = max.unwrap_or(observed_max);

    let ascending = axis[0] <= axis[axis.len() - 1];

    let start = if ascending {
        axis.iter().position(|&v| v >= lo)
    } else {
        axis.iter().position(|&v| v <= hi)
    };
    let end = if ascending {
        axis.iter().rposition(|&v| v <= hi)
    } else {
        axis.iter().rposition(|&v| v >= lo)
    };

    match (start, end) {
        (Some(start), Some(end)) if start <= end => start..end + 1,
        _ => 0..0,
    }
}

/// Normalize longitude bounds to a dataset's own domain convention.
///
/// When the axis domain is non-negative (0-360 files) and a requested
/// bound is negative (-180-180 callers), each provided bound is mapped
/// into `[0, 360)` by Euclidean modulo. If normalization leaves
/// west > east the bounds are swapped rather than left reversed.
pub fn normalize_lon_bounds(
    axis: &[f64],
    west: Option<f64>,
    east: Option<f64>,
) -> (Option<f64>, Option<f64>) {
    let domain_non_negative = axis.iter().all(|&v| v >= 0.0);
    let has_negative_bound =
        west.map(|w| w < 0.0).unwrap_or(false) || east.map(|e| e < 0.0).unwrap_or(false);

    if !domain_non_negative || !has_negative_bound {
        return (west, east);
    }

    let west = west.map(|w| w.rem_euclid(360.0));
    let east = east.map(|e| e.rem_euclid(360.0));

    match (west, east) {
        (Some(w), Some(e)) if w > e => (Some(e), Some(w)),
        other => other,
    }
}

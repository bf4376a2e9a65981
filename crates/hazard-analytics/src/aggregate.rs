//! Calendar grouping of time-indexed series.

use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;

/// Mean per calendar year, years in ascending order.
///
/// Years without a single finite sample are absent, not zero-filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlySeries {
    pub years: Vec<i32>,
    pub means: Vec<f64>,
}

/// Group a series by calendar year and average the finite samples.
pub fn yearly_means(times: &[DateTime<Utc>], values: &[f64]) -> YearlySeries {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for (time, &value) in times.iter().zip(values) {
        if !value.is_finite() {
            continue;
        }
        let entry = sums.entry(time.year()).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let mut series = YearlySeries::default();
    for (year, (sum, count)) in sums {
        series.years.push(year);
        series.means.push(sum / count as f64);
    }
    series
}

/// Mean per calendar month collapsed across all years.
///
/// Always exactly 12 slots in January..December order; months without a
/// finite sample are `None`, never zero.
pub fn monthly_means(times: &[DateTime<Utc>], values: &[f64]) -> [Option<f64>; 12] {
    let mut sums = [(0.0f64, 0usize); 12];
    for (time, &value) in times.iter().zip(values) {
        if !value.is_finite() {
            continue;
        }
        let slot = (time.month0()) as usize;
        sums[slot].0 += value;
        sums[slot].1 += 1;
    }

    let mut means = [None; 12];
    for (slot, (sum, count)) in sums.iter().enumerate() {
        if *count > 0 {
            means[slot] = Some(sum / *count as f64);
        }
    }
    means
}

/// Fixed month labels "01".."12" matching the monthly slots.
pub fn monthly_labels() -> Vec<String> {
    (1..=12).map(|month| format!("{month:02}")).collect()
}

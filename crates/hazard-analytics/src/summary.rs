//! Summary statistics with threshold buckets.

use serde::{Deserialize, Serialize};

/// Reduction of a sample array in reporting units.
///
/// The three bucket counts partition the finite samples:
/// `operational + attention + stop == samples`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub samples: usize,
    pub mean: f64,
    pub p90: f64,
    pub p95: f64,
    pub max: f64,
    /// Samples strictly below the operational threshold.
    pub operational_samples: usize,
    /// Samples in [operational, attention).
    pub attention_samples: usize,
    /// Samples at or above the attention threshold.
    pub stop_samples: usize,
}

/// Summarize a flat sample array against two ascending thresholds.
///
/// Non-finite samples are dropped first; an empty remainder yields the
/// all-zero summary rather than NaN fields.
pub fn summarize(values: &[f64], operational_max: f64, attention_max: f64) -> SummaryStatistics {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return SummaryStatistics::default();
    }

    finite.sort_by(|a, b| a.partial_cmp(b).expect("finite samples are ordered"));

    let samples = finite.len();
    let mean = finite.iter().sum::<f64>() / samples as f64;
    let p90 = percentile(&finite, 90.0);
    let p95 = percentile(&finite, 95.0);
    let max = *finite.last().expect("non-empty");

    let operational_samples = finite.iter().filter(|&&v| v < operational_max).count();
    let stop_samples = finite.iter().filter(|&&v| v >= attention_max).count();
    let attention_samples = samples - operational_samples - stop_samples;

    SummaryStatistics {
        samples,
        mean,
        p90,
        p95,
        max,
        operational_samples,
        attention_samples,
        stop_samples,
    }
}

/// Linear-interpolation percentile over an ascending-sorted slice.
///
/// rank = q/100 * (n - 1), interpolated between the neighboring order
/// statistics. This matches the standard definition, not nearest-rank.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (q / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let fraction = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        }
    }
}

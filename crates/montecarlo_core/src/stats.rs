//! Descriptive statistics over the per-trial aggregate.

use crate::model::{Percentiles, SimulationSummary};

/// Arithmetic mean; 0 for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample variance (divides by n - 1).
///
/// Fewer than two values have no sample variance; 0 is returned so that a
/// single-trial run still yields a finite summary.
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Percentile of an ascending-sorted slice using linear interpolation
/// between the two nearest order statistics.
///
/// `q` is a fraction in `[0, 1]`. Returns `None` for an empty slice.
#[must_use]
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = q.clamp(0.0, 1.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let (a, b) = (sorted[lo], sorted[hi]);
    if lo == hi {
        return Some(a);
    }
    let frac = rank - lo as f64;
    // keep the interpolated value inside its bracket despite rounding
    Some((a + frac * (b - a)).max(a).min(b))
}

/// Summarize an aggregate vector. Returns `None` when it is empty.
#[must_use]
pub fn summarize(aggregate: &[f64]) -> Option<SimulationSummary> {
    if aggregate.is_empty() {
        return None;
    }

    let mut sorted = aggregate.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let [p5, p25, p50, p75, p95] =
        Percentiles::LEVELS.map(|q| percentile(&sorted, q).unwrap_or_default());

    let variance = sample_variance(aggregate);

    Some(SimulationSummary {
        mean: mean(aggregate),
        std: variance.sqrt(),
        variance,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        percentiles: Percentiles {
            p5,
            p25,
            p50,
            p75,
            p95,
        },
        sample_count: aggregate.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        // population variance is 4, sample variance is 32 / 7
        assert!((sample_variance(&values) - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_zero_variance() {
        assert_eq!(sample_variance(&[42.0]), 0.0);
        let summary = summarize(&[42.0]).unwrap();
        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.variance, 0.0);
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.percentiles.p95, 42.0);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        // Matches numpy.percentile(..., method="linear")
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.0), Some(1.0));
        assert_eq!(percentile(&sorted, 1.0), Some(4.0));
        assert_eq!(percentile(&sorted, 0.5), Some(2.5));
        assert!((percentile(&sorted, 0.05).unwrap() - 1.15).abs() < 1e-12);
        assert!((percentile(&sorted, 0.95).unwrap() - 3.85).abs() < 1e-12);
        assert_eq!(percentile(&[], 0.5), None);
    }

    #[test]
    fn test_summarize_unsorted_input() {
        let values: Vec<f64> = (1..=100).rev().map(f64::from).collect();
        let summary = summarize(&values).unwrap();

        assert_eq!(summary.sample_count, 100);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 100.0);
        assert_eq!(summary.mean, 50.5);
        assert!((summary.percentiles.p50 - 50.5).abs() < 1e-12);
        assert!((summary.percentiles.p5 - 5.95).abs() < 1e-9);
        assert!(summary.percentiles.is_ordered());
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_none());
    }
}

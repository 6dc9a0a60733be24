//! Density estimation for the chart overlay.
//!
//! A [`DensityEstimator`] turns samples into a curve evaluated on an evenly
//! spaced grid. Returning `None` means "no curve available" and lets the
//! caller fall back to something simpler.
//!
//! The Gaussian KDE is only compiled with the `kde` feature. The histogram
//! estimator is always present.

use serde::{Deserialize, Serialize};

#[cfg(feature = "kde")]
use crate::stats;

/// Which estimator to use for the density overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DensityBackend {
    /// Kernel density estimate when compiled in, histogram otherwise
    #[default]
    Auto,
    /// Request the kernel density estimate; degrades to the histogram when unavailable
    Kde,
    /// Always use a density-normalized histogram
    Histogram,
}

/// Density values sampled on a grid. `xs` and `ys` have equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl DensityCurve {
    #[must_use]
    pub fn max_density(&self) -> f64 {
        self.ys.iter().copied().fold(0.0_f64, f64::max)
    }
}

pub trait DensityEstimator {
    /// Short name recorded in logs
    fn name(&self) -> &'static str;

    /// Estimate the density on `grid_points` evenly spaced x values.
    fn estimate(&self, samples: &[f64], grid_points: usize) -> Option<DensityCurve>;
}

/// Finite min and max of the samples, `None` when empty or non-finite
fn finite_range(samples: &[f64]) -> Option<(f64, f64)> {
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min.is_finite() && max.is_finite()).then_some((min, max))
}

/// Density-normalized histogram, reported at bin centers.
#[derive(Debug, Clone, Copy)]
pub struct HistogramDensity {
    pub bins: usize,
}

impl Default for HistogramDensity {
    fn default() -> Self {
        Self { bins: 30 }
    }
}

impl DensityEstimator for HistogramDensity {
    fn name(&self) -> &'static str {
        "histogram"
    }

    fn estimate(&self, samples: &[f64], _grid_points: usize) -> Option<DensityCurve> {
        let (min, max) = finite_range(samples)?;
        if self.bins == 0 || max <= min {
            return None;
        }

        let width = (max - min) / self.bins as f64;
        let counts = bin_counts(samples, min, max, self.bins);
        let scale = 1.0 / (samples.len() as f64 * width);

        let xs = (0..self.bins)
            .map(|i| min + (i as f64 + 0.5) * width)
            .collect();
        let ys = counts.iter().map(|&c| c as f64 * scale).collect();
        Some(DensityCurve { xs, ys })
    }
}

/// Count samples per equal-width bin over `[min, max]`; the last bin is closed.
#[must_use]
pub fn bin_counts(samples: &[f64], min: f64, max: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return counts;
    }
    let span = max - min;
    for &x in samples {
        let idx = if span > 0.0 {
            (((x - min) / span) * bins as f64) as usize
        } else {
            0
        };
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

/// Gaussian kernel density estimate with Silverman's rule-of-thumb bandwidth
/// `h = 1.06 * σ * n^(-1/5)`.
#[cfg(feature = "kde")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GaussianKde {
    /// Overrides the rule-of-thumb bandwidth when set
    pub bandwidth: Option<f64>,
}

#[cfg(feature = "kde")]
impl GaussianKde {
    fn bandwidth_for(&self, samples: &[f64]) -> f64 {
        self.bandwidth.unwrap_or_else(|| {
            let sigma = stats::sample_variance(samples).sqrt();
            1.06 * sigma * (samples.len() as f64).powf(-0.2)
        })
    }
}

#[cfg(feature = "kde")]
impl DensityEstimator for GaussianKde {
    fn name(&self) -> &'static str {
        "gaussian_kde"
    }

    fn estimate(&self, samples: &[f64], grid_points: usize) -> Option<DensityCurve> {
        use statrs::distribution::{Continuous, Normal};

        let (min, max) = finite_range(samples)?;
        let h = self.bandwidth_for(samples);
        if grid_points < 2 || !(h.is_finite() && h > 0.0) {
            return None;
        }
        let kernel = Normal::new(0.0, 1.0).ok()?;

        // extend the grid by three bandwidths so the tails are visible
        let lo = min - 3.0 * h;
        let hi = max + 3.0 * h;
        let step = (hi - lo) / (grid_points - 1) as f64;
        let norm = 1.0 / (samples.len() as f64 * h);

        let xs: Vec<f64> = (0..grid_points).map(|i| lo + i as f64 * step).collect();
        let ys = xs
            .iter()
            .map(|&x| norm * samples.iter().map(|&s| kernel.pdf((x - s) / h)).sum::<f64>())
            .collect();
        Some(DensityCurve { xs, ys })
    }
}

/// Pick the estimator for a backend, honoring which ones are compiled in.
#[must_use]
pub fn estimator_for(backend: DensityBackend, bins: usize) -> Box<dyn DensityEstimator> {
    match backend {
        #[cfg(feature = "kde")]
        DensityBackend::Auto | DensityBackend::Kde => Box::new(GaussianKde::default()),
        _ => Box::new(HistogramDensity { bins }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_counts_include_max_in_last_bin() {
        let counts = bin_counts(&[0.0, 0.5, 1.0, 1.0], 0.0, 1.0, 2);
        assert_eq!(counts, vec![1, 3]);
    }

    #[test]
    fn test_histogram_density_integrates_to_one() {
        let samples: Vec<f64> = (0..1000).map(|i| f64::from(i) / 10.0).collect();
        let curve = HistogramDensity { bins: 20 }.estimate(&samples, 0).unwrap();
        let width = curve.xs[1] - curve.xs[0];
        let area: f64 = curve.ys.iter().map(|y| y * width).sum();
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_density_unavailable_for_constant_samples() {
        assert!(HistogramDensity::default().estimate(&[5.0; 10], 0).is_none());
        assert!(HistogramDensity::default().estimate(&[], 0).is_none());
    }

    #[cfg(feature = "kde")]
    #[test]
    fn test_kde_integrates_to_about_one() {
        let samples: Vec<f64> = (0..500).map(|i| f64::from(i % 50)).collect();
        let curve = GaussianKde::default().estimate(&samples, 400).unwrap();
        let step = curve.xs[1] - curve.xs[0];
        let area: f64 = curve.ys.iter().map(|y| y * step).sum();
        assert!((area - 1.0).abs() < 0.02, "area = {area}");
    }

    #[cfg(feature = "kde")]
    #[test]
    fn test_kde_unavailable_without_spread() {
        assert!(GaussianKde::default().estimate(&[1.0; 20], 100).is_none());
    }

    #[test]
    fn test_histogram_backend_is_always_histogram() {
        assert_eq!(estimator_for(DensityBackend::Histogram, 10).name(), "histogram");
    }
}

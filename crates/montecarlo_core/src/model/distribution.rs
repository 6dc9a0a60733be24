use rand::Rng;
use rand_distr::Distribution as _;
use serde::{Deserialize, Serialize};

/// A validated, strongly typed distribution ready for sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Distribution {
    /// Gaussian with the given mean and standard deviation.
    /// `std == 0` is the degenerate distribution at `mean`.
    Normal { mean: f64, std: f64 },
    /// Continuous uniform on `[low, high)`; `low == high` is a point mass.
    Uniform { low: f64, high: f64 },
    /// Triangular on `[left, right]` peaking at `mode`.
    Triangular { left: f64, mode: f64, right: f64 },
    /// Uniform(0, 1), used for distribution tags the engine does not know.
    Fallback,
}

impl Distribution {
    /// Family name used in error messages
    #[must_use]
    pub fn family(&self) -> &'static str {
        match self {
            Distribution::Normal { .. } => "Normal",
            Distribution::Uniform { .. } => "Uniform",
            Distribution::Triangular { .. } => "Triangular",
            Distribution::Fallback => "Fallback",
        }
    }

    /// Check the parameter shape, returning the reason when it is invalid.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Distribution::Normal { std, .. } if std < 0.0 => {
                Err(format!("std must be non-negative, got {std}"))
            }
            Distribution::Uniform { low, high } if high < low => {
                Err(format!("high ({high}) must not be below low ({low})"))
            }
            Distribution::Triangular { left, mode, right } if !(left <= mode && mode <= right) => {
                Err(format!(
                    "expected left <= mode <= right, got left={left}, mode={mode}, right={right}"
                ))
            }
            _ => Ok(()),
        }
    }

    /// Draw `n` independent samples.
    ///
    /// The generator is advanced only by this call, so a variable's samples
    /// depend on the generator state and nothing else.
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>, String> {
        self.validate()?;

        let samples = match *self {
            Distribution::Normal { mean, std } if std == 0.0 => vec![mean; n],
            Distribution::Normal { mean, std } => {
                let normal = rand_distr::Normal::new(mean, std)
                    .map_err(|e| format!("normal sampler rejected parameters: {e}"))?;
                normal.sample_iter(&mut *rng).take(n).collect()
            }
            Distribution::Uniform { low, high } if low == high => vec![low; n],
            Distribution::Uniform { low, high } => {
                let uniform = rand_distr::Uniform::new(low, high)
                    .map_err(|e| format!("uniform sampler rejected parameters: {e}"))?;
                uniform.sample_iter(&mut *rng).take(n).collect()
            }
            Distribution::Triangular { left, right, .. } if left == right => vec![left; n],
            Distribution::Triangular { left, mode, right } => {
                let triangular = rand_distr::Triangular::new(left, right, mode)
                    .map_err(|e| format!("triangular sampler rejected parameters: {e}"))?;
                triangular.sample_iter(&mut *rng).take(n).collect()
            }
            Distribution::Fallback => (0..n).map(|_| rng.random::<f64>()).collect(),
        };

        Ok(samples)
    }
}

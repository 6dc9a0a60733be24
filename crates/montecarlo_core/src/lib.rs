//! Monte Carlo aggregation engine
//!
//! Given a set of independent random variables, each with a distribution
//! family and parameters, this crate draws a fixed number of joint samples,
//! sums them per trial, and summarizes the resulting distribution:
//! - Normal, Uniform and Triangular families, with a Uniform(0, 1) fallback
//!   for unknown distribution tags
//! - mean, Bessel-corrected std/variance, min/max and p5..p95 percentiles
//! - a bounded preview of the per-trial aggregate
//! - an optional histogram + density chart (SVG, base64 encoded)
//!
//! Every call owns its random generator. Passing a seed makes a run fully
//! reproducible.
//!
//! ```ignore
//! use montecarlo_core::config::{SimulationBuilder, VariableBuilder};
//! use montecarlo_core::{RunOptions, run_with_options};
//!
//! let run = SimulationBuilder::new()
//!     .iterations(10_000)
//!     .seed(42)
//!     .variable(VariableBuilder::normal("Labor").mean(120.0).std(20.0))
//!     .variable(VariableBuilder::uniform("Permits").low(5.0).high(15.0))
//!     .build();
//!
//! let output = run_with_options(&run, &RunOptions::with_charts())?;
//! println!("p95 = {}", output.summary.percentiles.p95);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod chart;
pub mod density;
pub mod error;
pub mod simulation;
pub mod stats;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ChartOptions, RunOptions, SimulationBuilder, VariableBuilder};
pub use density::DensityBackend;
pub use error::{ChartError, SimulationError};
pub use model::{
    ChartArtifact, Distribution, DistributionKind, ParamValue, Percentiles, SimulationOutput,
    SimulationRun, SimulationSummary, VariableSpec,
};
#[cfg(feature = "parallel")]
pub use simulation::run_many;
pub use simulation::{run, run_with_options};

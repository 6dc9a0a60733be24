//! Run configuration
//!
//! [`RunOptions`] controls what a run produces beyond the summary (currently
//! only the chart artifact). The inputs themselves live in
//! [`SimulationRun`](crate::model::SimulationRun).
//!
//! # Builder DSL
//!
//! ```ignore
//! use montecarlo_core::config::{SimulationBuilder, VariableBuilder};
//!
//! let run = SimulationBuilder::new()
//!     .iterations(10_000)
//!     .seed(42)
//!     .variable(VariableBuilder::normal("Labor").mean(120.0).std(20.0))
//!     .variable(VariableBuilder::triangular("Materials").left(40.0).mode(55.0).right(90.0))
//!     .variable(VariableBuilder::uniform("Permits").low(5.0).high(15.0))
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::density::DensityBackend;

pub mod builder;
pub mod variable_builder;

pub use builder::SimulationBuilder;
pub use variable_builder::VariableBuilder;

fn default_bins() -> usize {
    30
}

fn default_grid_points() -> usize {
    200
}

fn default_width() -> u32 {
    960
}

fn default_height() -> u32 {
    360
}

/// Options for the `histogram_density` chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Histogram bin count (also used by the histogram density fallback)
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// Number of x values the density curve is evaluated at
    #[serde(default = "default_grid_points")]
    pub grid_points: usize,
    #[serde(default)]
    pub density: DensityBackend,
    /// Total image width in pixels (both panels)
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            grid_points: default_grid_points(),
            density: DensityBackend::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Per-call options for the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Render the chart artifact; `None` skips chart rendering entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts: Option<ChartOptions>,
}

impl RunOptions {
    /// Options that render charts with default settings
    #[must_use]
    pub fn with_charts() -> Self {
        Self {
            charts: Some(ChartOptions::default()),
        }
    }
}

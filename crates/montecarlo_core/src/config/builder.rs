//! Simulation Builder
//!
//! The SimulationBuilder provides a fluent API for assembling a
//! [`SimulationRun`]. Variables keep the order in which they are added.
//!
//! # Example
//!
//! ```ignore
//! use montecarlo_core::config::{SimulationBuilder, VariableBuilder};
//!
//! let run = SimulationBuilder::new()
//!     .iterations(50_000)
//!     .seed(7)
//!     .variable(VariableBuilder::normal("Revenue").mean(1_000.0).std(150.0))
//!     .variable(VariableBuilder::triangular("Cost").left(-700.0).mode(-600.0).right(-400.0))
//!     .build();
//! ```

use super::variable_builder::VariableBuilder;
use crate::model::{SimulationRun, VariableSpec};

/// Builder for creating simulation runs
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    run: SimulationRun,
}

impl SimulationBuilder {
    /// Create a new builder with 1000 iterations, no seed and no variables
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of trials
    #[must_use]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.run.iterations = iterations;
        self
    }

    /// Fix the generator seed for a reproducible run
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.run.seed = Some(seed);
        self
    }

    /// Add a variable built with [`VariableBuilder`]
    #[must_use]
    pub fn variable(mut self, variable: VariableBuilder) -> Self {
        self.run.variables.push(variable.build());
        self
    }

    /// Add an already constructed spec
    #[must_use]
    pub fn spec(mut self, spec: VariableSpec) -> Self {
        self.run.variables.push(spec);
        self
    }

    #[must_use]
    pub fn build(self) -> SimulationRun {
        self.run
    }
}

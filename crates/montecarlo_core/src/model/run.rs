use serde::{Deserialize, Serialize};

use super::variable::VariableSpec;

fn default_iterations() -> usize {
    1000
}

/// Input of a single simulation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Fixed seed for reproducible runs; `None` draws from OS entropy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationRun {
    fn default() -> Self {
        Self {
            variables: Vec::new(),
            iterations: default_iterations(),
            seed: None,
        }
    }
}

impl SimulationRun {
    #[must_use]
    pub fn new(variables: Vec<VariableSpec>, iterations: usize, seed: Option<u64>) -> Self {
        Self {
            variables,
            iterations,
            seed,
        }
    }
}

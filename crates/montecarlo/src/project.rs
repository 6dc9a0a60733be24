//! Project files
//!
//! A project is a named set of variables with default run settings:
//!
//! ```yaml
//! name: Harbor Bridge
//! description: Phase 1 cost estimate
//! iterations: 10000
//! seed: 42
//! variables:
//!   - name: Labor
//!     distribution: normal
//!     params: { mean: 120, std: 20 }
//!   - name: Permits
//!     distribution: Uniform
//!     params: { low: 5, high: "15" }
//! ```

use std::fs;
use std::path::Path;

use montecarlo_core::{ChartOptions, SimulationRun, VariableSpec};
use serde::{Deserialize, Serialize};

use crate::storage::StorageError;

fn default_iterations() -> usize {
    1000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Chart settings; when present, charts are rendered on every run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charts: Option<ChartOptions>,
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
}

impl ProjectFile {
    pub fn from_yaml(content: &str) -> Result<Self, StorageError> {
        serde_saphyr::from_str(content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse project: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let content = fs::read_to_string(path).map_err(|e| {
            StorageError::Io(format!("Failed to read project {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// The engine input for this project, with optional CLI overrides
    pub fn to_run(&self, iterations: Option<usize>, seed: Option<u64>) -> SimulationRun {
        SimulationRun::new(
            self.variables.clone(),
            iterations.unwrap_or(self.iterations),
            seed.or(self.seed),
        )
    }
}

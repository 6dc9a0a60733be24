mod distribution;
mod results;
mod run;
mod variable;

pub use distribution::Distribution;
pub use results::{
    ChartArtifact, HISTOGRAM_DENSITY_CHART, PREVIEW_LEN, Percentiles, SimulationOutput,
    SimulationSummary,
};
pub use run::SimulationRun;
pub use variable::{DistributionKind, ParamValue, VariableSpec};

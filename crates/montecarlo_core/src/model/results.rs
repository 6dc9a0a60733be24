use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key under which the histogram + density chart is stored in [`SimulationOutput::charts`]
pub const HISTOGRAM_DENSITY_CHART: &str = "histogram_density";

/// Number of aggregate values kept in [`SimulationOutput::samples_preview`]
pub const PREVIEW_LEN: usize = 200;

/// Standard percentile set of the aggregate distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
}

impl Percentiles {
    /// The quantile levels in ascending order, as fractions of 1
    pub const LEVELS: [f64; 5] = [0.05, 0.25, 0.50, 0.75, 0.95];

    /// Values as `(level, value)` pairs in ascending level order
    #[must_use]
    pub fn pairs(&self) -> [(f64, f64); 5] {
        [
            (0.05, self.p5),
            (0.25, self.p25),
            (0.50, self.p50),
            (0.75, self.p75),
            (0.95, self.p95),
        ]
    }

    /// True when the values are non-decreasing in level order
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.p5 <= self.p25 && self.p25 <= self.p50 && self.p50 <= self.p75 && self.p75 <= self.p95
    }
}

/// Summary statistics of the per-trial aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); 0 for a single trial
    pub std: f64,
    /// Sample variance (ddof = 1); 0 for a single trial
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: Percentiles,
    pub sample_count: usize,
}

/// Binary chart payload, encoded for embedding in documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartArtifact {
    pub mime_type: String,
    pub encoding: String,
    pub data: String,
}

impl ChartArtifact {
    /// `data:` URI suitable for an `<img src>` attribute or Markdown image link
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};{},{}", self.mime_type, self.encoding, self.data)
    }
}

/// Everything a run hands back to its caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub summary: SimulationSummary,
    /// First [`PREVIEW_LEN`] aggregate values in trial order
    pub samples_preview: Vec<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub charts: BTreeMap<String, ChartArtifact>,
}

impl SimulationOutput {
    #[must_use]
    pub fn histogram_density(&self) -> Option<&ChartArtifact> {
        self.charts.get(HISTOGRAM_DENSITY_CHART)
    }
}

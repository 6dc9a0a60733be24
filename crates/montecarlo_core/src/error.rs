use thiserror::Error;

/// Errors that abort a simulation run before any sampling happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Iteration count must be a positive integer
    #[error("iterations must be a positive integer, got {0}")]
    InvalidIterations(usize),

    #[error("variable at position {index} has an empty name")]
    MissingName { index: usize },

    #[error("variable name `{0}` is used more than once")]
    DuplicateName(String),

    /// A parameter value could not be coerced to a number
    #[error("parameter `{param}` of variable `{variable}` is not numeric: {value:?}")]
    NonNumericParam {
        variable: String,
        param: String,
        value: String,
    },

    #[error("parameter `{param}` of variable `{variable}` must be finite, got {value}")]
    NonFiniteParam {
        variable: String,
        param: String,
        value: f64,
    },

    /// Parameters are numeric but do not describe a valid distribution
    /// (inverted bounds, negative spread, mode outside the range).
    #[error("invalid {distribution} distribution for variable `{variable}`: {reason}")]
    InvalidDistribution {
        variable: String,
        distribution: &'static str,
        reason: String,
    },

    /// Parameters are finite but their aggregate overflows `f64`
    #[error("aggregate {0} is not finite; variable magnitudes overflow f64")]
    NonFiniteAggregate(&'static str),
}

/// Errors from rendering the optional chart artifact.
///
/// These never escape the engine: a failed chart is dropped from the output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("no samples to chart")]
    Empty,

    #[error("samples contain non-finite values")]
    NonFiniteSamples,

    #[error("failed to draw chart: {0}")]
    Draw(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::chart::render_histogram_density;
use crate::config::RunOptions;
use crate::error::{Result, SimulationError};
use crate::model::{
    Distribution, HISTOGRAM_DENSITY_CHART, PREVIEW_LEN, SimulationOutput, SimulationRun,
    SimulationSummary, VariableSpec,
};
use crate::stats::summarize;

/// A variable whose spec has been coerced and validated
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariable {
    pub name: String,
    pub distribution: Distribution,
}

/// Validate and resolve every variable of a run.
///
/// Names must be non-empty and unique. Nothing is sampled until all
/// variables resolve, so a bad variable never yields a partial result.
pub fn resolve_variables(variables: &[VariableSpec]) -> Result<Vec<ResolvedVariable>> {
    let mut seen = FxHashSet::default();
    variables
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            if spec.name.trim().is_empty() {
                return Err(SimulationError::MissingName { index });
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(SimulationError::DuplicateName(spec.name.clone()));
            }
            Ok(ResolvedVariable {
                name: spec.name.clone(),
                distribution: spec.resolve()?,
            })
        })
        .collect()
}

/// Build the call-local generator: seeded when a seed is given, OS entropy otherwise.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draw `iterations` samples per variable and sum them per trial.
///
/// Variables are sampled in order, each drawing its full vector before the
/// next one starts. With no variables the aggregate is all zeros.
pub fn sample_aggregate<R: Rng + ?Sized>(
    variables: &[ResolvedVariable],
    iterations: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    let mut aggregate = vec![0.0; iterations];
    for variable in variables {
        let samples = variable
            .distribution
            .sample_n(rng, iterations)
            .map_err(|reason| SimulationError::InvalidDistribution {
                variable: variable.name.clone(),
                distribution: variable.distribution.family(),
                reason,
            })?;
        for (total, sample) in aggregate.iter_mut().zip(samples) {
            *total += sample;
        }
    }
    Ok(aggregate)
}

/// Reject statistics that overflowed even though every sample is finite.
fn check_summary(summary: &SimulationSummary) -> Result<()> {
    let fields = [
        ("mean", summary.mean),
        ("variance", summary.variance),
        ("std", summary.std),
    ];
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(SimulationError::NonFiniteAggregate(name)),
        None => Ok(()),
    }
}

/// Run a simulation: sample, aggregate, summarize.
///
/// Identical `variables`, `iterations` and `Some(seed)` always produce
/// identical output. Charts are not rendered; see [`run_with_options`].
pub fn run(
    variables: &[VariableSpec],
    iterations: usize,
    seed: Option<u64>,
) -> Result<SimulationOutput> {
    run_with_options(
        &SimulationRun::new(variables.to_vec(), iterations, seed),
        &RunOptions::default(),
    )
}

/// Run a simulation described by a [`SimulationRun`].
pub fn run_with_options(run: &SimulationRun, options: &RunOptions) -> Result<SimulationOutput> {
    if run.iterations == 0 {
        return Err(SimulationError::InvalidIterations(run.iterations));
    }
    let variables = resolve_variables(&run.variables)?;

    let mut rng = make_rng(run.seed);
    let aggregate = sample_aggregate(&variables, run.iterations, &mut rng)?;
    if aggregate.iter().any(|x| !x.is_finite()) {
        return Err(SimulationError::NonFiniteAggregate("sample sum"));
    }

    let summary =
        summarize(&aggregate).ok_or(SimulationError::InvalidIterations(run.iterations))?;
    check_summary(&summary)?;

    let samples_preview = aggregate.iter().take(PREVIEW_LEN).copied().collect();

    let mut output = SimulationOutput {
        summary,
        samples_preview,
        charts: Default::default(),
    };

    if let Some(chart_options) = &options.charts {
        match render_histogram_density(&aggregate, chart_options) {
            Ok(artifact) => {
                output
                    .charts
                    .insert(HISTOGRAM_DENSITY_CHART.to_string(), artifact);
            }
            Err(e) => tracing::debug!(error = %e, "chart rendering failed, omitting chart"),
        }
    }

    tracing::debug!(
        variables = variables.len(),
        iterations = run.iterations,
        seeded = run.seed.is_some(),
        mean = output.summary.mean,
        "simulation finished"
    );

    Ok(output)
}

/// Run independent simulations in parallel.
///
/// Each run owns its generator, so results are identical to calling
/// [`run_with_options`] on each run in turn, and are returned in input order.
#[cfg(feature = "parallel")]
pub fn run_many(runs: &[SimulationRun], options: &RunOptions) -> Vec<Result<SimulationOutput>> {
    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

    runs.par_iter()
        .map(|run| run_with_options(run, options))
        .collect()
}

//! Chart rendering for the aggregate distribution.
//!
//! Produces a single SVG with a frequency histogram on the left and a density
//! curve on the right, base64 encoded into a [`ChartArtifact`]. When no
//! density curve can be estimated the image holds the histogram alone.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::ChartOptions;
use crate::density::{DensityCurve, DensityEstimator, HistogramDensity, bin_counts, estimator_for};
use crate::error::ChartError;
use crate::model::ChartArtifact;

const SVG_MIME: &str = "image/svg+xml";

const BAR_COLOR: RGBColor = RGBColor(0x4c, 0x72, 0xb0);
const CURVE_COLOR: RGBColor = RGBColor(0xdd, 0x84, 0x52);

/// Map any plotters drawing error into a [`ChartError`]
fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Render the `histogram_density` artifact for an aggregate vector.
pub fn render_histogram_density(
    samples: &[f64],
    options: &ChartOptions,
) -> Result<ChartArtifact, ChartError> {
    let svg = render_svg(samples, options)?;
    Ok(ChartArtifact {
        mime_type: SVG_MIME.to_string(),
        encoding: "base64".to_string(),
        data: STANDARD.encode(svg.as_bytes()),
    })
}

/// Estimate the density curve, falling back from the configured estimator to
/// a plain density histogram, and finally to nothing.
fn density_curve(samples: &[f64], options: &ChartOptions, bins: usize) -> Option<DensityCurve> {
    let estimator = estimator_for(options.density, bins);
    if let Some(curve) = estimator.estimate(samples, options.grid_points) {
        return Some(curve);
    }
    tracing::debug!(
        estimator = estimator.name(),
        "density estimate unavailable, trying histogram density"
    );
    if estimator.name() == "histogram" {
        return None;
    }
    HistogramDensity { bins }.estimate(samples, options.grid_points)
}

/// Render the chart as SVG markup.
pub fn render_svg(samples: &[f64], options: &ChartOptions) -> Result<String, ChartError> {
    if samples.is_empty() {
        return Err(ChartError::Empty);
    }
    if samples.iter().any(|x| !x.is_finite()) {
        return Err(ChartError::NonFiniteSamples);
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bins = options.bins.max(1);
    let counts = bin_counts(samples, min, max, bins);
    let curve = density_curve(samples, options, bins);

    let size = (options.width.max(2), options.height.max(1));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        match &curve {
            Some(curve) => {
                let panels = root.split_evenly((1, 2));
                draw_histogram(&panels[0], &counts, min, max)?;
                draw_density(&panels[1], curve)?;
            }
            None => {
                tracing::debug!("rendering histogram without density overlay");
                draw_histogram(&root, &counts, min, max)?;
            }
        }
        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

fn draw_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    counts: &[usize],
    min: f64,
    max: f64,
) -> Result<(), ChartError> {
    let bins = counts.len() as u32;
    let peak = counts.iter().copied().max().unwrap_or(0).max(1) as u32;
    let width = (max - min) / f64::from(bins);

    let mut chart = ChartBuilder::on(area)
        .caption("Frequency", ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d((0u32..bins).into_segmented(), 0u32..(peak + peak / 10 + 1))
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Count")
        .x_labels(6)
        .x_label_formatter(&|segment| match segment {
            SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                format!("{:.1}", min + f64::from(*i) * width)
            }
            SegmentValue::Last => format!("{max:.1}"),
        })
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(0)
                .data(counts.iter().enumerate().map(|(i, &c)| (i as u32, c as u32))),
        )
        .map_err(draw_err)?;
    Ok(())
}

fn draw_density<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    curve: &DensityCurve,
) -> Result<(), ChartError> {
    let (Some(&lo), Some(&hi)) = (curve.xs.first(), curve.xs.last()) else {
        return Ok(());
    };
    let peak = curve.max_density().max(f64::MIN_POSITIVE);

    let mut chart = ChartBuilder::on(area)
        .caption("Density", ("sans-serif", 16))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi.max(lo + f64::EPSILON), 0.0..peak * 1.1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .y_label_formatter(&|y| format!("{y:.2e}"))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            curve.xs.iter().copied().zip(curve.ys.iter().copied()),
            CURVE_COLOR.stroke_width(2),
        ))
        .map_err(draw_err)?;
    Ok(())
}

//! Rendering of simulation output and reports
//!
//! `text` is the terminal view, `json`/`yaml` are machine-readable dumps and
//! Markdown is the document export (summary tables plus the embedded chart).

use std::fmt::Write as _;

use clap::ValueEnum;
use montecarlo_core::{Percentiles, SimulationOutput, SimulationSummary};
use serde::Serialize;

use crate::report::Report;
use crate::util::format::{format_bytes, format_number, format_percentile_label};

/// Output format for `run` and `reports show`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Document format for `reports export`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Markdown,
    Json,
    Yaml,
}

/// Serialize any value in a machine-readable format
fn to_structured<T: Serialize>(value: &T, yaml: bool) -> color_eyre::Result<String> {
    if yaml {
        Ok(serde_saphyr::to_string(value)?)
    } else {
        let mut json = serde_json::to_string_pretty(value)?;
        json.push('\n');
        Ok(json)
    }
}

fn summary_rows(summary: &SimulationSummary) -> [(&'static str, String); 6] {
    [
        ("mean", format_number(summary.mean)),
        ("std", format_number(summary.std)),
        ("variance", format_number(summary.variance)),
        ("min", format_number(summary.min)),
        ("max", format_number(summary.max)),
        ("samples", summary.sample_count.to_string()),
    ]
}

fn percentile_rows(percentiles: &Percentiles) -> Vec<(String, String)> {
    percentiles
        .pairs()
        .iter()
        .map(|&(level, value)| (format_percentile_label(level), format_number(value)))
        .collect()
}

/// Terminal view of an engine output
pub fn output_text(output: &SimulationOutput) -> String {
    let mut out = String::new();
    let rows = summary_rows(&output.summary)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .chain(percentile_rows(&output.summary.percentiles));

    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<10} {value:>18}");
    }

    for (name, chart) in &output.charts {
        let _ = writeln!(
            out,
            "  chart      {name} ({}, {})",
            chart.mime_type,
            format_bytes(chart.data.len())
        );
    }
    out
}

/// Render an unsaved run result
pub fn render_output(
    project: &str,
    output: &SimulationOutput,
    format: OutputFormat,
) -> color_eyre::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!("Project: {project}\n{}", output_text(output))),
        OutputFormat::Json => to_structured(output, false),
        OutputFormat::Yaml => to_structured(output, true),
    }
}

fn report_header(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.name);
    let _ = writeln!(out, "  id         {}", report.id);
    let _ = writeln!(out, "  project    {}", report.project);
    let _ = writeln!(out, "  created    {}", report.created_at);
    if let Some(deleted_at) = report.deleted_at {
        let _ = writeln!(out, "  deleted    {deleted_at}");
    }
    let _ = writeln!(out, "  iterations {}", report.iterations);
    if let Some(seed) = report.seed {
        let _ = writeln!(out, "  seed       {seed}");
    }
    out
}

/// Render a saved report
pub fn render_report(report: &Report, format: OutputFormat) -> color_eyre::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{}{}",
            report_header(report),
            output_text(&report.output)
        )),
        OutputFormat::Json => to_structured(report, false),
        OutputFormat::Yaml => to_structured(report, true),
    }
}

/// One line per report for `reports list`
pub fn report_line(report: &Report) -> String {
    let id = report.id.to_string();
    let when = report.deleted_at.unwrap_or(report.created_at);
    format!(
        "{}  {}  {:<24}  mean {:>14}  p95 {:>14}",
        &id[..8],
        when.strftime("%Y-%m-%d %H:%M"),
        report.project,
        format_number(report.output.summary.mean),
        format_number(report.output.summary.percentiles.p95),
    )
}

/// Markdown document with the report metadata, summary tables and chart
pub fn report_markdown(report: &Report) -> String {
    let mut md = String::new();
    let summary = &report.output.summary;

    let _ = writeln!(md, "# {}\n", report.name);
    let _ = writeln!(md, "- **Project:** {}", report.project);
    let _ = writeln!(md, "- **Created:** {}", report.created_at);
    let _ = writeln!(md, "- **Iterations:** {}", report.iterations);
    match report.seed {
        Some(seed) => {
            let _ = writeln!(md, "- **Seed:** {seed}");
        }
        None => md.push_str("- **Seed:** none (not reproducible)\n"),
    }

    md.push_str("\n## Summary\n\n| Statistic | Value |\n|---|---:|\n");
    for (label, value) in summary_rows(summary) {
        let _ = writeln!(md, "| {label} | {value} |");
    }

    md.push_str("\n## Percentiles\n\n| Percentile | Value |\n|---|---:|\n");
    for (label, value) in percentile_rows(&summary.percentiles) {
        let _ = writeln!(md, "| {label} | {value} |");
    }

    if let Some(chart) = report.output.histogram_density() {
        let _ = writeln!(
            md,
            "\n## Distribution\n\n![Histogram and density]({})",
            chart.data_uri()
        );
    }

    let preview = &report.output.samples_preview;
    if !preview.is_empty() {
        let _ = writeln!(md, "\n## Samples preview\n\nFirst {} trials:\n", preview.len());
        md.push_str("```\n");
        for chunk in preview.chunks(8) {
            let line: Vec<String> = chunk.iter().map(|v| format!("{v:.2}")).collect();
            let _ = writeln!(md, "{}", line.join(" "));
        }
        md.push_str("```\n");
    }
    md
}

/// Render a report for `reports export`
pub fn export_report(report: &Report, format: ExportFormat) -> color_eyre::Result<String> {
    match format {
        ExportFormat::Markdown => Ok(report_markdown(report)),
        ExportFormat::Json => to_structured(report, false),
        ExportFormat::Yaml => to_structured(report, true),
    }
}

//! Subcommand handlers
//!
//! Handlers take the store and an output sink so they can be driven from
//! tests without touching the real data directory or stdout.

use std::io::Write;

use color_eyre::eyre::WrapErr;
use jiff::{SignedDuration, Timestamp};
use montecarlo_core::{RunOptions, run_with_options};

use crate::cli::{Command, ReportsCommand, RunArgs};
use crate::project::ProjectFile;
use crate::render::{export_report, render_output, render_report, report_line};
use crate::report::{Report, ReportFilter};
use crate::storage::ReportStore;
use crate::util::io::atomic_write;

/// Dispatch a parsed command
pub fn execute(
    store: &ReportStore,
    command: Command,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    match command {
        Command::Run(args) => run_project(store, &args, out).map(|_| ()),
        Command::Reports(command) => reports(store, command, out),
    }
}

/// Run a project file. Returns the saved report, or `None` with `--no-save`.
pub fn run_project(
    store: &ReportStore,
    args: &RunArgs,
    out: &mut impl Write,
) -> color_eyre::Result<Option<Report>> {
    let project = ProjectFile::load(&args.project)?;
    let run = project.to_run(args.iterations, args.seed);

    let charts = match (&project.charts, args.charts) {
        (Some(options), _) => Some(options.clone()),
        (None, true) => Some(Default::default()),
        (None, false) => None,
    };
    let options = RunOptions { charts };

    tracing::info!(
        project = %project.name,
        variables = run.variables.len(),
        iterations = run.iterations,
        "Running simulation"
    );
    let output = run_with_options(&run, &options)
        .wrap_err_with(|| format!("Simulation of project `{}` failed", project.name))?;

    if args.no_save {
        write!(out, "{}", render_output(&project.name, &output, args.format)?)?;
        return Ok(None);
    }

    let report = Report::new(&project.name, &run, output, Timestamp::now());
    store.save(&report)?;
    tracing::info!(id = %report.id, "Saved report");

    write!(out, "{}", render_report(&report, args.format)?)?;
    Ok(Some(report))
}

fn reports(
    store: &ReportStore,
    command: ReportsCommand,
    out: &mut impl Write,
) -> color_eyre::Result<()> {
    match command {
        ReportsCommand::List {
            project,
            date,
            deleted,
        } => {
            let reports = if deleted {
                store.trash()?
            } else {
                store.list(&ReportFilter { project, date })?
            };
            if reports.is_empty() {
                writeln!(out, "No reports")?;
            }
            for report in &reports {
                writeln!(out, "{}", report_line(report))?;
            }
        }
        ReportsCommand::Show { id, format } => {
            let report = store.find(&id)?;
            write!(out, "{}", render_report(&report, format)?)?;
        }
        ReportsCommand::Delete { id } => {
            let report = store.soft_delete(&id, Timestamp::now())?;
            tracing::info!(id = %report.id, "Moved report to trash");
            writeln!(out, "Moved {} to trash", report.name)?;
        }
        ReportsCommand::Recover { id } => {
            let report = store.recover(&id)?;
            tracing::info!(id = %report.id, "Recovered report");
            writeln!(out, "Recovered {}", report.name)?;
        }
        ReportsCommand::Purge { retention_hours } => {
            let retention = SignedDuration::from_hours(i64::from(retention_hours));
            let purged = store.purge(Timestamp::now(), retention)?;
            tracing::info!(count = purged.len(), retention_hours, "Purged deleted reports");
            writeln!(out, "Purged {} report(s)", purged.len())?;
        }
        ReportsCommand::Export { id, output, format } => {
            let report = store.find(&id)?;
            let document = export_report(&report, format)?;
            atomic_write(&output, &document)
                .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
            writeln!(out, "Exported {} to {}", report.name, output.display())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ExportFormat, OutputFormat};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const PROJECT_YAML: &str = r#"
name: Harbor Bridge
iterations: 2000
seed: 42
variables:
  - name: Labor
    distribution: normal
    params: { mean: 120, std: 20 }
  - name: Materials
    distribution: triangular
    params: { left: 40, mode: 55, right: 90 }
"#;

    fn setup() -> (TempDir, ReportStore, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let store = ReportStore::new(temp_dir.path().join("data"));
        let project = temp_dir.path().join("bridge.yaml");
        fs::write(&project, PROJECT_YAML).unwrap();
        (temp_dir, store, project)
    }

    fn run_args(project: &Path) -> RunArgs {
        RunArgs {
            project: project.to_path_buf(),
            iterations: None,
            seed: None,
            charts: false,
            no_save: false,
            format: OutputFormat::Text,
        }
    }

    fn reports_cmd(store: &ReportStore, command: ReportsCommand) -> String {
        let mut out = Vec::new();
        execute(store, Command::Reports(command), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_run_saves_report() {
        let (_temp_dir, store, project) = setup();
        let mut out = Vec::new();

        let report = run_project(&store, &run_args(&project), &mut out)
            .unwrap()
            .unwrap();

        assert_eq!(report.project, "Harbor Bridge");
        assert_eq!(report.iterations, 2000);
        assert_eq!(report.seed, Some(42));
        assert!(report.output.charts.is_empty());
        assert_eq!(store.find(&report.id.to_string()).unwrap().id, report.id);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Report Harbor Bridge"));
    }

    #[test]
    fn test_run_no_save_is_reproducible() {
        let (_temp_dir, store, project) = setup();
        let args = RunArgs {
            no_save: true,
            format: OutputFormat::Json,
            iterations: Some(300),
            ..run_args(&project)
        };

        let mut first = Vec::new();
        let mut second = Vec::new();
        assert!(run_project(&store, &args, &mut first).unwrap().is_none());
        run_project(&store, &args, &mut second).unwrap();

        assert_eq!(first, second);
        assert!(store.load_all().unwrap().is_empty());

        let value: serde_json::Value = serde_json::from_slice(&first).unwrap();
        assert_eq!(value["summary"]["sample_count"], 300);
    }

    #[test]
    fn test_run_with_charts() {
        let (_temp_dir, store, project) = setup();
        let args = RunArgs {
            charts: true,
            ..run_args(&project)
        };

        let report = run_project(&store, &args, &mut Vec::new())
            .unwrap()
            .unwrap();
        assert!(report.output.histogram_density().is_some());
    }

    #[test]
    fn test_run_invalid_project_fails() {
        let (temp_dir, store, _project) = setup();
        let bad = temp_dir.path().join("bad.yaml");
        fs::write(&bad, "name: Bad\niterations: 0\n").unwrap();

        let err = run_project(&store, &run_args(&bad), &mut Vec::new()).unwrap_err();
        assert!(format!("{err:?}").contains("iterations must be a positive integer"));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_report_lifecycle() {
        let (temp_dir, store, project) = setup();
        let report = run_project(&store, &run_args(&project), &mut Vec::new())
            .unwrap()
            .unwrap();
        let id = report.id.to_string();
        let short = id[..8].to_string();

        let listed = reports_cmd(
            &store,
            ReportsCommand::List {
                project: Some("harbor".into()),
                date: None,
                deleted: false,
            },
        );
        assert!(listed.contains(&short));

        let shown = reports_cmd(
            &store,
            ReportsCommand::Show {
                id: short.clone(),
                format: OutputFormat::Text,
            },
        );
        assert!(shown.contains(&id));

        reports_cmd(&store, ReportsCommand::Delete { id: short.clone() });
        let active = reports_cmd(
            &store,
            ReportsCommand::List {
                project: None,
                date: None,
                deleted: false,
            },
        );
        assert_eq!(active, "No reports\n");
        let trash = reports_cmd(
            &store,
            ReportsCommand::List {
                project: None,
                date: None,
                deleted: true,
            },
        );
        assert!(trash.contains(&short));

        // freshly deleted reports survive a purge
        let purged = reports_cmd(&store, ReportsCommand::Purge { retention_hours: 24 });
        assert_eq!(purged, "Purged 0 report(s)\n");

        reports_cmd(&store, ReportsCommand::Recover { id: short.clone() });
        assert!(!store.find(&id).unwrap().is_deleted());

        let dest = temp_dir.path().join("report.md");
        reports_cmd(
            &store,
            ReportsCommand::Export {
                id: short,
                output: dest.clone(),
                format: ExportFormat::Markdown,
            },
        );
        let md = fs::read_to_string(dest).unwrap();
        assert!(md.starts_with("# Report Harbor Bridge"));
    }

    #[test]
    fn test_show_unknown_report_fails() {
        let (_temp_dir, store, _project) = setup();
        let mut out = Vec::new();
        let result = execute(
            &store,
            Command::Reports(ReportsCommand::Show {
                id: "deadbeef".into(),
                format: OutputFormat::Text,
            }),
            &mut out,
        );
        assert!(result.is_err());
    }
}

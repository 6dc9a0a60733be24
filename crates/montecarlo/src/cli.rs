//! Command line interface definition

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::civil::Date;

use crate::render::{ExportFormat, OutputFormat};
use crate::report::DEFAULT_RETENTION_HOURS;

#[derive(Parser, Debug)]
#[command(name = "montecarlo")]
#[command(about = "Monte Carlo aggregation of project variables, with saved reports")]
pub struct Args {
    /// Path to the data directory (default: ~/.montecarlo/)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a project file and save the result as a report
    Run(RunArgs),

    /// Manage saved reports
    #[command(subcommand)]
    Reports(ReportsCommand),
}

#[derive(ClapArgs, Debug)]
pub struct RunArgs {
    /// Project file (YAML)
    pub project: PathBuf,

    /// Override the project's iteration count
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Override the project's seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Render the histogram/density chart
    #[arg(long)]
    pub charts: bool,

    /// Print the result without saving a report
    #[arg(long)]
    pub no_save: bool,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    /// List active reports, newest first
    List {
        /// Only reports whose project name contains this text (case-insensitive)
        #[arg(short, long)]
        project: Option<String>,

        /// Only reports created on this date (YYYY-MM-DD, UTC)
        #[arg(long)]
        date: Option<Date>,

        /// List the trash instead
        #[arg(long)]
        deleted: bool,
    },

    /// Show a report
    Show {
        /// Report id or unique id prefix
        id: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Move a report to the trash
    Delete { id: String },

    /// Restore a report from the trash
    Recover { id: String },

    /// Permanently remove reports that have been in the trash too long
    Purge {
        #[arg(long, default_value_t = DEFAULT_RETENTION_HOURS)]
        retention_hours: u32,
    },

    /// Export a report as a document
    Export {
        id: String,

        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
    },
}

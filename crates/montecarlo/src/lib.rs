//! Reporting CLI for the Monte Carlo aggregation engine
//!
//! Loads project files, runs them through [`montecarlo_core`] and keeps the
//! results as reports in a data directory:
//! - YAML project files with variables and default run settings
//! - one YAML file per report, with soft delete, recovery and timed purge
//! - text, JSON, YAML and Markdown rendering
//! - file logging with size-based rotation

// ============================================================================
// Command line
// ============================================================================

pub mod cli;
pub mod commands;
pub mod logging;

// ============================================================================
// Persistence and rendering
// ============================================================================

pub mod project;
pub mod render;
pub mod report;
pub mod storage;
pub mod util;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cli::Args;
pub use logging::init_logging;
pub use project::ProjectFile;
pub use report::{Report, ReportFilter};
pub use storage::{ReportStore, StorageError};

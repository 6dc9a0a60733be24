//! Saved simulation reports
//!
//! A report is the persisted result of one `run`: the engine output plus the
//! inputs needed to reproduce it. Deleting a report only moves it to the
//! trash (`deleted_at` is set); it is removed for good once it has sat there
//! longer than the retention window.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};
use montecarlo_core::{SimulationOutput, SimulationRun};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default time a report stays in the trash before `purge` removes it
pub const DEFAULT_RETENTION_HOURS: u32 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    /// Name of the project the report was generated from
    pub project: String,
    /// Display name, `Report <project> <created_at>`
    pub name: String,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
    pub iterations: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub output: SimulationOutput,
}

impl Report {
    /// Create a report for a finished run
    pub fn new(
        project: &str,
        run: &SimulationRun,
        output: SimulationOutput,
        now: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project: project.to_string(),
            name: format!("Report {project} {now}"),
            created_at: now,
            deleted_at: None,
            iterations: run.iterations,
            seed: run.seed,
            output,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Move the report to the trash. Deleting twice keeps the first timestamp.
    pub fn soft_delete(&mut self, now: Timestamp) {
        self.deleted_at.get_or_insert(now);
    }

    pub fn recover(&mut self) {
        self.deleted_at = None;
    }

    /// True when the report has been in the trash for longer than `retention`
    pub fn is_expired(&self, now: Timestamp, retention: SignedDuration) -> bool {
        self.deleted_at
            .is_some_and(|deleted_at| now.duration_since(deleted_at) > retention)
    }

    /// Calendar date (UTC) the report was created on
    pub fn created_on(&self) -> Date {
        self.created_at.to_zoned(TimeZone::UTC).date()
    }
}

/// Filter for listing active reports
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Case-insensitive substring of the project name
    pub project: Option<String>,
    /// UTC creation date
    pub date: Option<Date>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        let project_matches = self.project.as_deref().is_none_or(|needle| {
            report
                .project
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let date_matches = self.date.is_none_or(|date| report.created_on() == date);
        project_matches && date_matches
    }
}

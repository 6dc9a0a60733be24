//! Report storage
//!
//! Directory structure:
//! ~/.montecarlo/
//!   montecarlo.log
//!   reports/
//!     3f2a9c1e-....yaml
//!     8b07d4aa-....yaml
//!
//! Every report lives in its own YAML file named after its id. Files are
//! written atomically, so a crash never leaves a truncated report behind.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

use crate::report::{Report, ReportFilter};
use crate::util::io::atomic_write;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
    /// No report matches the given id or id prefix
    NotFound(String),
    /// More than one report matches the given id prefix
    Ambiguous(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::NotFound(id) => write!(f, "No report matches `{}`", id),
            StorageError::Ambiguous(id) => {
                write!(f, "More than one report matches `{}`, use a longer id", id)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Manages the reports directory inside the data directory
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    /// Create a new ReportStore rooted at a data directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.montecarlo/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".montecarlo")
    }

    /// Get the path to the reports directory
    fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    fn report_path(&self, id: Uuid) -> PathBuf {
        self.reports_dir().join(format!("{id}.yaml"))
    }

    /// Check if the data directory has been initialized
    pub fn exists(&self) -> bool {
        self.reports_dir().exists()
    }

    /// Initialize the data directory structure
    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.reports_dir())
            .map_err(|e| StorageError::Io(format!("Failed to create reports directory: {}", e)))
    }

    /// Save (create or overwrite) a report
    pub fn save(&self, report: &Report) -> Result<(), StorageError> {
        if !self.exists() {
            self.init()?;
        }

        let yaml = serde_saphyr::to_string(report)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize report: {}", e)))?;

        atomic_write(&self.report_path(report.id), &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write report: {}", e)))
    }

    fn load_from_path(&self, path: &Path) -> Result<Report, StorageError> {
        let content = fs::read_to_string(path)
            .map_err(|e| StorageError::Io(format!("Failed to read report: {}", e)))?;

        serde_saphyr::from_str(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse report: {}", e)))
    }

    /// Load every report, active or deleted. Unreadable files are skipped.
    pub fn load_all(&self) -> Result<Vec<Report>, StorageError> {
        let reports_dir = self.reports_dir();
        if !reports_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&reports_dir)
            .map_err(|e| StorageError::Io(format!("Failed to read reports directory: {}", e)))?;

        let mut reports = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "yaml") {
                continue;
            }
            match self.load_from_path(&path) {
                Ok(report) => reports.push(report),
                Err(e) => tracing::warn!(path = %path.display(), "Skipping report: {e}"),
            }
        }
        Ok(reports)
    }

    /// Active reports matching `filter`, newest first
    pub fn list(&self, filter: &ReportFilter) -> Result<Vec<Report>, StorageError> {
        let mut reports: Vec<Report> = self
            .load_all()?
            .into_iter()
            .filter(|r| !r.is_deleted() && filter.matches(r))
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    /// Deleted reports, most recently deleted first
    pub fn trash(&self) -> Result<Vec<Report>, StorageError> {
        let mut reports: Vec<Report> = self
            .load_all()?
            .into_iter()
            .filter(Report::is_deleted)
            .collect();
        reports.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        Ok(reports)
    }

    /// Find a report by full id or by a unique id prefix
    pub fn find(&self, id: &str) -> Result<Report, StorageError> {
        if let Ok(uuid) = Uuid::parse_str(id) {
            let path = self.report_path(uuid);
            if !path.exists() {
                return Err(StorageError::NotFound(id.to_string()));
            }
            return self.load_from_path(&path);
        }

        let prefix = id.to_lowercase();
        if prefix.is_empty() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        let mut matches = self
            .load_all()?
            .into_iter()
            .filter(|r| r.id.to_string().starts_with(&prefix));

        match (matches.next(), matches.next()) {
            (Some(report), None) => Ok(report),
            (None, _) => Err(StorageError::NotFound(id.to_string())),
            (Some(_), Some(_)) => Err(StorageError::Ambiguous(id.to_string())),
        }
    }

    /// Move a report to the trash
    pub fn soft_delete(&self, id: &str, now: Timestamp) -> Result<Report, StorageError> {
        let mut report = self.find(id)?;
        report.soft_delete(now);
        self.save(&report)?;
        Ok(report)
    }

    /// Restore a report from the trash
    pub fn recover(&self, id: &str) -> Result<Report, StorageError> {
        let mut report = self.find(id)?;
        report.recover();
        self.save(&report)?;
        Ok(report)
    }

    /// Permanently remove reports that have been in the trash longer than
    /// `retention`. Returns the removed reports.
    pub fn purge(
        &self,
        now: Timestamp,
        retention: SignedDuration,
    ) -> Result<Vec<Report>, StorageError> {
        let expired: Vec<Report> = self
            .load_all()?
            .into_iter()
            .filter(|r| r.is_expired(now, retention))
            .collect();

        for report in &expired {
            fs::remove_file(self.report_path(report.id))
                .map_err(|e| StorageError::Io(format!("Failed to delete report: {}", e)))?;
        }
        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_report;
    use tempfile::TempDir;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn store() -> (TempDir, ReportStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ReportStore::new(temp_dir.path().join(".montecarlo"));
        (temp_dir, store)
    }

    #[test]
    fn test_store_init() {
        let (_temp_dir, store) = store();

        assert!(!store.exists());
        store.init().unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_save_and_find_report() {
        let (_temp_dir, store) = store();
        let report = sample_report("Bridge", ts("2025-03-01T10:00:00Z"));

        store.save(&report).unwrap();

        let loaded = store.find(&report.id.to_string()).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.name, report.name);
        assert_eq!(loaded.created_at, report.created_at);
        assert_eq!(loaded.seed, Some(7));
        assert_eq!(
            loaded.output.summary.sample_count,
            report.output.summary.sample_count
        );
        assert!((loaded.output.summary.mean - report.output.summary.mean).abs() < 1e-9);
        assert_eq!(loaded.output.samples_preview.len(), 100);

        // unique prefix
        let prefix = &report.id.to_string()[..8];
        assert_eq!(store.find(prefix).unwrap().id, report.id);
    }

    #[test]
    fn test_find_missing() {
        let (_temp_dir, store) = store();
        assert!(matches!(
            store.find(&Uuid::new_v4().to_string()),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(store.find("abc"), Err(StorageError::NotFound(_))));
        assert!(matches!(store.find(""), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list_newest_first_and_filtered() {
        let (_temp_dir, store) = store();
        let old = sample_report("Harbor Bridge", ts("2025-03-01T10:00:00Z"));
        let new = sample_report("Harbor Bridge", ts("2025-03-05T10:00:00Z"));
        let other = sample_report("Tunnel", ts("2025-03-03T10:00:00Z"));
        for r in [&old, &new, &other] {
            store.save(r).unwrap();
        }

        let all = store.list(&ReportFilter::default()).unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![new.id, other.id, old.id]);

        let bridges = store
            .list(&ReportFilter {
                project: Some("BRIDGE".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(bridges.len(), 2);

        let on_date = store
            .list(&ReportFilter {
                date: Some(jiff::civil::date(2025, 3, 3)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(on_date.len(), 1);
        assert_eq!(on_date[0].id, other.id);
    }

    #[test]
    fn test_soft_delete_and_recover() {
        let (_temp_dir, store) = store();
        let report = sample_report("Bridge", ts("2025-03-01T10:00:00Z"));
        store.save(&report).unwrap();
        let id = report.id.to_string();

        store.soft_delete(&id, ts("2025-03-02T10:00:00Z")).unwrap();
        assert!(store.list(&ReportFilter::default()).unwrap().is_empty());
        assert_eq!(store.trash().unwrap().len(), 1);

        store.recover(&id).unwrap();
        assert_eq!(store.list(&ReportFilter::default()).unwrap().len(), 1);
        assert!(store.trash().unwrap().is_empty());
    }

    #[test]
    fn test_purge_respects_retention() {
        let (_temp_dir, store) = store();
        let retention = SignedDuration::from_hours(24);

        let active = sample_report("A", ts("2025-03-01T10:00:00Z"));
        let recent = sample_report("B", ts("2025-03-01T10:00:00Z"));
        let stale = sample_report("C", ts("2025-03-01T10:00:00Z"));
        for r in [&active, &recent, &stale] {
            store.save(r).unwrap();
        }
        store
            .soft_delete(&recent.id.to_string(), ts("2025-03-04T09:00:00Z"))
            .unwrap();
        store
            .soft_delete(&stale.id.to_string(), ts("2025-03-02T10:00:00Z"))
            .unwrap();

        let purged = store.purge(ts("2025-03-04T10:00:00Z"), retention).unwrap();
        assert_eq!(purged.len(), 1);
        assert_eq!(purged[0].id, stale.id);

        assert!(store.find(&stale.id.to_string()).is_err());
        assert!(store.find(&recent.id.to_string()).is_ok());
        assert!(store.find(&active.id.to_string()).is_ok());
    }

    #[test]
    fn test_corrupt_file_is_skipped() {
        let (temp_dir, store) = store();
        store.init().unwrap();
        let junk = temp_dir.path().join(".montecarlo/reports/junk.yaml");
        fs::write(junk, "[not a report").unwrap();

        let report = sample_report("Bridge", ts("2025-03-01T10:00:00Z"));
        store.save(&report).unwrap();

        assert_eq!(store.load_all().unwrap().len(), 1);
    }
}

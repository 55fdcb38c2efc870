//! Directory scans that reload stored milestones and issues.
//!
//! A document that fails to parse is skipped with a warning; the scan carries
//! on over the rest.

use std::fs;
use std::path::{Path, PathBuf};

use local_store::layout::DOCUMENT_EXTENSION;
use local_store::{read_document, StorageLayout};
use planning::{Issue, Milestone, PlanningError};
use serde::de::DeserializeOwned;
use tracing::warn;

/// A document that could not be loaded during a scan.
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub error: PlanningError,
}

/// Records loaded by a scan plus the documents that were skipped.
#[derive(Debug)]
pub struct Scan<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedDocument>,
}

/// Loads every issue document under the issues directory.
///
/// # Errors
///
/// Returns [`PlanningError::Io`] if the directory itself cannot be listed.
pub fn list_issues(layout: &StorageLayout) -> Result<Scan<Issue>, PlanningError> {
    scan_dir(&layout.issues_dir())
}

/// Loads every milestone document under the milestones directory.
///
/// # Errors
///
/// Returns [`PlanningError::Io`] if the directory itself cannot be listed.
pub fn list_milestones(layout: &StorageLayout) -> Result<Scan<Milestone>, PlanningError> {
    scan_dir(&layout.milestones_dir())
}

// Entries are visited in file-name order so a snapshot always scans the same way.
fn scan_dir<T: DeserializeOwned>(dir: &Path) -> Result<Scan<T>, PlanningError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| PlanningError::io(dir, e))? {
        let path = entry.map_err(|e| PlanningError::io(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut scan = Scan {
        records: Vec::with_capacity(paths.len()),
        skipped: Vec::new(),
    };
    for path in paths {
        match read_document(&path) {
            Ok(record) => scan.records.push(record),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Skipping unreadable document");
                scan.skipped.push(SkippedDocument { path, error });
            }
        }
    }
    Ok(scan)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use local_store::write_document;
    use planning::{MilestoneNumber, RepositoryId};
    use pretty_assertions::assert_eq;

    use super::*;

    fn setup() -> (tempfile::TempDir, StorageLayout) {
        let tmp = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(tmp.path());
        layout.initialize().unwrap();
        (tmp, layout)
    }

    fn milestone(number: u64, title: &str) -> Milestone {
        Milestone::for_sprint(
            &RepositoryId::new("acme/widgets").unwrap(),
            MilestoneNumber::new(number),
            title,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn persisted_milestones_round_trip_through_the_scan() {
        let (_tmp, layout) = setup();
        let written = vec![milestone(1, "Sprint 1"), milestone(2, "Sprint 2")];
        for m in &written {
            write_document(&layout.milestone_path(&m.title), m).unwrap();
        }

        let scan = list_milestones(&layout).unwrap();

        assert_eq!(scan.records, written);
        assert!(scan.skipped.is_empty());
    }

    #[test]
    fn corrupt_documents_are_skipped_and_others_still_load() {
        let (_tmp, layout) = setup();
        let good = milestone(1, "Sprint 1");
        write_document(&layout.milestone_path(&good.title), &good).unwrap();
        let corrupt = layout.milestones_dir().join("Broken.json");
        fs::write(&corrupt, "{ \"number\": ").unwrap();
        fs::write(layout.milestones_dir().join("notes.txt"), "ignored").unwrap();

        let scan = list_milestones(&layout).unwrap();

        assert_eq!(scan.records, vec![good]);
        assert_eq!(scan.skipped.len(), 1);
        assert_eq!(scan.skipped[0].path, corrupt);
        assert!(matches!(scan.skipped[0].error, PlanningError::DataFormat { .. }));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = StorageLayout::new(tmp.path().join("absent"));

        let err = list_issues(&layout).unwrap_err();

        assert!(matches!(err, PlanningError::Io { .. }));
    }
}

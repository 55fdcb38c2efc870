//! On-disk layout of the local planning store and the JSON document helpers
//! shared by every store module.
//!
//! ```text
//! <root>/
//!   milestones/<title_with_underscores>.json
//!   issues/issue_<number>.json
//!   milestone_index.json
//!   issue_index.json
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use planning::{DataFormatCause, IssueNumber, PlanningError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// Storage root used when none is configured.
pub const DEFAULT_ROOT: &str = "local_github_simulation";

/// Extension of every stored document.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Paths of a storage root and its subdirectories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn milestones_dir(&self) -> PathBuf {
        self.root.join("milestones")
    }

    pub fn issues_dir(&self) -> PathBuf {
        self.root.join("issues")
    }

    pub fn milestone_index_path(&self) -> PathBuf {
        self.root.join("milestone_index.json")
    }

    pub fn issue_index_path(&self) -> PathBuf {
        self.root.join("issue_index.json")
    }

    /// Document path for the milestone titled `title`.
    ///
    /// Spaces become underscores. Path separators are replaced as well so a
    /// title can never escape the milestones directory.
    pub fn milestone_path(&self, title: &str) -> PathBuf {
        let stem: String = title
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' => '_',
                other => other,
            })
            .collect();
        self.milestones_dir()
            .join(format!("{stem}.{DOCUMENT_EXTENSION}"))
    }

    /// Document path for issue `number`.
    pub fn issue_path(&self, number: IssueNumber) -> PathBuf {
        self.issues_dir()
            .join(format!("issue_{number}.{DOCUMENT_EXTENSION}"))
    }

    /// Returns `true` if the storage root exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Creates the root, milestones, and issues directories if missing.
    ///
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Io`] wrapping the filesystem error unchanged.
    pub fn initialize(&self) -> Result<(), PlanningError> {
        for dir in [self.root.clone(), self.milestones_dir(), self.issues_dir()] {
            if dir.is_dir() {
                continue;
            }
            fs::create_dir_all(&dir).map_err(|e| PlanningError::io(&dir, e))?;
            info!(directory = %dir.display(), "Created directory");
        }
        Ok(())
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

/// Writes `value` as pretty-printed JSON (2-space indent), replacing any
/// existing file.
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), PlanningError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| PlanningError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');
    fs::write(path, json).map_err(|e| PlanningError::io(path, e))?;
    debug!(path = %path.display(), "Wrote document");
    Ok(())
}

/// Reads and parses a JSON document.
///
/// # Errors
///
/// Returns [`PlanningError::DataFormat`] if the file is missing, unreadable,
/// or not the expected JSON shape.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, PlanningError> {
    let data_format = |source: DataFormatCause| PlanningError::DataFormat {
        path: path.to_path_buf(),
        source,
    };
    let raw = fs::read_to_string(path).map_err(|e| data_format(e.into()))?;
    serde_json::from_str(&raw).map_err(|e| data_format(e.into()))
}

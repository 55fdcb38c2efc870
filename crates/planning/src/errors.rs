//! Error types for the sprint planning domain.
//!
//! [`PlanningError`] covers conditions that abort a planning run or a report.
//! [`StoryRejection`] covers the per-story validation failures that the
//! driver logs and skips; it never aborts a run.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Run-level errors
// ---------------------------------------------------------------------------

/// Errors that abort a planning run or a report.
///
/// Records already written before the error remain on disk; nothing is rolled
/// back.
#[derive(Debug, Error)]
pub enum PlanningError {
    /// A filesystem operation failed.
    ///
    /// The underlying [`std::io::Error`] is kept unchanged as the source.
    #[error("I/O failure at '{}'", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// The original I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be encoded as JSON.
    #[error("Could not encode JSON document '{}'", path.display())]
    Encode {
        /// Path the document was going to be written to.
        path: PathBuf,
        /// The serialiser error.
        #[source]
        source: serde_json::Error,
    },

    /// An input or stored document is absent or not parseable.
    #[error("Error loading JSON file '{}'", path.display())]
    DataFormat {
        /// Path of the offending document.
        path: PathBuf,
        /// Why the document could not be used.
        #[source]
        source: DataFormatCause,
    },

    /// The planner configuration is invalid.
    ///
    /// Produced at load time; a run never starts with an invalid config.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The storage root does not exist, so there is nothing to report on.
    #[error("Storage root '{}' not found; run sprint-planner first", path.display())]
    MissingStorage {
        /// The storage root that was expected.
        path: PathBuf,
    },
}

impl PlanningError {
    /// Builds a [`PlanningError::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a [`PlanningError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// The underlying reason a document failed to load.
#[derive(Debug, Error)]
pub enum DataFormatCause {
    /// The document is missing or could not be read.
    #[error("file could not be read")]
    Unreadable(#[from] std::io::Error),

    /// The document is not valid JSON of the expected shape.
    #[error("malformed JSON")]
    Malformed(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Per-story validation
// ---------------------------------------------------------------------------

/// Why a story was skipped instead of becoming an issue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoryRejection {
    /// The story has no (or an empty) title.
    #[error("missing title")]
    MissingTitle,

    /// The story has no sprint number.
    #[error("missing sprint number")]
    MissingSprint,

    /// A field holds a JSON value of the wrong type, e.g. `"sprint": "1"`.
    #[error("field '{field}' has the wrong type")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The sprint number does not match any milestone created in this run.
    #[error("invalid sprint number {sprint}")]
    UnknownSprint {
        /// The sprint number the story asked for.
        sprint: i64,
    },
}

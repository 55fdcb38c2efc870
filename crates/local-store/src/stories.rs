//! Story loader: reads a JSON array of story requests from a file.

use std::path::PathBuf;

use planning::{PlanningError, Story, StorySource};
use tracing::info;

use crate::layout::read_document;

/// A story document on disk.
#[derive(Debug, Clone)]
pub struct StoryFile {
    path: PathBuf,
}

impl StoryFile {
    /// Story source reading the JSON array at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorySource for StoryFile {
    /// Parses the document; no per-story validation happens here.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::DataFormat`] if the file is absent, unreadable,
    /// or not an array of story objects. A wrongly typed field inside a story
    /// object is not an error here; it is recorded on that [`Story`].
    fn load_stories(&self) -> Result<Vec<Story>, PlanningError> {
        let stories: Vec<Story> = read_document(&self.path)?;
        info!(path = %self.path.display(), count = stories.len(), "Loaded stories");
        Ok(stories)
    }
}

//! Filesystem adapter for the sprint planner.
//!
//! Implements the [`planning::PlanningStore`] and [`planning::StorySource`]
//! traits against a directory of pretty-printed JSON documents.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. File naming,
//! directory layout, and JSON encoding live here; the [`planning`] crate never
//! sees them.
//!
//! ## Concurrency
//!
//! Single writer only. Two planners running against the same root race on
//! milestone titles and issue numbers; no locking is attempted.

pub mod issues;
pub mod layout;
pub mod milestones;
pub mod stories;

use chrono::{Local, NaiveDate};
use planning::{
    Clock, Issue, IssueIndex, MilestoneIndex, MilestonePlan, NewIssue, PlanningError,
    PlanningStore, RepositoryId, SystemClock,
};

pub use layout::{read_document, write_document, StorageLayout, DEFAULT_ROOT};
pub use stories::StoryFile;

/// [`PlanningStore`] backed by a [`StorageLayout`].
#[derive(Debug, Clone)]
pub struct LocalStore<C = SystemClock> {
    layout: StorageLayout,
    clock: C,
}

impl LocalStore<SystemClock> {
    /// Store using the real wall clock.
    pub fn new(layout: StorageLayout) -> Self {
        Self::with_clock(layout, SystemClock)
    }
}

impl<C: Clock> LocalStore<C> {
    /// Store reading time from `clock`; used to pin issue numbers in tests.
    pub fn with_clock(layout: StorageLayout, clock: C) -> Self {
        Self { layout, clock }
    }

    /// The directory tree this store writes to.
    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }
}

impl<C: Clock> PlanningStore for LocalStore<C> {
    fn initialize(&self) -> Result<(), PlanningError> {
        self.layout.initialize()
    }

    fn create_milestones(
        &self,
        repository: &RepositoryId,
        sprint_names: &[String],
        start_date: Option<NaiveDate>,
    ) -> Result<MilestonePlan, PlanningError> {
        let start_date = start_date
            .unwrap_or_else(|| self.clock.now().with_timezone(&Local).date_naive());
        milestones::create_milestones(&self.layout, repository, sprint_names, start_date)
    }

    fn create_issue(&self, request: NewIssue<'_>) -> Result<Issue, PlanningError> {
        issues::create_issue(&self.layout, request, self.clock.now())
    }

    fn write_milestone_index(&self, index: &MilestoneIndex) -> Result<(), PlanningError> {
        write_document(&self.layout.milestone_index_path(), index)
    }

    fn write_issue_index(&self, index: &IssueIndex) -> Result<(), PlanningError> {
        write_document(&self.layout.issue_index_path(), index)
    }
}

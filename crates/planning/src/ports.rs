//! Port traits implemented by infrastructure crates.
//!
//! The driver only sees these traits; `local-store` supplies the filesystem
//! implementations and tests supply in-memory ones.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    Issue, IssueIndex, MilestoneIndex, MilestonePlan, NewIssue, PlanningError, RepositoryId, Story,
};

/// Source of the current time.
///
/// Issue numbers and default start dates are derived from the clock, so tests
/// inject a fixed one.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Persistent storage for milestones, issues, and the run-level indexes.
pub trait PlanningStore {
    /// Ensures the storage layout exists. Safe to call on every run.
    fn initialize(&self) -> Result<(), PlanningError>;

    /// Creates one milestone per sprint name, numbered from 1 in list order.
    ///
    /// `start_date` defaults to today. Every call produces fresh numbers
    /// starting at 1; there is no check against previously stored milestones.
    fn create_milestones(
        &self,
        repository: &RepositoryId,
        sprint_names: &[String],
        start_date: Option<NaiveDate>,
    ) -> Result<MilestonePlan, PlanningError>;

    /// Creates and persists a single issue.
    fn create_issue(&self, request: NewIssue<'_>) -> Result<Issue, PlanningError>;

    /// Writes the milestone index for the current run.
    fn write_milestone_index(&self, index: &MilestoneIndex) -> Result<(), PlanningError>;

    /// Writes the issue summary index for the current run.
    fn write_issue_index(&self, index: &IssueIndex) -> Result<(), PlanningError>;
}

/// A batch of stories to plan.
pub trait StorySource {
    /// Loads every story in input order.
    fn load_stories(&self) -> Result<Vec<Story>, PlanningError>;
}

//! The planning driver: one end-to-end planning run.
//!
//! Sequence: initialise storage, create the sprint milestones, write the
//! milestone index, load stories, create one issue per valid story, write the
//! issue index. Any error aborts the run; records already written stay on
//! disk.

use tracing::{info, info_span, warn};

use crate::{
    IssueIndex, MilestoneIndex, MilestonePlan, PlanningConfig, PlanningError, PlanningRunId,
    PlanningStore, RepositoryId, StoryRejection, StorySource, SummaryRow,
};

/// A story that was skipped, with its 0-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStory {
    pub position: usize,
    pub title: Option<String>,
    pub reason: StoryRejection,
}

/// Result of a completed planning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningOutcome {
    pub run_id: PlanningRunId,
    pub repository: RepositoryId,
    pub milestones: MilestonePlan,
    pub rows: Vec<SummaryRow>,
    pub skipped: Vec<SkippedStory>,
}

/// Drives planning runs against a [`PlanningStore`].
pub struct PlanningDriver<'s, S: PlanningStore> {
    store: &'s S,
    config: PlanningConfig,
}

impl<'s, S: PlanningStore> PlanningDriver<'s, S> {
    /// Creates a driver that writes through `store` using the sprint plan in
    /// `config`.
    pub fn new(store: &'s S, config: PlanningConfig) -> Self {
        Self { store, config }
    }

    /// Performs one planning run for `repository`.
    ///
    /// # Errors
    ///
    /// Returns the first [`PlanningError`] raised by the store or the story
    /// source. Invalid stories are not errors; they are reported in
    /// [`PlanningOutcome::skipped`].
    pub fn run(
        &self,
        repository: &RepositoryId,
        stories: &impl StorySource,
    ) -> Result<PlanningOutcome, PlanningError> {
        let run_id = PlanningRunId::new_random();
        let span = info_span!("planning_run", %run_id, %repository);
        let _guard = span.enter();

        self.store.initialize()?;
        info!("Running local simulation for repository {repository}");

        let milestones = self.store.create_milestones(
            repository,
            &self.config.sprint_names,
            self.config.start_date,
        )?;
        self.store.write_milestone_index(&MilestoneIndex {
            repository: repository.clone(),
            milestones: milestones.clone(),
        })?;

        let stories = stories.load_stories()?;

        let mut rows = Vec::new();
        let mut skipped = Vec::new();
        for (position, story) in stories.iter().enumerate() {
            let planned = match story.validate(&milestones) {
                Ok(planned) => planned,
                Err(reason) => {
                    warn!(
                        position,
                        title = story.title.as_deref().unwrap_or_default(),
                        %reason,
                        "Skipping story"
                    );
                    skipped.push(SkippedStory {
                        position,
                        title: story.title.clone(),
                        reason,
                    });
                    continue;
                }
            };

            let issue = self.store.create_issue(planned.to_new_issue(repository))?;
            info!(number = %issue.number, title = %issue.title, "Created issue");
            rows.push(SummaryRow::for_issue(&issue, planned.milestone.number));
        }

        self.store.write_issue_index(&IssueIndex {
            repository: repository.clone(),
            issues: rows.clone(),
        })?;

        info!(
            created = rows.len(),
            skipped = skipped.len(),
            "Planning run complete"
        );
        Ok(PlanningOutcome {
            run_id,
            repository: repository.clone(),
            milestones,
            rows,
            skipped,
        })
    }
}

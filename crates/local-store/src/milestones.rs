//! Milestone store: one JSON document per sprint milestone.

use chrono::NaiveDate;
use planning::{Milestone, MilestoneNumber, MilestonePlan, PlanningError, RepositoryId};
use tracing::info;

use crate::layout::{write_document, StorageLayout};

/// Creates and persists one milestone per sprint name.
///
/// Numbers start at 1 on every call, whatever is already on disk. A milestone
/// whose title matches an existing document overwrites it.
///
/// # Errors
///
/// Returns [`PlanningError::Configuration`] if a due date overflows the
/// calendar, or the write error of the first document that fails.
pub fn create_milestones(
    layout: &StorageLayout,
    repository: &RepositoryId,
    sprint_names: &[String],
    start_date: NaiveDate,
) -> Result<MilestonePlan, PlanningError> {
    let mut plan = MilestonePlan::new();
    for (i, name) in sprint_names.iter().enumerate() {
        let number = MilestoneNumber::new(i as u64 + 1);
        let milestone = Milestone::for_sprint(repository, number, name, start_date)
            .ok_or_else(|| {
                PlanningError::configuration(format!(
                    "due date of '{name}' is out of range for start date {start_date}"
                ))
            })?;

        write_document(&layout.milestone_path(name), &milestone)?;
        info!(
            %number,
            title = %milestone.title,
            due_on = %milestone.due_on,
            "Created milestone"
        );
        plan.insert(number, milestone);
    }
    Ok(plan)
}

//! Issue store: one JSON document per issue, named by its number.

use chrono::{DateTime, Local, Utc};
use planning::{Issue, IssueNumber, NewIssue, PlanningError};
use tracing::{debug, warn};

use crate::layout::{write_document, StorageLayout};

/// Creates and persists an issue at time `now`.
///
/// The number is `unix seconds mod 100000`. This is not collision safe: an
/// issue created in the same second as another (or exactly 100000 seconds
/// later) gets the same number and silently replaces the earlier document.
/// The title is not validated here.
pub fn create_issue(
    layout: &StorageLayout,
    request: NewIssue<'_>,
    now: DateTime<Utc>,
) -> Result<Issue, PlanningError> {
    let number = IssueNumber::from_unix_seconds(now.timestamp());
    let issue = Issue {
        number,
        title: request.title.to_string(),
        body: request.description.to_string(),
        milestone: Some(request.milestone.clone()),
        assignee: request.assignee.map(str::to_string),
        labels: request.labels.to_vec(),
        repository: request.repository.clone(),
        created_at: now.with_timezone(&Local).naive_local(),
    };

    let path = layout.issue_path(number);
    if path.exists() {
        warn!(%number, path = %path.display(), "Issue number collision; overwriting");
    }
    write_document(&path, &issue)?;
    debug!(%number, title = %issue.title, "Persisted issue");
    Ok(issue)
}

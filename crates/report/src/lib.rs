//! Sprint planning report.
//!
//! Rebuilds views over the local store without trusting it to be consistent:
//! corrupt documents are skipped and issues whose milestone no longer exists
//! are still shown, under a placeholder title.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`scan`] | `list_issues`, `list_milestones` |
//! | [`grouping`] | `group_by_milestone`, `group_by_assignee` |
//! | [`render`] | `comfy-table` rendering of every view |

pub mod grouping;
pub mod render;
pub mod scan;

use local_store::StorageLayout;
use planning::PlanningError;

pub use grouping::{group_by_assignee, group_by_milestone, AssigneeGroup, MilestoneGroup};
pub use render::{render_by_assignee, render_by_milestone, render_milestones, render_summary};
pub use scan::{list_issues, list_milestones, Scan, SkippedDocument};

/// Scans the store at `layout` and renders the full report: milestones,
/// issues by milestone, issues by assignee.
///
/// # Errors
///
/// Returns [`PlanningError::MissingStorage`] if the storage root does not
/// exist, or [`PlanningError::Io`] if a store directory cannot be listed.
pub fn build_report(layout: &StorageLayout) -> Result<String, PlanningError> {
    if !layout.exists() {
        return Err(PlanningError::MissingStorage {
            path: layout.root().to_path_buf(),
        });
    }

    let issues = list_issues(layout)?.records;
    let milestones = list_milestones(layout)?.records;

    Ok([
        render_milestones(&milestones),
        render_by_milestone(&group_by_milestone(&issues, &milestones)),
        render_by_assignee(&group_by_assignee(&issues)),
    ]
    .join("\n\n"))
}

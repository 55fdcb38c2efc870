//! Text tables for the planner summary and the report views.

use comfy_table::{presets, Table};
use planning::{Issue, Milestone, SummaryRow};

use crate::grouping::{AssigneeGroup, MilestoneGroup, NO_MILESTONE};

fn table(preset: &str, header: [&str; 4]) -> Table {
    let mut table = Table::new();
    table.load_preset(preset).set_header(header);
    table
}

fn labels(issue: &Issue) -> String {
    issue.labels.join(", ")
}

/// Renders the rows created by a planning run.
pub fn render_summary(rows: &[SummaryRow]) -> String {
    let mut t = table(presets::ASCII_FULL, ["Issue #", "Title", "Assignee", "Sprint"]);
    for row in rows {
        t.add_row(vec![
            row.number.to_string(),
            row.title.clone(),
            row.assignee.clone(),
            row.sprint.clone(),
        ]);
    }
    format!("Sprint Planning Summary:\n{t}")
}

/// Renders every stored milestone.
pub fn render_milestones(milestones: &[Milestone]) -> String {
    if milestones.is_empty() {
        return "No milestones found.".to_string();
    }
    let mut t = table(presets::ASCII_FULL, ["Number", "Title", "Description", "Due Date"]);
    for m in milestones {
        t.add_row(vec![
            m.number.to_string(),
            m.title.clone(),
            m.description.clone(),
            m.due_on.to_string(),
        ]);
    }
    format!("=== MILESTONES ===\n{t}")
}

/// Renders one table per milestone group.
pub fn render_by_milestone(groups: &[MilestoneGroup<'_>]) -> String {
    if groups.is_empty() {
        return "No issues found.".to_string();
    }
    let sections: Vec<String> = groups
        .iter()
        .map(|group| {
            let mut t = table(presets::ASCII_FULL, ["Issue #", "Title", "Assignee", "Labels"]);
            for issue in &group.issues {
                t.add_row(vec![
                    issue.number.to_string(),
                    issue.title.clone(),
                    issue.assignee_or_unassigned().to_string(),
                    labels(issue),
                ]);
            }
            format!("=== {} ===\n{t}", group.title)
        })
        .collect();
    sections.join("\n\n")
}

/// Renders one borderless table per assignee.
pub fn render_by_assignee(groups: &[AssigneeGroup<'_>]) -> String {
    if groups.is_empty() {
        return "No issues found.".to_string();
    }
    let mut out = String::from("=== ISSUES BY ASSIGNEE ===");
    for group in groups {
        let mut t = table(presets::ASCII_NO_BORDERS, ["Issue #", "Title", "Sprint", "Labels"]);
        for issue in &group.issues {
            let sprint = issue
                .milestone
                .as_ref()
                .map_or(NO_MILESTONE, |m| m.title.as_str());
            t.add_row(vec![
                issue.number.to_string(),
                issue.title.clone(),
                sprint.to_string(),
                labels(issue),
            ]);
        }
        out.push_str(&format!("\n\nAssignee: {}\n{t}", group.assignee));
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use planning::{IssueNumber, MilestoneNumber, RepositoryId};

    use super::*;
    use crate::grouping::{group_by_assignee, group_by_milestone};

    fn repo() -> RepositoryId {
        RepositoryId::new("acme/widgets").unwrap()
    }

    fn sprint_one() -> Milestone {
        Milestone::for_sprint(
            &repo(),
            MilestoneNumber::new(1),
            "Sprint 1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
    }

    fn issue(number: u64, assignee: Option<&str>, milestone: Option<Milestone>) -> Issue {
        Issue {
            number: IssueNumber::new(number),
            title: format!("Issue {number}"),
            body: String::new(),
            milestone,
            assignee: assignee.map(str::to_string),
            labels: vec!["auth".into(), "backend".into()],
            repository: repo(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn summary_lists_every_row() {
        let rows = vec![SummaryRow {
            number: IssueNumber::new(4242),
            title: "Add login".into(),
            assignee: "alice".into(),
            sprint: "Sprint 1".into(),
        }];

        let text = render_summary(&rows);

        assert!(text.starts_with("Sprint Planning Summary:"));
        for needle in ["Issue #", "4242", "Add login", "alice", "Sprint 1"] {
            assert!(text.contains(needle), "missing {needle:?} in\n{text}");
        }
    }

    #[test]
    fn empty_inputs_render_placeholders() {
        assert_eq!(render_milestones(&[]), "No milestones found.");
        assert_eq!(render_by_milestone(&[]), "No issues found.");
        assert_eq!(render_by_assignee(&[]), "No issues found.");
    }

    #[test]
    fn milestone_table_shows_due_dates() {
        let text = render_milestones(&[sprint_one()]);

        assert!(text.starts_with("=== MILESTONES ==="));
        assert!(text.contains("Sprint 1 tasks"));
        assert!(text.contains("2024-01-08"));
    }

    #[test]
    fn milestone_sections_are_headed_by_group_title() {
        let issues = vec![
            issue(1, Some("alice"), Some(sprint_one())),
            issue(2, None, Some(Milestone {
                number: MilestoneNumber::new(9),
                ..sprint_one()
            })),
        ];
        let groups = group_by_milestone(&issues, &[sprint_one()]);

        let text = render_by_milestone(&groups);

        assert!(text.contains("=== Sprint 1 ==="));
        assert!(text.contains("=== Milestone 9 ==="));
        assert!(text.contains("auth, backend"));
        assert!(text.contains("Unassigned"));
    }

    #[test]
    fn assignee_sections_show_milestone_titles() {
        let issues = vec![
            issue(1, Some("bob"), Some(sprint_one())),
            issue(2, None, None),
        ];
        let groups = group_by_assignee(&issues);

        let text = render_by_assignee(&groups);

        assert!(text.starts_with("=== ISSUES BY ASSIGNEE ==="));
        assert!(text.contains("Assignee: bob"));
        assert!(text.contains("Assignee: Unassigned"));
        assert!(text.contains("Sprint 1"));
        assert!(text.contains(NO_MILESTONE));
    }
}

//! Regroups scanned issues by milestone and by assignee.
//!
//! Groups appear in the order their first issue was seen, and issues keep
//! their input order inside a group.

use std::collections::HashMap;
use std::hash::Hash;

use planning::{Issue, Milestone, MilestoneNumber};

/// Title of the group holding issues without an embedded milestone.
pub const NO_MILESTONE: &str = "No Milestone";

/// Issues sharing one embedded milestone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneGroup<'a> {
    pub number: Option<MilestoneNumber>,
    /// Title from the milestone store, or a placeholder for dangling numbers.
    pub title: String,
    pub issues: Vec<&'a Issue>,
}

/// Issues sharing one assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssigneeGroup<'a> {
    /// Assignee login, or `"Unassigned"`.
    pub assignee: String,
    pub issues: Vec<&'a Issue>,
}

/// Groups issues by the milestone number embedded in each issue.
///
/// Titles come from `milestones`; when several stored milestones share a
/// number the last one wins. A number with no stored milestone is titled
/// `"Milestone {n}"` instead of failing.
pub fn group_by_milestone<'a>(issues: &'a [Issue], milestones: &[Milestone]) -> Vec<MilestoneGroup<'a>> {
    let lookup: HashMap<MilestoneNumber, &Milestone> =
        milestones.iter().map(|m| (m.number, m)).collect();

    group_in_order(issues, Issue::milestone_number)
        .into_iter()
        .map(|(number, issues)| {
            let title = match number {
                Some(n) => lookup
                    .get(&n)
                    .map(|m| m.title.clone())
                    .unwrap_or_else(|| format!("Milestone {n}")),
                None => NO_MILESTONE.to_string(),
            };
            MilestoneGroup {
                number,
                title,
                issues,
            }
        })
        .collect()
}

/// Groups issues by assignee; missing or empty assignees share the
/// `"Unassigned"` bucket.
pub fn group_by_assignee(issues: &[Issue]) -> Vec<AssigneeGroup<'_>> {
    group_in_order(issues, |issue| issue.assignee_or_unassigned().to_string())
        .into_iter()
        .map(|(assignee, issues)| AssigneeGroup { assignee, issues })
        .collect()
}

fn group_in_order<'a, K, F>(issues: &'a [Issue], key_of: F) -> Vec<(K, Vec<&'a Issue>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&'a Issue) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a Issue>)> = Vec::new();
    for issue in issues {
        let key = key_of(issue);
        let slot = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(issue);
    }
    groups
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use planning::{IssueNumber, RepositoryId, UNASSIGNED};
    use pretty_assertions::assert_eq;

    use super::*;

    fn repo() -> RepositoryId {
        RepositoryId::new("acme/widgets").unwrap()
    }

    fn milestone(number: u64, title: &str) -> Milestone {
        Milestone::for_sprint(
            &repo(),
            MilestoneNumber::new(number),
            title,
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
            labels: Vec::new(),
            repository: repo(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    fn numbers(issues: &[&Issue]) -> Vec<u64> {
        issues.iter().map(|i| i.number.as_u64()).collect()
    }

    #[test]
    fn issues_without_assignee_share_the_unassigned_bucket() {
        let issues = vec![issue(1, None, None), issue(2, Some(""), None)];

        let groups = group_by_assignee(&issues);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].assignee, UNASSIGNED);
        assert_eq!(numbers(&groups[0].issues), vec![1, 2]);
    }

    #[test]
    fn one_assigned_and_one_unassigned_issue_make_two_buckets() {
        let issues = vec![issue(1, Some("bob"), None), issue(2, None, None)];

        let groups = group_by_assignee(&issues);

        let names: Vec<_> = groups.iter().map(|g| g.assignee.as_str()).collect();
        assert_eq!(names, vec!["bob", UNASSIGNED]);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let issues = vec![
            issue(1, Some("carol"), None),
            issue(2, Some("alice"), None),
            issue(3, Some("carol"), None),
        ];

        let groups = group_by_assignee(&issues);

        assert_eq!(groups[0].assignee, "carol");
        assert_eq!(numbers(&groups[0].issues), vec![1, 3]);
        assert_eq!(groups[1].assignee, "alice");
    }

    #[test]
    fn issues_are_grouped_under_stored_milestone_titles() {
        let milestones = vec![milestone(1, "Sprint 1"), milestone(2, "Sprint 2")];
        let issues = vec![
            issue(1, None, Some(milestone(2, "Sprint 2"))),
            issue(2, None, Some(milestone(1, "Sprint 1"))),
            issue(3, None, Some(milestone(2, "Sprint 2"))),
        ];

        let groups = group_by_milestone(&issues, &milestones);

        let summary: Vec<_> = groups
            .iter()
            .map(|g| (g.title.as_str(), numbers(&g.issues)))
            .collect();
        assert_eq!(summary, vec![("Sprint 2", vec![1, 3]), ("Sprint 1", vec![2])]);
    }

    #[test]
    fn dangling_milestone_numbers_get_a_placeholder_title() {
        let issues = vec![issue(1, None, Some(milestone(7, "Old sprint")))];

        let groups = group_by_milestone(&issues, &[milestone(1, "Sprint 1")]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Milestone 7");
        assert_eq!(groups[0].number, Some(MilestoneNumber::new(7)));
    }

    #[test]
    fn issues_without_milestone_form_their_own_group() {
        let issues = vec![issue(1, None, None)];

        let groups = group_by_milestone(&issues, &[]);

        assert_eq!(groups[0].title, NO_MILESTONE);
        assert_eq!(groups[0].number, None);
    }
}

use std::cell::Cell;
use std::fs;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use local_store::{LocalStore, StorageLayout, StoryFile};
use planning::{Clock, PlanningConfig, PlanningDriver, PlanningError, RepositoryId};
use report::{build_report, group_by_assignee, group_by_milestone, list_issues, list_milestones};

struct SteppingClock(Cell<i64>);

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let seconds = self.0.get();
        self.0.set(seconds + 1);
        Utc.timestamp_opt(seconds, 0).unwrap()
    }
}

fn plan(layout: &StorageLayout, sprints: &[&str], stories: &str) {
    let stories_path = layout.root().with_extension("stories.json");
    fs::write(&stories_path, stories).expect("write stories");
    let store = LocalStore::with_clock(layout.clone(), SteppingClock(Cell::new(1_704_067_200)));
    let config = PlanningConfig::new(
        sprints.iter().map(|s| s.to_string()).collect(),
        NaiveDate::from_ymd_opt(2024, 1, 1),
    )
    .expect("config");
    PlanningDriver::new(&store, config)
        .run(
            &RepositoryId::from_parts("acme", "widgets").expect("repo"),
            &StoryFile::new(stories_path),
        )
        .expect("planning run");
}

#[test]
fn report_regroups_what_the_planner_wrote() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let layout = StorageLayout::new(tmp.path().join("sim"));
    plan(
        &layout,
        &["Sprint 1", "Sprint 2"],
        r#"[
            {"title": "Add login", "assignee": "alice", "labels": ["auth"], "sprint": 1},
            {"title": "Add logout", "sprint": 2},
            {"title": "Audit log", "assignee": "alice", "sprint": 2}
        ]"#,
    );

    let issues = list_issues(&layout).expect("issues").records;
    let milestones = list_milestones(&layout).expect("milestones").records;

    let mut by_milestone: Vec<_> = group_by_milestone(&issues, &milestones)
        .into_iter()
        .map(|g| (g.title, g.issues.len()))
        .collect();
    by_milestone.sort();
    assert_eq!(
        by_milestone,
        vec![("Sprint 1".to_string(), 1), ("Sprint 2".to_string(), 2)]
    );

    let mut by_assignee: Vec<_> = group_by_assignee(&issues)
        .into_iter()
        .map(|g| (g.assignee, g.issues.len()))
        .collect();
    by_assignee.sort();
    assert_eq!(
        by_assignee,
        vec![("Unassigned".to_string(), 1), ("alice".to_string(), 2)]
    );

    let text = build_report(&layout).expect("report");
    assert!(text.contains("=== MILESTONES ==="));
    assert!(text.contains("=== Sprint 2 ==="));
    assert!(text.contains("Assignee: alice"));
}

#[test]
fn deleted_milestone_renders_as_placeholder() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let layout = StorageLayout::new(tmp.path().join("sim"));
    plan(
        &layout,
        &["Alpha", "Beta", "Gamma"],
        r#"[{"title": "Late work", "sprint": 3}]"#,
    );
    fs::remove_file(layout.milestone_path("Gamma")).expect("remove milestone");

    let text = build_report(&layout).expect("report");

    assert!(text.contains("=== Milestone 3 ==="));
    assert!(text.contains("Gamma"), "assignee view keeps the embedded title");
}

#[test]
fn missing_storage_root_is_reported() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let layout = StorageLayout::new(tmp.path().join("never-created"));

    let err = build_report(&layout).expect_err("no storage");

    assert!(matches!(err, PlanningError::MissingStorage { .. }));
}

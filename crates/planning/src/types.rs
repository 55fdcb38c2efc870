//! Records of the sprint planning domain.
//!
//! Milestones and issues are persisted as one JSON document each; stories are
//! the ephemeral input requests that become issues. Field names match the
//! on-disk JSON exactly.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{IssueNumber, MilestoneNumber, RepositoryId, StoryRejection};

/// Fallback text for an issue without an assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// Number of days each sprint adds to the due date.
pub const SPRINT_LENGTH_DAYS: u64 = 7;

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

/// A named sprint record with a due date, scoped to one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// 1-based position of the sprint in the run's sprint list.
    pub number: MilestoneNumber,

    /// Human-readable sprint name, e.g. `"Sprint 1"`.
    pub title: String,

    /// Free text description.
    pub description: String,

    /// Sprint end date, serialised as `YYYY-MM-DD`.
    pub due_on: NaiveDate,

    /// Owning repository.
    pub repository: RepositoryId,
}

impl Milestone {
    /// Builds the milestone for the `number`-th sprint of a run starting on
    /// `start_date`.
    ///
    /// Returns `None` if the due date falls outside the representable range.
    pub fn for_sprint(
        repository: &RepositoryId,
        number: MilestoneNumber,
        title: &str,
        start_date: NaiveDate,
    ) -> Option<Self> {
        Some(Self {
            number,
            title: title.to_string(),
            description: format!("Sprint {number} tasks"),
            due_on: due_date(start_date, number)?,
            repository: repository.clone(),
        })
    }
}

/// Due date of sprint `number`: `start_date + 7 * number` days.
pub fn due_date(start_date: NaiveDate, number: MilestoneNumber) -> Option<NaiveDate> {
    let days = SPRINT_LENGTH_DAYS.checked_mul(number.as_u64())?;
    start_date.checked_add_days(Days::new(days))
}

/// Milestones created by one run, keyed and ordered by number.
pub type MilestonePlan = BTreeMap<MilestoneNumber, Milestone>;

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// A unit of work attached to a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Best-effort identifier derived from the creation time.
    pub number: IssueNumber,

    /// Issue title.
    pub title: String,

    /// Issue description.
    #[serde(default)]
    pub body: String,

    /// Copy of the milestone as it was when the issue was created.
    ///
    /// Always written by the store; optional on read so that hand-edited
    /// documents still load.
    #[serde(default)]
    pub milestone: Option<Milestone>,

    /// Login of the assigned user, if any.
    #[serde(default)]
    pub assignee: Option<String>,

    /// Ordered labels; may be empty.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Owning repository.
    pub repository: RepositoryId,

    /// Local creation time, serialised as `YYYY-MM-DD HH:MM:SS`.
    #[serde(with = "created_at_format")]
    pub created_at: NaiveDateTime,
}

impl Issue {
    /// The assignee, or [`UNASSIGNED`] when missing or empty.
    pub fn assignee_or_unassigned(&self) -> &str {
        match self.assignee.as_deref() {
            Some(a) if !a.is_empty() => a,
            _ => UNASSIGNED,
        }
    }

    /// Number of the embedded milestone, if any.
    pub fn milestone_number(&self) -> Option<MilestoneNumber> {
        self.milestone.as_ref().map(|m| m.number)
    }
}

/// Everything the issue store needs to create an issue.
#[derive(Debug, Clone)]
pub struct NewIssue<'a> {
    pub repository: &'a RepositoryId,
    pub title: &'a str,
    pub description: &'a str,
    pub milestone: &'a Milestone,
    pub assignee: Option<&'a str>,
    pub labels: &'a [String],
}

mod created_at_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Stories
// ---------------------------------------------------------------------------

/// An unvalidated request describing a desired issue.
///
/// Every field is optional at parse time and parsing never fails on a single
/// field: a value of the wrong JSON type is dropped and its name recorded in
/// [`Story::invalid_fields`]. [`Story::validate`] decides whether the story
/// can become an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStory")]
pub struct Story {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
    pub labels: Option<Vec<String>>,
    /// 1-based index into the run's milestone list.
    pub sprint: Option<i64>,
    /// Fields present in the input whose value had an unusable JSON type.
    #[serde(skip)]
    pub invalid_fields: Vec<&'static str>,
}

impl Story {
    /// Checks the story against the milestones created in this run.
    ///
    /// A wrongly typed field rejects the story. An empty title counts as
    /// missing. An empty assignee is treated as no assignee.
    pub fn validate<'a>(
        &'a self,
        plan: &'a MilestonePlan,
    ) -> Result<PlannedStory<'a>, StoryRejection> {
        if let Some(&field) = self.invalid_fields.first() {
            return Err(StoryRejection::InvalidField { field });
        }
        let title = match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Err(StoryRejection::MissingTitle),
        };
        let sprint = self.sprint.ok_or(StoryRejection::MissingSprint)?;
        let milestone = u64::try_from(sprint)
            .ok()
            .and_then(|n| plan.get(&MilestoneNumber::new(n)))
            .ok_or(StoryRejection::UnknownSprint { sprint })?;

        Ok(PlannedStory {
            title,
            description: self.description.as_deref().unwrap_or_default(),
            assignee: self.assignee.as_deref().filter(|a| !a.is_empty()),
            labels: self.labels.as_deref().unwrap_or_default(),
            milestone,
        })
    }
}

/// Wire shape of a story: any JSON value per field, `null` meaning absent.
#[derive(Deserialize)]
struct RawStory {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    assignee: Option<Value>,
    #[serde(default)]
    labels: Option<Value>,
    #[serde(default)]
    sprint: Option<Value>,
}

impl From<RawStory> for Story {
    fn from(raw: RawStory) -> Self {
        let mut invalid_fields = Vec::new();
        let title = lenient("title", raw.title, string_value, &mut invalid_fields);
        let description = lenient(
            "description",
            raw.description,
            string_value,
            &mut invalid_fields,
        );
        let assignee = lenient("assignee", raw.assignee, string_value, &mut invalid_fields);
        let labels = lenient(
            "labels",
            raw.labels,
            |v| serde_json::from_value(v).ok(),
            &mut invalid_fields,
        );
        let sprint = lenient("sprint", raw.sprint, sprint_value, &mut invalid_fields);
        Self {
            title,
            description,
            assignee,
            labels,
            sprint,
            invalid_fields,
        }
    }
}

/// Converts a present value, recording `name` when the conversion fails.
fn lenient<T>(
    name: &'static str,
    value: Option<Value>,
    convert: impl FnOnce(Value) -> Option<T>,
    invalid_fields: &mut Vec<&'static str>,
) -> Option<T> {
    let converted = convert(value?);
    if converted.is_none() {
        invalid_fields.push(name);
    }
    converted
}

fn string_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Integers, and floats with no fractional part (`1.0` names sprint 1).
fn sprint_value(value: Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
            .map(|f| f as i64)
    })
}

/// A story that passed validation, borrowing from the story and the plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStory<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub assignee: Option<&'a str>,
    pub labels: &'a [String],
    pub milestone: &'a Milestone,
}

impl<'a> PlannedStory<'a> {
    /// The issue request for this story.
    pub fn to_new_issue(&self, repository: &'a RepositoryId) -> NewIssue<'a> {
        NewIssue {
            repository,
            title: self.title,
            description: self.description,
            milestone: self.milestone,
            assignee: self.assignee,
            labels: self.labels,
        }
    }
}

// ---------------------------------------------------------------------------
// Run-level index documents
// ---------------------------------------------------------------------------

/// One row of the planning summary.
///
/// Serialised as a JSON array `[number, title, assignee, "Sprint {n}"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    into = "(IssueNumber, String, String, String)",
    from = "(IssueNumber, String, String, String)"
)]
pub struct SummaryRow {
    pub number: IssueNumber,
    pub title: String,
    pub assignee: String,
    pub sprint: String,
}

impl SummaryRow {
    /// Summarises a freshly created issue for the sprint it was planned into.
    pub fn for_issue(issue: &Issue, sprint: MilestoneNumber) -> Self {
        Self {
            number: issue.number,
            title: issue.title.clone(),
            assignee: issue.assignee_or_unassigned().to_string(),
            sprint: format!("Sprint {sprint}"),
        }
    }
}

impl From<SummaryRow> for (IssueNumber, String, String, String) {
    fn from(row: SummaryRow) -> Self {
        (row.number, row.title, row.assignee, row.sprint)
    }
}

impl From<(IssueNumber, String, String, String)> for SummaryRow {
    fn from((number, title, assignee, sprint): (IssueNumber, String, String, String)) -> Self {
        Self {
            number,
            title,
            assignee,
            sprint,
        }
    }
}

/// `milestone_index.json`: every milestone created by the latest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneIndex {
    pub repository: RepositoryId,
    pub milestones: MilestonePlan,
}

/// `issue_index.json`: summary rows of the issues created by the latest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueIndex {
    pub repository: RepositoryId,
    pub issues: Vec<SummaryRow>,
}

//! Core domain for the sprint planner.
//!
//! This crate contains every record, newtype identifier, error type, and port
//! trait used by the planner and the report, plus the planning driver that
//! sequences one run. Infrastructure crates implement the traits defined here;
//! they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no filesystem I/O.
//! It defines *what* is stored; `local-store` defines *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`MilestoneNumber`, `IssueNumber`, `RepositoryId`, ...) |
//! | [`types`] | Records (`Milestone`, `Issue`, `Story`, `SummaryRow`, index documents) |
//! | [`errors`] | `PlanningError` and per-story `StoryRejection` |
//! | [`config`] | `PlanningConfig` |
//! | [`ports`] | `PlanningStore`, `StorySource`, `Clock` |
//! | [`driver`] | `PlanningDriver` |

pub mod config;
pub mod driver;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{PlanningConfig, DEFAULT_SPRINTS};
pub use driver::{PlanningDriver, PlanningOutcome, SkippedStory};
pub use errors::{DataFormatCause, PlanningError, StoryRejection};
pub use identifiers::{IssueNumber, MilestoneNumber, PlanningRunId, RepositoryId};
pub use ports::{Clock, PlanningStore, StorySource, SystemClock};
pub use types::{
    due_date, Issue, IssueIndex, Milestone, MilestoneIndex, MilestonePlan, NewIssue,
    PlannedStory, Story, SummaryRow, SPRINT_LENGTH_DAYS, UNASSIGNED,
};

//! Planning configuration passed explicitly into the driver.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::PlanningError;

/// Sprint names used when no configuration overrides them.
pub const DEFAULT_SPRINTS: [&str; 2] = ["Sprint 1", "Sprint 2"];

/// What one planning run creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Ordered sprint names; sprint `i` (1-based) becomes milestone `i`.
    pub sprint_names: Vec<String>,

    /// First day of the plan. `None` means today.
    pub start_date: Option<NaiveDate>,
}

impl PlanningConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Configuration`] if the sprint list is empty or
    /// contains an empty name.
    pub fn new(
        sprint_names: Vec<String>,
        start_date: Option<NaiveDate>,
    ) -> Result<Self, PlanningError> {
        if sprint_names.is_empty() {
            return Err(PlanningError::configuration(
                "at least one sprint name is required",
            ));
        }
        if let Some(pos) = sprint_names.iter().position(|n| n.trim().is_empty()) {
            return Err(PlanningError::configuration(format!(
                "sprint name #{} is empty",
                pos + 1
            )));
        }
        Ok(Self {
            sprint_names,
            start_date,
        })
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            sprint_names: DEFAULT_SPRINTS.iter().map(|s| s.to_string()).collect(),
            start_date: None,
        }
    }
}

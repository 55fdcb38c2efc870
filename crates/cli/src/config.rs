//! Planner configuration: TOML file, environment, and command-line overrides.
//!
//! Precedence is flag/env > config file > built-in defaults.
//!
//! ```toml
//! storage_root = "local_github_simulation"
//! sprints = ["Sprint 1", "Sprint 2"]
//! log_format = "text"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use local_store::DEFAULT_ROOT;
use planning::{PlanningConfig, PlanningError, DEFAULT_SPRINTS};
use serde::Deserialize;

/// Output format of the diagnostic log on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by every binary.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory holding the simulated GitHub data
    #[arg(long, value_name = "DIR", env = "SPRINT_STORAGE_ROOT")]
    pub root: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log format on stderr
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Settings read from the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    pub storage_root: PathBuf,
    pub sprints: Vec<String>,
    pub log_format: LogFormat,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from(DEFAULT_ROOT),
            sprints: DEFAULT_SPRINTS.iter().map(|s| s.to_string()).collect(),
            log_format: LogFormat::default(),
        }
    }
}

impl PlannerConfig {
    /// Loads the configuration file at `path`, or the defaults when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanningError::Io`] if the file cannot be read and
    /// [`PlanningError::Configuration`] if it is not valid TOML for this
    /// structure.
    pub fn load(path: Option<&Path>) -> Result<Self, PlanningError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|e| PlanningError::io(path, e))?;
        Self::parse(&raw).map_err(|e| match e {
            PlanningError::Configuration { message } => PlanningError::configuration(format!(
                "{}: {message}",
                path.display()
            )),
            other => other,
        })
    }

    /// Parses TOML configuration text.
    pub fn parse(raw: &str) -> Result<Self, PlanningError> {
        toml::from_str(raw).map_err(|e| PlanningError::configuration(e.message().to_string()))
    }

    /// Applies flag and environment overrides.
    pub fn with_overrides(mut self, args: &CommonArgs) -> Self {
        if let Some(root) = &args.root {
            self.storage_root = root.clone();
        }
        if let Some(format) = args.log_format {
            self.log_format = format;
        }
        self
    }

    /// The validated planning configuration for one run.
    pub fn planning(&self, start_date: Option<NaiveDate>) -> Result<PlanningConfig, PlanningError> {
        PlanningConfig::new(self.sprints.clone(), start_date)
    }
}

//! `sprint-planner` entry point.
//!
//! Creates the sprint milestones and one issue per valid story in the local
//! GitHub simulation, then prints a summary table.
//!
//! ```text
//! sprint-planner <owner> <repo_name> <stories_json_file> [--root DIR] [--start-date YYYY-MM-DD]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use cli::config::{CommonArgs, PlannerConfig};
use cli::observability;
use local_store::{LocalStore, StorageLayout, StoryFile};
use planning::{PlanningDriver, RepositoryId};
use report::render_summary;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "sprint-planner", version)]
#[command(about = "Plan sprint milestones and issues into a local GitHub simulation")]
struct Cli {
    /// Repository owner
    owner: String,

    /// Repository name
    repo_name: String,

    /// JSON array of user stories
    stories_json_file: PathBuf,

    /// First day of the plan (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    start_date: Option<NaiveDate>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = PlannerConfig::load(cli.common.config.as_deref())?.with_overrides(&cli.common);
    observability::init(config.log_format);
    debug!(?config, "Loaded configuration");

    let repository = RepositoryId::from_parts(&cli.owner, &cli.repo_name)
        .context("owner and repository name must not be empty")?;
    let plan_config = config.planning(cli.start_date)?;

    let store = LocalStore::new(StorageLayout::new(&config.storage_root));
    let layout = store.layout();
    let stories = StoryFile::new(&cli.stories_json_file);

    let outcome = PlanningDriver::new(&store, plan_config)
        .run(&repository, &stories)
        .with_context(|| format!("planning run for {repository} failed"))?;

    println!("\n{}", render_summary(&outcome.rows));
    println!("\nLocal GitHub simulation complete!");
    println!(
        "All data has been saved to the '{}' directory.",
        layout.root().display()
    );
    println!("- Milestones are in: {}", layout.milestones_dir().display());
    println!("- Issues are in: {}", layout.issues_dir().display());
    Ok(())
}

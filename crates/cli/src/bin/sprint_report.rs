//! `sprint-report` entry point.
//!
//! Prints the milestones, the issues grouped by milestone, and the issues
//! grouped by assignee from the local GitHub simulation.

use std::process::ExitCode;

use clap::Parser;
use cli::config::{CommonArgs, PlannerConfig};
use cli::observability;
use local_store::StorageLayout;

#[derive(Debug, Parser)]
#[command(name = "sprint-report", version)]
#[command(about = "Show the sprint plan stored in a local GitHub simulation")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = PlannerConfig::load(cli.common.config.as_deref())?.with_overrides(&cli.common);
    observability::init(config.log_format);

    let layout = StorageLayout::new(&config.storage_root);
    Ok(report::build_report(&layout)?)
}

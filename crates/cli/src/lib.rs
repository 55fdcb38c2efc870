//! Shared plumbing for the sprint planner binaries.
//!
//! The binaries are the composition root:
//!
//! 1. **Parse configuration**: load the optional TOML file and apply flag and
//!    environment overrides ([`config`]).
//! 2. **Wire observability**: configure `tracing-subscriber` with a text or
//!    JSON formatter ([`observability`]).
//! 3. **Construct infrastructure**: build the `LocalStore` and story source
//!    and hand them to `PlanningDriver` (`sprint-planner`), or scan the store
//!    and render the report (`sprint-report`).

pub mod config;
pub mod observability;

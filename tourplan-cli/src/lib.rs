//! Command-line interface for assigning jobs to workers.
//!
//! `tourplan assign <workers> <jobs>` loads the worker and job lists, fetches
//! the distance matrix from a file or the on-disk cache, partitions the jobs
//! and prints each worker's tour. Options layer from CLI flags,
//! configuration files and `TOURPLAN_*` environment variables.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod assign;
mod error;
mod logging;
mod report;

pub use error::CliError;
pub use logging::LogLevel;
pub use report::ReportFormat;

use assign::{AssignArgs, run_assign};

const ARG_WORKERS: &str = "workers";
const ARG_JOBS: &str = "jobs";
const ARG_MATRIX: &str = "matrix";
const ARG_CACHE_DIR: &str = "cache-dir";
const ARG_DEPOT: &str = "depot";
const ARG_EXACT_THRESHOLD: &str = "exact-threshold";
const ARG_EXACT_BUDGET_MS: &str = "exact-budget-ms";
const ARG_THREADS: &str = "threads";
const ARG_SEQUENTIAL: &str = "sequential";
const ARG_ASSIGN_PARTIAL: &str = "assign-partial";
const ARG_FORMAT: &str = "format";
const ARG_LOG_LEVEL: &str = "log-level";
const ENV_WORKERS: &str = "TOURPLAN_WORKERS";
const ENV_JOBS: &str = "TOURPLAN_JOBS";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or the
/// assignment itself fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Assign(args) => run_assign(*args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tourplan",
    about = "Partition jobs among workers and plan each worker's tour",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assign jobs to workers and print their tours.
    Assign(Box<AssignArgs>),
}

#[cfg(test)]
mod tests;

//! Error types emitted by the Tourplan CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tourplan_core::{DistanceError, ProblemError};
use tourplan_data::DataError;
use tourplan_solver::AssignError;

/// Errors emitted by the Tourplan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it on the command line or set {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option has an unusable value.
    #[error("invalid --{field}: {reason}")]
    InvalidArgument {
        /// Option name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Path supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Path supplied.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading worker, job or matrix files failed.
    #[error(transparent)]
    Data(#[from] DataError),
    /// No distance matrix could be obtained.
    #[error("failed to obtain distance matrix: {0}")]
    Distance(#[from] DistanceError),
    /// The inputs do not form a consistent problem.
    #[error("invalid problem: {0}")]
    Problem(#[from] ProblemError),
    /// The assignment run failed.
    #[error("assignment failed: {0}")]
    Assign(#[from] AssignError),
    /// The logger could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
    /// Serialising the report failed.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] std::io::Error),
}

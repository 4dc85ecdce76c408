//! Assign command implementation for the Tourplan CLI.

use std::io::Write;
use std::num::NonZeroUsize;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tourplan_core::{DistanceMatrix, DistanceProvider, JobNode, NodeIndex, ProblemInstance};
use tourplan_data::{
    CachedDistanceProvider, FileDistanceProvider, cache_file_name, load_jobs, load_workers,
};
use tourplan_solver::{
    AdaptiveSolverConfig, AdaptiveTourSolver, AssignmentEngine, EngineConfig, ShortfallPolicy,
};

use crate::logging::init_logging;
use crate::report::{Report, write_report};
use crate::{
    ARG_ASSIGN_PARTIAL, ARG_CACHE_DIR, ARG_DEPOT, ARG_EXACT_BUDGET_MS, ARG_EXACT_THRESHOLD,
    ARG_FORMAT, ARG_JOBS, ARG_LOG_LEVEL, ARG_MATRIX, ARG_SEQUENTIAL, ARG_THREADS, ARG_WORKERS,
    CliError, ENV_JOBS, ENV_WORKERS, LogLevel, ReportFormat,
};

/// CLI arguments for the `assign` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Partition jobs among workers so that each worker receives \
                 the number of jobs they require, then print the cheapest \
                 closed tour from the depot for every worker. Worker and job \
                 lists may be CSV or JSON. Distances come \
                 from a JSON matrix file or the distance cache directory.",
    about = "Assign jobs to workers"
)]
#[ortho_config(prefix = "TOURPLAN")]
pub(crate) struct AssignArgs {
    /// Worker list: CSV with `worker_name,number_of_jobs` columns when the
    /// path ends in `.csv`, otherwise a JSON list of `{ "name", "jobs" }`.
    #[arg(value_name = "workers")]
    #[serde(default)]
    pub(crate) workers: Option<Utf8PathBuf>,
    /// Job list: CSV with `job_ID,address` columns when the path ends in
    /// `.csv`, otherwise a JSON list of `{ "id", "address" }`. Position is
    /// the matrix index.
    #[arg(value_name = "jobs")]
    #[serde(default)]
    pub(crate) jobs: Option<Utf8PathBuf>,
    /// Distance matrix file written for exactly these jobs.
    #[arg(long = ARG_MATRIX, value_name = "path")]
    #[serde(default)]
    pub(crate) matrix: Option<Utf8PathBuf>,
    /// Directory holding `distance_IDs_<min>_to_<max>.json` cache files.
    #[arg(long = ARG_CACHE_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) cache_dir: Option<Utf8PathBuf>,
    /// Matrix index of the depot every tour starts and ends at.
    #[arg(long = ARG_DEPOT, value_name = "index")]
    #[serde(default)]
    pub(crate) depot: Option<NodeIndex>,
    /// Largest node set solved exactly; larger sets use the heuristic.
    #[arg(long = ARG_EXACT_THRESHOLD, value_name = "nodes")]
    #[serde(default)]
    pub(crate) exact_threshold: Option<usize>,
    /// Time allowed for each exact search before falling back.
    #[arg(long = ARG_EXACT_BUDGET_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) exact_budget_ms: Option<u64>,
    /// Size of a dedicated thread pool for candidate evaluation.
    #[arg(long = ARG_THREADS, value_name = "count")]
    #[serde(default)]
    pub(crate) threads: Option<usize>,
    /// Evaluate candidates on the calling thread only.
    #[arg(long = ARG_SEQUENTIAL)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) sequential: bool,
    /// Give a worker every remaining job when fewer remain than they need.
    #[arg(long = ARG_ASSIGN_PARTIAL)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) assign_partial: bool,
    /// Report format.
    #[arg(long = ARG_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<ReportFormat>,
    /// Log verbosity; `RUST_LOG` applies when unset.
    #[arg(long = ARG_LOG_LEVEL, value_enum, value_name = "level")]
    #[serde(default)]
    pub(crate) log_level: Option<LogLevel>,
}

impl AssignArgs {
    pub(crate) fn into_config(self) -> Result<AssignConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AssignConfig::try_from(merged)
    }
}

/// Where the distance matrix comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MatrixSource {
    /// Read `path` directly.
    File(Utf8PathBuf),
    /// Look in `cache_dir` first and fall back to `path`, caching its matrix.
    CachedFile {
        cache_dir: Utf8PathBuf,
        path: Utf8PathBuf,
    },
    /// Read the cache file named after the job ids in `cache_dir`.
    CacheDir(Utf8PathBuf),
}

/// Resolved `assign` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssignConfig {
    pub(crate) workers: Utf8PathBuf,
    pub(crate) jobs: Utf8PathBuf,
    pub(crate) matrix: MatrixSource,
    pub(crate) depot: NodeIndex,
    pub(crate) solver: AdaptiveSolverConfig,
    pub(crate) engine: EngineConfig,
    pub(crate) format: ReportFormat,
    pub(crate) log_level: Option<LogLevel>,
}

impl AssignConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.workers, ARG_WORKERS)?;
        Self::require_existing(&self.jobs, ARG_JOBS)?;
        if let MatrixSource::File(path) = &self.matrix {
            Self::require_existing(path, ARG_MATRIX)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match tourplan_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn distance_matrix(&self, jobs: &[JobNode]) -> Result<DistanceMatrix, CliError> {
        let matrix = match &self.matrix {
            MatrixSource::File(path) => FileDistanceProvider::new(path.clone()).distance_matrix(jobs),
            MatrixSource::CachedFile { cache_dir, path } => CachedDistanceProvider::new(
                cache_dir.clone(),
                FileDistanceProvider::new(path.clone()),
            )
            .distance_matrix(jobs),
            MatrixSource::CacheDir(dir) => {
                let name = cache_file_name(jobs).unwrap_or_default();
                FileDistanceProvider::new(dir.join(name)).distance_matrix(jobs)
            }
        }?;
        Ok(matrix)
    }
}

impl TryFrom<AssignArgs> for AssignConfig {
    type Error = CliError;

    fn try_from(args: AssignArgs) -> Result<Self, Self::Error> {
        let workers = args.workers.ok_or(CliError::MissingArgument {
            field: ARG_WORKERS,
            env: ENV_WORKERS,
        })?;
        let jobs = args.jobs.ok_or(CliError::MissingArgument {
            field: ARG_JOBS,
            env: ENV_JOBS,
        })?;

        let matrix = match (args.matrix, args.cache_dir) {
            (Some(path), Some(cache_dir)) => MatrixSource::CachedFile { cache_dir, path },
            (Some(path), None) => MatrixSource::File(path),
            (None, cache_dir) => {
                MatrixSource::CacheDir(cache_dir.unwrap_or_else(|| Utf8PathBuf::from(".")))
            }
        };

        let threads = args
            .threads
            .map(|count| {
                NonZeroUsize::new(count).ok_or_else(|| CliError::InvalidArgument {
                    field: ARG_THREADS,
                    reason: "thread count must be at least 1".to_owned(),
                })
            })
            .transpose()?;

        let defaults = AdaptiveSolverConfig::default();
        let solver = AdaptiveSolverConfig {
            exact_threshold: args.exact_threshold.unwrap_or(defaults.exact_threshold),
            exact_time_budget: args.exact_budget_ms.map(Duration::from_millis),
            ..defaults
        };
        let engine = EngineConfig {
            parallel: !args.sequential,
            threads,
            shortfall: if args.assign_partial {
                ShortfallPolicy::AssignPartial
            } else {
                ShortfallPolicy::LeaveEmpty
            },
        };

        Ok(Self {
            workers,
            jobs,
            matrix,
            depot: args.depot.unwrap_or_default(),
            solver,
            engine,
            format: args.format.unwrap_or_default(),
            log_level: args.log_level,
        })
    }
}

pub(super) fn run_assign(args: AssignArgs) -> Result<(), CliError> {
    let config = resolve_assign_config(args)?;
    init_logging(config.log_level)?;
    let mut stdout = std::io::stdout().lock();
    execute_assign(&config, &mut stdout)
}

pub(super) fn run_assign_with(args: AssignArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_assign_config(args)?;
    execute_assign(&config, writer)
}

fn resolve_assign_config(args: AssignArgs) -> Result<AssignConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_assign(config: &AssignConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let workers = load_workers(&config.workers)?;
    let jobs = load_jobs(&config.jobs)?;
    let matrix = config.distance_matrix(&jobs)?;
    let problem = ProblemInstance::new(jobs, workers, matrix, config.depot)?;
    log::info!(
        "assigning {} candidate jobs to {} workers from depot {}",
        problem.candidate_nodes().count(),
        problem.workers().len(),
        problem.depot()
    );

    let engine =
        AssignmentEngine::with_config(AdaptiveTourSolver::new(config.solver), config.engine);
    let assignment = engine.assign(&problem)?;
    let report = Report::new(&assignment, problem.jobs());
    write_report(writer, &report, config.format)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<AssignConfig, CliError> {
    let merged = AssignArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AssignConfig::try_from(merged)
}

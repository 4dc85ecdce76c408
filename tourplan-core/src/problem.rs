//! A validated assignment problem: jobs, workers, matrix and depot.

use std::collections::HashSet;

use thiserror::Error;

use crate::{DistanceMatrix, JobNode, MatrixError, NodeIndex, Worker};

/// Errors returned by [`ProblemInstance::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// The matrix itself was malformed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// The matrix does not cover exactly the supplied jobs.
    #[error("distance matrix covers {matrix} nodes but {jobs} jobs were supplied")]
    DimensionMismatch {
        /// Number of jobs.
        jobs: usize,
        /// Matrix dimension.
        matrix: usize,
    },
    /// The depot does not index a job.
    #[error("depot {depot} is outside the {size} known job nodes")]
    DepotOutOfRange {
        /// Requested depot.
        depot: NodeIndex,
        /// Number of job nodes.
        size: usize,
    },
    /// A job's matrix index does not match its position in the job list.
    #[error("job at position {position} claims matrix index {index}")]
    JobIndexMismatch {
        /// Position in the job list.
        position: usize,
        /// Index stored on the job.
        index: NodeIndex,
    },
    /// Two jobs share an external identifier.
    #[error("job id {job_id} appears more than once")]
    DuplicateJobId {
        /// Repeated identifier.
        job_id: u64,
    },
}

/// Inputs to the assignment engine, checked for consistency.
///
/// The depot is one of the job nodes but is never handed out as a job; every
/// other node is available to workers.
///
/// # Examples
/// ```
/// use tourplan_core::{DistanceMatrix, JobNode, ProblemInstance, Worker};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let jobs = vec![JobNode::new(0, 10, "Depot"), JobNode::new(1, 11, "Site A")];
/// let matrix = DistanceMatrix::new(vec![vec![0, 4], vec![4, 0]])?;
/// let problem = ProblemInstance::new(jobs, vec![Worker::new("Ada", 1)?], matrix, 0)?;
/// assert_eq!(problem.candidate_nodes().collect::<Vec<_>>(), vec![1]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInstance {
    jobs: Vec<JobNode>,
    workers: Vec<Worker>,
    matrix: DistanceMatrix,
    depot: NodeIndex,
}

impl ProblemInstance {
    /// Validate and bundle the inputs.
    ///
    /// A demand above the number of non-depot jobs is logged, not rejected.
    ///
    /// # Errors
    /// Returns [`ProblemError::DimensionMismatch`] when the matrix and job
    /// list differ in size, [`ProblemError::DepotOutOfRange`] for a depot
    /// past the last job, [`ProblemError::JobIndexMismatch`] when a job's
    /// index is not its position and [`ProblemError::DuplicateJobId`] for a
    /// repeated job id.
    pub fn new(
        jobs: Vec<JobNode>,
        workers: Vec<Worker>,
        matrix: DistanceMatrix,
        depot: NodeIndex,
    ) -> Result<Self, ProblemError> {
        if matrix.len() != jobs.len() {
            return Err(ProblemError::DimensionMismatch {
                jobs: jobs.len(),
                matrix: matrix.len(),
            });
        }
        if depot >= jobs.len() {
            return Err(ProblemError::DepotOutOfRange {
                depot,
                size: jobs.len(),
            });
        }
        let mut ids = HashSet::with_capacity(jobs.len());
        for (position, job) in jobs.iter().enumerate() {
            if job.index != position {
                return Err(ProblemError::JobIndexMismatch {
                    position,
                    index: job.index,
                });
            }
            if !ids.insert(job.job_id) {
                return Err(ProblemError::DuplicateJobId { job_id: job.job_id });
            }
        }

        let demand: usize = workers.iter().map(|w| w.required_jobs).sum();
        let supply = jobs.len().saturating_sub(1);
        if demand > supply {
            log::warn!(
                "workers require {demand} jobs but only {supply} are available; some workers will be under-assigned"
            );
        }

        Ok(Self {
            jobs,
            workers,
            matrix,
            depot,
        })
    }

    /// All job nodes, depot included, in matrix order.
    #[must_use]
    pub fn jobs(&self) -> &[JobNode] {
        &self.jobs
    }

    /// Workers in processing order.
    #[must_use]
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Shared travel costs.
    #[must_use]
    pub const fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Shared start and end node.
    #[must_use]
    pub const fn depot(&self) -> NodeIndex {
        self.depot
    }

    /// The job at `index`, if any.
    #[must_use]
    pub fn job(&self, index: NodeIndex) -> Option<&JobNode> {
        self.jobs.get(index)
    }

    /// Nodes that may be assigned to workers, in ascending order.
    pub fn candidate_nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.jobs.len()).filter(move |&node| node != self.depot)
    }
}

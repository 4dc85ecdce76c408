//! Greedy partitioning of jobs among workers.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use thiserror::Error;
use tourplan_core::{
    Assignment, AssignmentStatus, CancellationToken, Cost, Diagnostics, NodeIndex,
    ProblemInstance, SolveError, Tour, TourRequest, TourSolver, Worker, WorkerAssignment,
};

use crate::AdaptiveTourSolver;

/// What to do with a worker when fewer unclaimed jobs remain than they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortfallPolicy {
    /// Assign nothing and leave the remaining jobs for later workers.
    #[default]
    LeaveEmpty,
    /// Grow the worker over every remaining job.
    AssignPartial,
}

/// Settings for [`AssignmentEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Evaluate candidates on the `rayon` pool.
    pub parallel: bool,
    /// Dedicated pool size; `None` uses the global pool.
    pub threads: Option<NonZeroUsize>,
    /// Behaviour when a worker cannot be satisfied.
    pub shortfall: ShortfallPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            shortfall: ShortfallPolicy::default(),
        }
    }
}

/// Errors raised while assigning.
#[derive(Debug, Error)]
pub enum AssignError {
    /// A tour solve failed.
    #[error("tour solve failed: {0}")]
    Solve(#[from] SolveError),
    /// The dedicated thread pool could not be started.
    #[error("failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Partitions a problem's jobs among its workers.
///
/// Workers are served in input order. Each one grows its job set a node at a
/// time: every unclaimed node is tried as the next addition, the tour through
/// the depot, the jobs so far and that node is solved, and the cheapest
/// candidate (lowest node index on ties) is committed. Once every worker has
/// been served, each worker's tour is solved again over its final set.
///
/// # Examples
/// ```
/// use tourplan_core::{DistanceMatrix, JobNode, ProblemInstance, Worker};
/// use tourplan_solver::AssignmentEngine;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let jobs = vec![
///     JobNode::new(0, 1, "Depot"),
///     JobNode::new(1, 2, "North"),
///     JobNode::new(2, 3, "South"),
/// ];
/// let matrix = DistanceMatrix::new(vec![vec![0, 10, 15], vec![10, 0, 5], vec![15, 5, 0]])?;
/// let problem = ProblemInstance::new(jobs, vec![Worker::new("Ada", 2)?], matrix, 0)?;
/// let assignment = AssignmentEngine::default().assign(&problem)?;
/// let tour = assignment.workers()[0].tour.as_ref().expect("tour");
/// assert_eq!(tour.nodes(), &[0, 1, 2, 0]);
/// assert_eq!(tour.cost(), 30);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentEngine<S = AdaptiveTourSolver> {
    solver: S,
    config: EngineConfig,
}

impl Default for AssignmentEngine<AdaptiveTourSolver> {
    fn default() -> Self {
        Self::new(AdaptiveTourSolver::default())
    }
}

impl<S: TourSolver> AssignmentEngine<S> {
    /// Engine over `solver` with default settings.
    #[must_use]
    pub fn new(solver: S) -> Self {
        Self::with_config(solver, EngineConfig::default())
    }

    /// Engine over `solver` with explicit settings.
    #[must_use]
    pub const fn with_config(solver: S, config: EngineConfig) -> Self {
        Self { solver, config }
    }

    /// Active settings.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Assign every worker.
    ///
    /// # Errors
    /// Returns [`AssignError`] if a tour solve fails or the thread pool
    /// cannot be built.
    pub fn assign(&self, problem: &ProblemInstance) -> Result<Assignment, AssignError> {
        self.assign_with_cancel(problem, &CancellationToken::new())
    }

    /// Assign every worker, passing `token` to each tour solve.
    ///
    /// Solvers that can degrade gracefully, such as [`AdaptiveTourSolver`],
    /// still finish the run after cancellation with approximate tours.
    ///
    /// # Errors
    /// Returns [`AssignError`] if a tour solve fails or the thread pool
    /// cannot be built.
    pub fn assign_with_cancel(
        &self,
        problem: &ProblemInstance,
        token: &CancellationToken,
    ) -> Result<Assignment, AssignError> {
        match self.config.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.get())
                    .build()?;
                pool.install(|| self.run(problem, token))
            }
            None => self.run(problem, token),
        }
    }

    fn run(
        &self,
        problem: &ProblemInstance,
        token: &CancellationToken,
    ) -> Result<Assignment, AssignError> {
        let started = Instant::now();
        let mut run = Run {
            problem,
            token,
            solver: &self.solver,
            parallel: self.config.parallel,
            pool: problem.candidate_nodes().collect(),
            evaluations: 0,
        };

        let mut committed = Vec::with_capacity(problem.workers().len());
        for worker in problem.workers() {
            let (jobs, status) = run.grow(worker, self.config.shortfall)?;
            committed.push((worker, jobs, status));
        }

        let mut workers = Vec::with_capacity(committed.len());
        for (worker, jobs, status) in committed {
            let tour = run.final_tour(&jobs)?;
            info!(
                "worker {:?}: {} of {} jobs, tour cost {}",
                worker.name,
                jobs.len(),
                worker.required_jobs,
                tour.as_ref().map_or(0, Tour::cost)
            );
            workers.push(WorkerAssignment {
                worker: worker.clone(),
                jobs,
                tour,
                status,
            });
        }

        let diagnostics = Diagnostics {
            solve_time: started.elapsed(),
            tour_evaluations: run.evaluations,
        };
        let assignment = Assignment::new(workers, diagnostics);
        info!(
            "assigned {} jobs to {} workers in {:?} ({} tour evaluations, total cost {})",
            assignment.assigned_nodes().len(),
            assignment.workers().len(),
            diagnostics.solve_time,
            diagnostics.tour_evaluations,
            assignment.total_cost()
        );
        Ok(assignment)
    }
}

/// State owned by the coordinating thread for one assignment run.
struct Run<'a, S> {
    problem: &'a ProblemInstance,
    token: &'a CancellationToken,
    solver: &'a S,
    parallel: bool,
    pool: BTreeSet<NodeIndex>,
    evaluations: u64,
}

impl<S: TourSolver> Run<'_, S> {
    fn grow(
        &mut self,
        worker: &Worker,
        shortfall: ShortfallPolicy,
    ) -> Result<(BTreeSet<NodeIndex>, AssignmentStatus), AssignError> {
        let required = worker.required_jobs;
        let available = self.pool.len();
        if available < required {
            warn!(
                "worker {:?} requires {required} jobs but only {available} remain unclaimed",
                worker.name
            );
            if shortfall == ShortfallPolicy::LeaveEmpty {
                let status = AssignmentStatus::UnderAssigned {
                    required,
                    assigned: 0,
                    available,
                };
                return Ok((BTreeSet::new(), status));
            }
        }

        let mut chosen: Vec<NodeIndex> = Vec::with_capacity(required.min(available));
        while chosen.len() < required {
            let Some((cost, node)) = self.best_candidate(&chosen)? else {
                break;
            };
            self.pool.remove(&node);
            chosen.push(node);
            debug!(
                "worker {:?} takes node {node} ({} of {required}), tour cost {cost}",
                worker.name,
                chosen.len()
            );
        }

        let jobs: BTreeSet<NodeIndex> = chosen.into_iter().collect();
        let status = if jobs.len() == required {
            AssignmentStatus::Complete
        } else {
            AssignmentStatus::UnderAssigned {
                required,
                assigned: jobs.len(),
                available,
            }
        };
        Ok((jobs, status))
    }

    /// Cheapest `(cost, node)` extension of `chosen`, or `None` when the pool
    /// is exhausted.
    fn best_candidate(
        &mut self,
        chosen: &[NodeIndex],
    ) -> Result<Option<(Cost, NodeIndex)>, SolveError> {
        let candidates: Vec<NodeIndex> = self.pool.iter().copied().collect();
        self.evaluations = self
            .evaluations
            .saturating_add(u64::try_from(candidates.len()).unwrap_or(u64::MAX));

        let evaluate = |candidate: NodeIndex| -> Result<(Cost, NodeIndex), SolveError> {
            let mut nodes = Vec::with_capacity(chosen.len() + 1);
            nodes.extend_from_slice(chosen);
            nodes.push(candidate);
            let request = TourRequest::new(self.problem.matrix(), self.problem.depot(), &nodes);
            let tour = self.solver.solve_until(&request, self.token)?;
            Ok((tour.cost(), candidate))
        };

        let scored: Vec<(Cost, NodeIndex)> = if self.parallel {
            candidates
                .par_iter()
                .map(|&candidate| evaluate(candidate))
                .collect::<Result<_, _>>()?
        } else {
            candidates
                .iter()
                .map(|&candidate| evaluate(candidate))
                .collect::<Result<_, _>>()?
        };
        Ok(scored.into_iter().min())
    }

    fn final_tour(&mut self, jobs: &BTreeSet<NodeIndex>) -> Result<Option<Tour>, SolveError> {
        if jobs.is_empty() {
            return Ok(None);
        }
        let nodes: Vec<NodeIndex> = jobs.iter().copied().collect();
        self.evaluations = self.evaluations.saturating_add(1);
        let request = TourRequest::new(self.problem.matrix(), self.problem.depot(), &nodes);
        self.solver.solve_until(&request, self.token).map(Some)
    }
}

//! Exact where affordable, heuristic otherwise.

use std::time::Duration;

use tourplan_core::{
    ApproximationReason, CancellationToken, SolveError, Tour, TourQuality, TourRequest,
    TourSolver,
};

use crate::{ExactTourSolver, HeuristicSolverConfig, HeuristicTourSolver, MAX_EXACT_NODES};

/// Configuration for [`AdaptiveTourSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveSolverConfig {
    /// Largest node set solved exactly. Values above [`MAX_EXACT_NODES`] are
    /// clamped.
    pub exact_threshold: usize,
    /// Wall-clock budget for each exact search; `None` means unbounded.
    pub exact_time_budget: Option<Duration>,
    /// Settings for the heuristic fallback.
    pub heuristic: HeuristicSolverConfig,
}

impl Default for AdaptiveSolverConfig {
    fn default() -> Self {
        Self {
            exact_threshold: 10,
            exact_time_budget: None,
            heuristic: HeuristicSolverConfig::default(),
        }
    }
}

impl AdaptiveSolverConfig {
    /// Effective exact threshold after clamping.
    #[must_use]
    pub fn effective_threshold(&self) -> usize {
        self.exact_threshold.min(MAX_EXACT_NODES)
    }
}

/// Tour solver that uses Held-Karp up to a size threshold and 2-opt beyond it.
///
/// When a time budget is configured, each exact search gets its own deadline;
/// if it expires, or the caller cancels, the solver falls back to the
/// heuristic and marks the tour
/// [`ApproximationReason::Interrupted`].
///
/// # Examples
/// ```
/// use tourplan_core::{DistanceMatrix, TourRequest, TourSolver};
/// use tourplan_solver::{AdaptiveSolverConfig, AdaptiveTourSolver};
///
/// let matrix = DistanceMatrix::new(vec![vec![0, 3, 4], vec![3, 0, 5], vec![4, 5, 0]])
///     .expect("square matrix");
/// let solver = AdaptiveTourSolver::new(AdaptiveSolverConfig {
///     exact_threshold: 1,
///     ..AdaptiveSolverConfig::default()
/// });
/// let tour = solver
///     .solve(&TourRequest::new(&matrix, 0, &[1, 2]))
///     .expect("valid request");
/// assert!(!tour.quality().is_optimal());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AdaptiveTourSolver {
    config: AdaptiveSolverConfig,
    exact: ExactTourSolver,
    heuristic: HeuristicTourSolver,
}

impl AdaptiveTourSolver {
    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn new(config: AdaptiveSolverConfig) -> Self {
        Self {
            config,
            exact: ExactTourSolver,
            heuristic: HeuristicTourSolver::with_config(config.heuristic),
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AdaptiveSolverConfig {
        &self.config
    }
}

impl TourSolver for AdaptiveTourSolver {
    fn solve(&self, request: &TourRequest<'_>) -> Result<Tour, SolveError> {
        self.solve_until(request, &CancellationToken::new())
    }

    fn solve_until(
        &self,
        request: &TourRequest<'_>,
        token: &CancellationToken,
    ) -> Result<Tour, SolveError> {
        request.validate()?;
        let count = request.nodes.len();
        if count > self.config.effective_threshold() {
            return self.heuristic.solve_until(request, token);
        }

        let exact_token = self
            .config
            .exact_time_budget
            .map_or_else(|| token.clone(), |budget| token.child_with_budget(budget));
        match self.exact.solve_until(request, &exact_token) {
            Err(SolveError::Interrupted) => {
                log::warn!(
                    "exact search over {count} nodes interrupted; falling back to 2-opt heuristic"
                );
                let tour = self.heuristic.solve_until(request, token)?;
                Ok(tour.with_quality(TourQuality::Approximate(
                    ApproximationReason::Interrupted,
                )))
            }
            outcome => outcome,
        }
    }
}

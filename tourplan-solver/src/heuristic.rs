//! Approximate tours: nearest neighbour construction plus 2-opt.

use tourplan_core::{
    ApproximationReason, CancellationToken, Cost, DistanceMatrix, NodeIndex, SolveError, Tour,
    TourQuality, TourRequest, TourSolver,
};

/// Configuration for [`HeuristicTourSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicSolverConfig {
    /// Upper bound on full 2-opt sweeps.
    pub max_passes: usize,
}

impl Default for HeuristicSolverConfig {
    fn default() -> Self {
        Self { max_passes: 50 }
    }
}

/// Non-exact tour solver for node sets too large for Held-Karp.
///
/// Starts from the depot and repeatedly visits the nearest unvisited node
/// (lowest index on ties), then applies 2-opt segment reversals while they
/// strictly reduce cost. Reversal costs are recomputed edge by edge, so the
/// solver stays correct for asymmetric matrices. Every tour it returns is
/// flagged [`TourQuality::Approximate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTourSolver {
    config: HeuristicSolverConfig,
}

impl HeuristicTourSolver {
    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: HeuristicSolverConfig) -> Self {
        Self { config }
    }
}

impl TourSolver for HeuristicTourSolver {
    fn solve(&self, request: &TourRequest<'_>) -> Result<Tour, SolveError> {
        self.solve_until(request, &CancellationToken::new())
    }

    fn solve_until(
        &self,
        request: &TourRequest<'_>,
        token: &CancellationToken,
    ) -> Result<Tour, SolveError> {
        request.validate()?;
        let matrix = request.matrix;
        let depot = request.depot;
        let mut stops = nearest_neighbour(matrix, depot, request.nodes);
        let passes = two_opt(matrix, depot, &mut stops, self.config.max_passes, token);
        let cost = closed_cost(matrix, depot, &stops);
        log::trace!(
            "heuristic tour over {} nodes settled after {passes} 2-opt passes at cost {cost}",
            stops.len()
        );
        Ok(Tour::closed(
            depot,
            &stops,
            cost,
            TourQuality::Approximate(ApproximationReason::SizeThreshold),
        ))
    }
}

fn nearest_neighbour(
    matrix: &DistanceMatrix,
    depot: NodeIndex,
    nodes: &[NodeIndex],
) -> Vec<NodeIndex> {
    let mut remaining = nodes.to_vec();
    remaining.sort_unstable();
    let mut stops = Vec::with_capacity(remaining.len());
    let mut current = depot;
    while let Some((position, next)) = remaining
        .iter()
        .copied()
        .enumerate()
        .min_by_key(|&(_, node)| (matrix.edge(current, node), node))
    {
        remaining.remove(position);
        stops.push(next);
        current = next;
    }
    stops
}

/// Improve `stops` in place; returns the number of sweeps performed.
fn two_opt(
    matrix: &DistanceMatrix,
    depot: NodeIndex,
    stops: &mut [NodeIndex],
    max_passes: usize,
    token: &CancellationToken,
) -> usize {
    let len = stops.len();
    let mut passes = 0;
    while passes < max_passes && !token.should_stop() {
        passes += 1;
        let mut improved = false;
        for start in 0..len {
            for end in (start + 1)..len {
                if reversal_improves(matrix, depot, stops, start, end) {
                    if let Some(segment) = stops.get_mut(start..=end) {
                        segment.reverse();
                    }
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
    passes
}

/// Whether reversing `stops[start..=end]` strictly lowers the tour cost.
fn reversal_improves(
    matrix: &DistanceMatrix,
    depot: NodeIndex,
    stops: &[NodeIndex],
    start: usize,
    end: usize,
) -> bool {
    let Some(segment) = stops.get(start..=end) else {
        return false;
    };
    let (Some(&first), Some(&last)) = (segment.first(), segment.last()) else {
        return false;
    };
    let before = start
        .checked_sub(1)
        .and_then(|i| stops.get(i).copied())
        .unwrap_or(depot);
    let after = stops.get(end + 1).copied().unwrap_or(depot);

    let forward = segment
        .windows(2)
        .map(|pair| match pair {
            [a, b] => matrix.edge(*a, *b),
            _ => 0,
        })
        .fold(0, Cost::saturating_add);
    let backward = segment
        .windows(2)
        .map(|pair| match pair {
            [a, b] => matrix.edge(*b, *a),
            _ => 0,
        })
        .fold(0, Cost::saturating_add);

    let current = matrix
        .edge(before, first)
        .saturating_add(forward)
        .saturating_add(matrix.edge(last, after));
    let reversed = matrix
        .edge(before, last)
        .saturating_add(backward)
        .saturating_add(matrix.edge(first, after));
    reversed < current
}

fn closed_cost(matrix: &DistanceMatrix, depot: NodeIndex, stops: &[NodeIndex]) -> Cost {
    let mut path = Vec::with_capacity(stops.len() + 2);
    path.push(depot);
    path.extend_from_slice(stops);
    path.push(depot);
    matrix.path_cost(&path)
}

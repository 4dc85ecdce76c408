//! Exact tours by Held-Karp dynamic programming.

use tourplan_core::{
    CancellationToken, Cost, DistanceMatrix, NodeIndex, SolveError, Tour, TourQuality,
    TourRequest, TourSolver,
};

/// Largest node set the exact solver accepts.
///
/// The cost table holds `2^k · k` entries, so 16 nodes need roughly 8 MiB.
pub const MAX_EXACT_NODES: usize = 16;

/// Subsets processed between cancellation checks. Must be a power of two.
const CANCEL_POLL_INTERVAL: usize = 256;

/// Optimal tour solver using Held-Karp dynamic programming.
///
/// Runs in `O(2^k · k^2)` time for `k` nodes and rejects sets larger than
/// [`MAX_EXACT_NODES`]. Among tours of equal cost it returns the one whose
/// visiting order is lexicographically smallest.
///
/// # Examples
/// ```
/// use tourplan_core::{DistanceMatrix, TourRequest, TourSolver};
/// use tourplan_solver::ExactTourSolver;
///
/// let matrix = DistanceMatrix::new(vec![
///     vec![0, 10, 15],
///     vec![10, 0, 5],
///     vec![15, 5, 0],
/// ])
/// .expect("square matrix");
/// let tour = ExactTourSolver
///     .solve(&TourRequest::new(&matrix, 0, &[2, 1]))
///     .expect("valid request");
/// assert_eq!(tour.nodes(), &[0, 1, 2, 0]);
/// assert_eq!(tour.cost(), 30);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactTourSolver;

impl TourSolver for ExactTourSolver {
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
        if count > MAX_EXACT_NODES {
            return Err(SolveError::TooManyNodes {
                nodes: count,
                limit: MAX_EXACT_NODES,
            });
        }
        let mut nodes = request.nodes.to_vec();
        nodes.sort_unstable();

        let table = CostToGo::build(request.matrix, request.depot, nodes, token)?;
        let (stops, cost) = table.cheapest_tour();
        Ok(Tour::closed(request.depot, &stops, cost, TourQuality::Optimal))
    }
}

/// Held-Karp table over the sorted node set.
///
/// `best[mask * k + j]` is the cheapest cost of starting at local node `j`,
/// visiting every node in `mask` (which contains `j`) exactly once, and
/// finishing at the depot.
struct CostToGo {
    nodes: Vec<NodeIndex>,
    from_depot: Vec<Cost>,
    between: Vec<Cost>,
    best: Vec<Cost>,
}

#[expect(
    clippy::indexing_slicing,
    reason = "table offsets are bounded by 2^k · k, fixed at construction"
)]
impl CostToGo {
    fn build(
        matrix: &DistanceMatrix,
        depot: NodeIndex,
        nodes: Vec<NodeIndex>,
        token: &CancellationToken,
    ) -> Result<Self, SolveError> {
        let k = nodes.len();
        let subsets = 1_usize << k;
        let from_depot: Vec<Cost> = nodes.iter().map(|&n| matrix.edge(depot, n)).collect();
        let to_depot: Vec<Cost> = nodes.iter().map(|&n| matrix.edge(n, depot)).collect();
        let between: Vec<Cost> = nodes
            .iter()
            .flat_map(|&a| nodes.iter().map(move |&b| matrix.edge(a, b)))
            .collect();

        let mut best = vec![Cost::MAX; subsets * k];
        for (j, cost) in to_depot.iter().enumerate() {
            best[(1 << j) * k + j] = *cost;
        }

        for mask in 1..subsets {
            if mask & (CANCEL_POLL_INTERVAL - 1) == 0 && token.should_stop() {
                return Err(SolveError::Interrupted);
            }
            if mask.count_ones() < 2 {
                continue;
            }
            for j in members(mask, k) {
                let rest = mask & !(1 << j);
                let cheapest = members(rest, k)
                    .map(|i| between[j * k + i].saturating_add(best[rest * k + i]))
                    .min()
                    .unwrap_or(Cost::MAX);
                best[mask * k + j] = cheapest;
            }
        }
        if token.should_stop() {
            return Err(SolveError::Interrupted);
        }

        Ok(Self {
            nodes,
            from_depot,
            between,
            best,
        })
    }

    /// Walk the table forward, always taking the smallest node whose
    /// cost-to-go achieves the optimum.
    fn cheapest_tour(&self) -> (Vec<NodeIndex>, Cost) {
        let k = self.nodes.len();
        let full = (1_usize << k) - 1;
        let Some((total, first)) = members(full, k)
            .map(|j| (self.from_depot[j].saturating_add(self.best[full * k + j]), j))
            .min()
        else {
            return (Vec::new(), 0);
        };

        let mut stops = Vec::with_capacity(k);
        stops.push(self.nodes[first]);
        let mut mask = full;
        let mut current = first;
        loop {
            let rest = mask & !(1 << current);
            let Some((_, next)) = members(rest, k)
                .map(|i| (self.between[current * k + i].saturating_add(self.best[rest * k + i]), i))
                .min()
            else {
                break;
            };
            stops.push(self.nodes[next]);
            mask = rest;
            current = next;
        }
        (stops, total)
    }
}

/// Local indices set in `mask`, ascending.
fn members(mask: usize, k: usize) -> impl Iterator<Item = usize> {
    (0..k).filter(move |bit| mask & (1 << bit) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tourplan_core::test_support::{brute_force_tour, line_matrix, matrix, triangle_matrix};

    fn solve(matrix: &DistanceMatrix, depot: NodeIndex, nodes: &[NodeIndex]) -> Tour {
        ExactTourSolver
            .solve(&TourRequest::new(matrix, depot, nodes))
            .expect("valid request")
    }

    #[rstest]
    fn breaks_cost_ties_lexicographically() {
        let tour = solve(&triangle_matrix(), 0, &[1, 2]);
        assert_eq!(tour.nodes(), &[0, 1, 2, 0]);
        assert_eq!(tour.cost(), 30);
        assert!(tour.quality().is_optimal());
    }

    #[rstest]
    fn single_node_tour_is_out_and_back() {
        let tour = solve(&triangle_matrix(), 0, &[2]);
        assert_eq!(tour.nodes(), &[0, 2, 0]);
        assert_eq!(tour.cost(), 30);
    }

    #[rstest]
    fn follows_asymmetric_costs() {
        // Going 0 -> 2 -> 1 -> 0 is cheap; the reverse direction is not.
        let m = matrix(vec![vec![0, 50, 1], vec![1, 0, 50], vec![50, 1, 0]]);
        let tour = solve(&m, 0, &[1, 2]);
        assert_eq!(tour.nodes(), &[0, 2, 1, 0]);
        assert_eq!(tour.cost(), 3);
    }

    #[rstest]
    fn input_order_does_not_matter() {
        let m = line_matrix(&[0, 7, 3, 12, 5]);
        let forward = solve(&m, 0, &[1, 2, 3, 4]);
        let shuffled = solve(&m, 0, &[4, 2, 3, 1]);
        assert_eq!(forward, shuffled);
    }

    #[rstest]
    fn depot_need_not_be_node_zero() {
        let m = line_matrix(&[0, 7, 3, 12]);
        let tour = solve(&m, 2, &[0, 1, 3]);
        assert_eq!(tour.depot(), Some(2));
        assert_eq!(tour.cost(), 24);
    }

    #[rstest]
    fn matches_brute_force_on_ten_nodes() {
        let rows: Vec<Vec<Cost>> = (0..11_u64)
            .map(|a| {
                (0..11_u64)
                    .map(|b| if a == b { 0 } else { (a * 7 + b * 13) % 23 + 1 })
                    .collect()
            })
            .collect();
        let m = matrix(rows);
        let nodes: Vec<NodeIndex> = (1..11).collect();
        let tour = solve(&m, 0, &nodes);
        let (stops, cost) = brute_force_tour(&m, 0, &nodes);
        assert_eq!(tour.stops(), stops.as_slice());
        assert_eq!(tour.cost(), cost);
    }

    #[rstest]
    fn limit_is_sixteen_nodes() {
        assert_eq!(MAX_EXACT_NODES, 16);
    }

    #[rstest]
    fn accepts_sixteen_nodes() {
        let positions: Vec<u64> = (0..=16).collect();
        let m = line_matrix(&positions);
        let nodes: Vec<NodeIndex> = (1..=16).collect();
        let tour = solve(&m, 0, &nodes);
        assert_eq!(tour.stops(), nodes.as_slice());
        assert_eq!(tour.cost(), 32);
        assert!(tour.quality().is_optimal());
    }

    #[rstest]
    fn rejects_seventeen_nodes() {
        let positions: Vec<u64> = (0..=17).collect();
        let m = line_matrix(&positions);
        let nodes: Vec<NodeIndex> = (1..=17).collect();
        let err = ExactTourSolver
            .solve(&TourRequest::new(&m, 0, &nodes))
            .expect_err("too many nodes");
        assert_eq!(err, SolveError::TooManyNodes { nodes: 17, limit: 16 });
    }

    #[rstest]
    fn rejects_oversized_sets() {
        let positions: Vec<u64> = (0..=MAX_EXACT_NODES as u64 + 1).collect();
        let m = line_matrix(&positions);
        let nodes: Vec<NodeIndex> = (1..positions.len()).collect();
        let err = ExactTourSolver
            .solve(&TourRequest::new(&m, 0, &nodes))
            .expect_err("too many nodes");
        assert_eq!(
            err,
            SolveError::TooManyNodes {
                nodes: MAX_EXACT_NODES + 1,
                limit: MAX_EXACT_NODES
            }
        );
    }

    #[rstest]
    fn cancelled_search_is_interrupted() {
        let m = line_matrix(&[0, 1, 2, 3]);
        let token = CancellationToken::new();
        token.cancel();
        let err = ExactTourSolver
            .solve_until(&TourRequest::new(&m, 0, &[1, 2, 3]), &token)
            .expect_err("cancelled");
        assert_eq!(err, SolveError::Interrupted);
    }

    #[rstest]
    fn rejects_empty_sets() {
        let err = ExactTourSolver
            .solve(&TourRequest::new(&triangle_matrix(), 0, &[]))
            .expect_err("empty");
        assert_eq!(err, SolveError::EmptyNodeSet);
    }
}

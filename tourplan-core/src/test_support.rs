//! Test-only providers, fixtures and a brute-force tour oracle used by unit,
//! behaviour and property tests across the workspace.

use crate::{Cost, DistanceError, DistanceMatrix, DistanceProvider, JobNode, NodeIndex};

/// Deterministic `DistanceProvider` returning unit-cost edges.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitDistanceProvider;

impl DistanceProvider for UnitDistanceProvider {
    fn distance_matrix(&self, jobs: &[JobNode]) -> Result<DistanceMatrix, DistanceError> {
        if jobs.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        let n = jobs.len();
        let rows: Vec<Vec<Cost>> = (0..n)
            .map(|i| (0..n).map(|j| Cost::from(i != j)).collect())
            .collect();
        Ok(DistanceMatrix::new(rows)?)
    }
}

/// `DistanceProvider` returning a pre-built matrix.
#[derive(Debug, Clone)]
pub struct FixedDistanceProvider {
    matrix: DistanceMatrix,
}

impl FixedDistanceProvider {
    /// Serve `matrix` for every request of matching size.
    #[must_use]
    pub const fn new(matrix: DistanceMatrix) -> Self {
        Self { matrix }
    }
}

impl DistanceProvider for FixedDistanceProvider {
    fn distance_matrix(&self, jobs: &[JobNode]) -> Result<DistanceMatrix, DistanceError> {
        if jobs.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        if jobs.len() != self.matrix.len() {
            return Err(DistanceError::unavailable(format!(
                "fixed matrix covers {} nodes, {} requested",
                self.matrix.len(),
                jobs.len()
            )));
        }
        Ok(self.matrix.clone())
    }
}

/// `count` jobs numbered from zero with ids starting at 1000.
#[must_use]
pub fn sample_jobs(count: usize) -> Vec<JobNode> {
    (0..count)
        .map(|index| {
            let id = 1000 + index as u64;
            JobNode::new(index, id, format!("{index} Sample Street"))
        })
        .collect()
}

/// Build a matrix from literal rows, panicking on malformed fixtures.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures are literal and known square")]
pub fn matrix(rows: Vec<Vec<Cost>>) -> DistanceMatrix {
    DistanceMatrix::new(rows).expect("fixture matrix must be square")
}

/// The three-node symmetric matrix `d(0,1)=10, d(0,2)=15, d(1,2)=5`.
#[must_use]
pub fn triangle_matrix() -> DistanceMatrix {
    matrix(vec![vec![0, 10, 15], vec![10, 0, 5], vec![15, 5, 0]])
}

/// Nodes on a line at the given positions; cost is the absolute difference.
#[must_use]
pub fn line_matrix(positions: &[u64]) -> DistanceMatrix {
    matrix(
        positions
            .iter()
            .map(|a| positions.iter().map(|b| a.abs_diff(*b)).collect())
            .collect(),
    )
}

/// Exhaustively find the cheapest tour from `depot` through `nodes`.
///
/// Permutations are visited in lexicographic order and only strictly cheaper
/// tours replace the incumbent, so among equal-cost tours the
/// lexicographically smallest visiting order is returned. Returns the stops
/// between the depot visits and the total cost.
#[must_use]
pub fn brute_force_tour(
    matrix: &DistanceMatrix,
    depot: NodeIndex,
    nodes: &[NodeIndex],
) -> (Vec<NodeIndex>, Cost) {
    let mut order = nodes.to_vec();
    order.sort_unstable();
    let mut best = (order.clone(), closed_cost(matrix, depot, &order));
    while next_permutation(&mut order) {
        let cost = closed_cost(matrix, depot, &order);
        if cost < best.1 {
            best = (order.clone(), cost);
        }
    }
    best
}

fn closed_cost(matrix: &DistanceMatrix, depot: NodeIndex, stops: &[NodeIndex]) -> Cost {
    let mut path = Vec::with_capacity(stops.len() + 2);
    path.push(depot);
    path.extend_from_slice(stops);
    path.push(depot);
    matrix.path_cost(&path)
}

fn next_permutation(items: &mut [NodeIndex]) -> bool {
    let Some(pivot) = (1..items.len()).rev().find(|&i| items[i - 1] < items[i]) else {
        return false;
    };
    let left = pivot - 1;
    let Some(swap) = (pivot..items.len()).rev().find(|&j| items[j] > items[left]) else {
        return false;
    };
    items.swap(left, swap);
    items[pivot..].reverse();
    true
}

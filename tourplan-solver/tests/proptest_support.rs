//! Proptest strategies for assignment and tour property tests.
//!
//! Generated inputs always satisfy the engine's preconditions: square
//! matrices with zero diagonals, a depot inside the matrix and workers with
//! at least one required job.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tourplan_core::test_support::sample_jobs;
use tourplan_core::{
    Assignment, Cost, DistanceMatrix, NodeIndex, ProblemInstance, Worker,
};

/// Strategy for a possibly asymmetric matrix with `min..=max` nodes.
///
/// Off-diagonal entries lie in `1..=100`.
pub fn matrix_strategy(min: usize, max: usize) -> impl Strategy<Value = DistanceMatrix> {
    (min..=max).prop_flat_map(|size| {
        proptest::collection::vec(proptest::collection::vec(1_u64..=100, size), size).prop_map(
            |mut rows| {
                for (i, row) in rows.iter_mut().enumerate() {
                    if let Some(diagonal) = row.get_mut(i) {
                        *diagonal = 0;
                    }
                }
                DistanceMatrix::new(rows).expect("generated rows are square")
            },
        )
    })
}

/// Strategy for a symmetric matrix built from points on a 2-D grid.
///
/// Costs are Manhattan distances, so they obey the triangle inequality.
pub fn grid_matrix_strategy(min: usize, max: usize) -> impl Strategy<Value = DistanceMatrix> {
    proptest::collection::vec((0_u64..50, 0_u64..50), min..=max).prop_map(|points| {
        let rows: Vec<Vec<Cost>> = points
            .iter()
            .map(|&(ax, ay)| {
                points
                    .iter()
                    .map(|&(bx, by)| ax.abs_diff(bx) + ay.abs_diff(by))
                    .collect()
            })
            .collect();
        DistanceMatrix::new(rows).expect("generated rows are square")
    })
}

/// Strategy for a problem instance with up to `max_workers` workers.
///
/// Worker demand is drawn independently of supply, so some instances are
/// infeasible on purpose.
pub fn problem_strategy(
    max_nodes: usize,
    max_workers: usize,
) -> impl Strategy<Value = ProblemInstance> {
    (
        matrix_strategy(2, max_nodes),
        proptest::collection::vec(1_usize..=4, 1..=max_workers),
        any::<prop::sample::Index>(),
    )
        .prop_map(|(matrix, demands, depot)| {
            let depot = depot.index(matrix.len());
            let workers = demands
                .iter()
                .enumerate()
                .map(|(i, &count)| Worker::new(format!("worker-{i}"), count).expect("valid worker"))
                .collect();
            ProblemInstance::new(sample_jobs(matrix.len()), workers, matrix, depot)
                .expect("generated problem is consistent")
        })
}

/// Fail unless no node is held by two workers and the depot is never held.
pub fn assert_partition(
    problem: &ProblemInstance,
    assignment: &Assignment,
) -> Result<(), TestCaseError> {
    let mut seen: BTreeSet<NodeIndex> = BTreeSet::new();
    for entry in assignment.workers() {
        for &node in &entry.jobs {
            prop_assert!(node != problem.depot(), "depot {node} was assigned");
            prop_assert!(seen.insert(node), "node {node} assigned twice");
        }
    }
    Ok(())
}

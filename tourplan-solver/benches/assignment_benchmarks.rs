//! Criterion benchmarks for the assignment engine and tour solvers.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package tourplan-solver
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tourplan_core::{NodeIndex, TourRequest, TourSolver};
use tourplan_solver::{
    AdaptiveTourSolver, AssignmentEngine, EngineConfig, ExactTourSolver, HeuristicTourSolver,
};


use bench_support::{BENCHMARK_SEED, benchmark_problem, scattered_matrix};

/// Node counts for single-tour benchmarks.
const TOUR_SIZES: &[usize] = &[6, 10, 14];

/// `(jobs, workers, per_worker)` shapes for full assignment runs.
const ASSIGNMENT_SHAPES: &[(usize, usize, usize)] = &[(25, 4, 5), (61, 6, 8), (121, 10, 10)];

fn bench_tour_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("tour");
    for &size in TOUR_SIZES {
        let matrix = scattered_matrix(size + 1, BENCHMARK_SEED);
        let nodes: Vec<NodeIndex> = (1..=size).collect();
        let request = TourRequest::new(&matrix, 0, &nodes);
        group.bench_with_input(BenchmarkId::new("exact", size), &size, |b, _| {
            b.iter(|| ExactTourSolver.solve(&request));
        });
        group.bench_with_input(BenchmarkId::new("heuristic", size), &size, |b, _| {
            b.iter(|| HeuristicTourSolver::default().solve(&request));
        });
    }
    group.finish();
}

fn bench_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));

    for &(jobs, workers, per_worker) in ASSIGNMENT_SHAPES {
        let problem = benchmark_problem(jobs, workers, per_worker);
        let parallel = AssignmentEngine::default();
        let sequential = AssignmentEngine::with_config(
            AdaptiveTourSolver::default(),
            EngineConfig {
                parallel: false,
                ..EngineConfig::default()
            },
        );

        #[expect(
            clippy::as_conversions,
            reason = "benchmark sizes are small constants"
        )]
        let throughput_size = jobs as u64;
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(BenchmarkId::new("parallel", jobs), &jobs, |b, _| {
            b.iter(|| parallel.assign(&problem));
        });
        group.bench_with_input(BenchmarkId::new("sequential", jobs), &jobs, |b, _| {
            b.iter(|| sequential.assign(&problem));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tour_solvers, bench_assignment);
criterion_main!(benches);

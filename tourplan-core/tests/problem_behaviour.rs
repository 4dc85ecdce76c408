//! Behavioural tests for `ProblemInstance` validation using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tourplan_core::{
    DistanceMatrix, JobNode, NodeIndex, ProblemError, ProblemInstance, Worker,
};

#[derive(Debug, Default)]
struct ProblemWorld {
    jobs: RefCell<Vec<JobNode>>,
    matrix: RefCell<Option<DistanceMatrix>>,
    depot: RefCell<NodeIndex>,
    outcome: RefCell<Option<Result<ProblemInstance, ProblemError>>>,
}

impl ProblemWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn error(&self) -> ProblemError {
        self.outcome
            .borrow()
            .clone()
            .expect("problem should be built before assertions")
            .expect_err("problem should be rejected")
    }
}

fn sample_jobs(count: usize) -> Vec<JobNode> {
    (0..count)
        .map(|i| JobNode::new(i, 500 + i as u64, format!("{i} Test Road")))
        .collect()
}

fn line_matrix(size: usize) -> DistanceMatrix {
    let rows = (0..size)
        .map(|a: usize| (0..size).map(|b| a.abs_diff(b) as u64 * 3).collect())
        .collect();
    DistanceMatrix::new(rows).expect("square matrix")
}

#[fixture]
fn world() -> ProblemWorld {
    ProblemWorld::default()
}

#[given("{jobs} jobs with a {rows} by {columns} matrix")]
fn given_jobs(world: &ProblemWorld, jobs: usize, rows: usize, columns: usize) {
    assert_eq!(rows, columns, "fixture matrices are square");
    world.jobs.replace(sample_jobs(jobs));
    world.matrix.replace(Some(line_matrix(rows)));
}

#[given("job {duplicate} reuses the identifier of job {original}")]
fn given_duplicate(world: &ProblemWorld, duplicate: usize, original: usize) {
    let mut jobs = world.jobs.borrow_mut();
    let id = jobs.get(original).expect("original job").job_id;
    jobs.get_mut(duplicate).expect("duplicate job").job_id = id;
}

#[given("the depot is node {depot}")]
fn given_depot(world: &ProblemWorld, depot: NodeIndex) {
    world.depot.replace(depot);
}

#[when("the problem is built")]
fn when_built(world: &ProblemWorld) {
    let matrix = world.matrix.borrow().clone().expect("matrix should be set");
    let workers = vec![Worker::new("Ada", 1).expect("valid worker")];
    let outcome =
        ProblemInstance::new(world.jobs.borrow().clone(), workers, matrix, *world.depot.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("the problem is accepted")]
fn then_accepted(world: &ProblemWorld) {
    assert!(matches!(world.outcome.borrow().as_ref(), Some(Ok(_))));
}

#[then("the candidate nodes are {nodes}")]
fn then_candidates(world: &ProblemWorld, nodes: String) {
    let expected: Vec<NodeIndex> = nodes
        .split(',')
        .map(|n| n.trim().parse().expect("node index"))
        .collect();
    let outcome = world.outcome.borrow();
    let problem = outcome
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("problem should be accepted");
    assert_eq!(problem.candidate_nodes().collect::<Vec<_>>(), expected);
}

#[then("the problem is rejected because the matrix does not fit the jobs")]
fn then_dimension_mismatch(world: &ProblemWorld) {
    assert!(matches!(world.error(), ProblemError::DimensionMismatch { .. }));
}

#[then("the problem is rejected because the depot is out of range")]
fn then_depot_out_of_range(world: &ProblemWorld) {
    assert!(matches!(world.error(), ProblemError::DepotOutOfRange { .. }));
}

#[then("the problem is rejected because a job id repeats")]
fn then_duplicate_id(world: &ProblemWorld) {
    assert!(matches!(world.error(), ProblemError::DuplicateJobId { .. }));
}

#[scenario(path = "tests/features/problem.feature", index = 0)]
fn consistent_problem(world: ProblemWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/problem.feature", index = 1)]
fn mismatched_matrix(world: ProblemWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/problem.feature", index = 2)]
fn depot_out_of_range(world: ProblemWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/problem.feature", index = 3)]
fn repeated_job_ids(world: ProblemWorld) {
    let _ = world;
}

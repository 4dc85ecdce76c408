//! Behavioural tests for `AssignmentEngine` using rstest-bdd.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tourplan_core::test_support::{sample_jobs, triangle_matrix};
use tourplan_core::{
    Assignment, AssignmentStatus, CancellationToken, DistanceMatrix, NodeIndex, ProblemInstance,
    Worker, WorkerAssignment,
};
use tourplan_solver::{
    AdaptiveTourSolver, AssignError, AssignmentEngine, EngineConfig, ShortfallPolicy,
};

/// World state shared by assignment scenarios.
#[derive(Debug, Default)]
struct AssignmentWorld {
    matrix: RefCell<Option<(DistanceMatrix, NodeIndex)>>,
    workers: RefCell<Vec<Worker>>,
    config: RefCell<EngineConfig>,
    token: RefCell<CancellationToken>,
    outcome: RefCell<Option<Result<Assignment, AssignError>>>,
}

impl AssignmentWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn entry(&self, name: &str) -> WorkerAssignment {
        let clean = name.trim_matches('"');
        let outcome = self.outcome.borrow();
        let assignment = outcome
            .as_ref()
            .expect("assignment should run before assertions")
            .as_ref()
            .expect("assignment should succeed");
        assignment
            .workers()
            .iter()
            .find(|w| w.worker.name == clean)
            .cloned()
            .expect("worker should be present")
    }
}

#[fixture]
fn world() -> AssignmentWorld {
    AssignmentWorld::default()
}

#[given("the triangle job matrix with depot {depot}")]
fn given_triangle(world: &AssignmentWorld, depot: NodeIndex) {
    world.matrix.replace(Some((triangle_matrix(), depot)));
}

#[given("a worker named {name} who needs {count} jobs")]
fn given_worker(world: &AssignmentWorld, name: String, count: usize) {
    let worker = Worker::new(name.trim_matches('"'), count).expect("valid worker");
    world.workers.borrow_mut().push(worker);
}

#[given("partial assignment is allowed")]
fn given_partial(world: &AssignmentWorld) {
    world.config.borrow_mut().shortfall = ShortfallPolicy::AssignPartial;
}

#[given("the run is cancelled before it starts")]
fn given_cancelled(world: &AssignmentWorld) {
    world.token.borrow().cancel();
}

#[when("the jobs are assigned")]
fn when_assigned(world: &AssignmentWorld) {
    let (matrix, depot) = world.matrix.borrow().clone().expect("matrix should be set");
    let jobs = sample_jobs(matrix.len());
    let problem = ProblemInstance::new(jobs, world.workers.borrow().clone(), matrix, depot)
        .expect("consistent problem");
    let engine = AssignmentEngine::with_config(AdaptiveTourSolver::default(), *world.config.borrow());
    let outcome = engine.assign_with_cancel(&problem, &world.token.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("{name} visits {route}")]
fn then_visits(world: &AssignmentWorld, name: String, route: String) {
    let expected: Vec<NodeIndex> = route
        .split("->")
        .map(|n| n.trim().parse().expect("route is a list of node indices"))
        .collect();
    let entry = world.entry(&name);
    let tour = entry.tour.expect("worker should have a tour");
    assert_eq!(tour.nodes(), expected.as_slice());
}

#[then("{name} has tour cost {cost}")]
fn then_cost(world: &AssignmentWorld, name: String, cost: u64) {
    assert_eq!(world.entry(&name).cost(), cost);
}

#[then("{name} holds node {node}")]
fn then_holds(world: &AssignmentWorld, name: String, node: NodeIndex) {
    let entry = world.entry(&name);
    assert_eq!(entry.jobs.into_iter().collect::<Vec<_>>(), vec![node]);
}

#[then("every worker is complete")]
fn then_complete(world: &AssignmentWorld) {
    let outcome = world.outcome.borrow();
    let assignment = outcome
        .as_ref()
        .and_then(|r| r.as_ref().ok())
        .expect("assignment should succeed");
    assert!(assignment.is_complete());
}

#[then("{name} is under-assigned with {assigned} of {required} jobs")]
fn then_under_assigned(world: &AssignmentWorld, name: String, assigned: usize, required: usize) {
    let entry = world.entry(&name);
    assert!(matches!(
        entry.status,
        AssignmentStatus::UnderAssigned { required: r, assigned: a, .. } if r == required && a == assigned
    ));
    assert_eq!(entry.jobs.len(), assigned);
}

#[then("{name} has no tour")]
fn then_no_tour(world: &AssignmentWorld, name: String) {
    assert!(world.entry(&name).tour.is_none());
}

#[then("{name} has an approximate tour")]
fn then_approximate(world: &AssignmentWorld, name: String) {
    assert!(world.entry(&name).is_approximate());
}

#[scenario(path = "tests/features/assignment.feature", index = 0)]
fn single_worker_cheapest_tour(world: AssignmentWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/assignment.feature", index = 1)]
fn workers_never_share(world: AssignmentWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/assignment.feature", index = 2)]
fn unsatisfiable_worker_left_empty(world: AssignmentWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/assignment.feature", index = 3)]
fn partial_assignment(world: AssignmentWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/assignment.feature", index = 4)]
fn cancelled_run_finishes(world: AssignmentWorld) {
    let _ = world;
}

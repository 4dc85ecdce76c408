//! Facade crate for the Tourplan job assignment engine.
//!
//! This crate re-exports the core domain types and, behind the `solver`
//! feature, the tour solvers and the assignment engine.

#![forbid(unsafe_code)]

pub use tourplan_core::{
    ApproximationReason, Assignment, AssignmentStatus, CancellationToken, Cost, Diagnostics,
    DistanceError, DistanceMatrix, DistanceProvider, JobNode, MatrixError, NodeIndex,
    ProblemError, ProblemInstance, SolveError, Tour, TourQuality, TourRequest, TourSolver,
    Worker, WorkerAssignment, WorkerError,
};

#[cfg(feature = "solver")]
pub use tourplan_solver::{
    AdaptiveSolverConfig, AdaptiveTourSolver, AssignError, AssignmentEngine, EngineConfig,
    ExactTourSolver, HeuristicSolverConfig, HeuristicTourSolver, MAX_EXACT_NODES,
    ShortfallPolicy,
};

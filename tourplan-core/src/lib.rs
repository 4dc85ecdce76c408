//! Core domain types for the Tourplan engine.
//!
//! These models provide basic validation to keep downstream components
//! honest. Constructors return `Result` to surface invalid input early, so the
//! solvers can rely on square matrices and in-range indices.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assignment;
pub mod cancel;
pub mod distance;
pub mod job;
pub mod matrix;
pub mod problem;
pub mod solver;
pub mod tour;
pub mod worker;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use assignment::{Assignment, AssignmentStatus, Diagnostics, WorkerAssignment};
pub use cancel::CancellationToken;
pub use distance::{DistanceError, DistanceProvider};
pub use job::{JobNode, NodeIndex};
pub use matrix::{Cost, DistanceMatrix, MatrixError};
pub use problem::{ProblemError, ProblemInstance};
pub use solver::{SolveError, TourRequest, TourSolver};
pub use tour::{ApproximationReason, Tour, TourQuality};
pub use worker::{Worker, WorkerError};

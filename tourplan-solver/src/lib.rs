//! Tour solvers and the job assignment engine for Tourplan.
//!
//! This crate provides three implementations of
//! [`TourSolver`](tourplan_core::TourSolver):
//!
//! - [`ExactTourSolver`] runs Held-Karp dynamic programming over node subsets,
//!   `O(2^k · k^2)` time and `O(2^k · k)` memory for `k` nodes, and returns
//!   the cheapest tour with ties broken by the lexicographically smallest
//!   visiting order.
//! - [`HeuristicTourSolver`] builds a nearest-neighbour tour and improves it
//!   with 2-opt. Its tours are flagged approximate.
//! - [`AdaptiveTourSolver`] picks between the two by node count and falls
//!   back to the heuristic when an exact search runs out of time.
//!
//! [`AssignmentEngine`] grows each worker's job set one node at a time,
//! evaluating every unclaimed candidate with a tour solve. Those evaluations
//! dominate the run time (`O(W · k · J)` solves for `W` workers needing up to
//! `k` of `J` jobs) and are spread across a `rayon` pool.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adaptive;
mod engine;
mod exact;
mod heuristic;

pub use adaptive::{AdaptiveSolverConfig, AdaptiveTourSolver};
pub use engine::{AssignError, AssignmentEngine, EngineConfig, ShortfallPolicy};
pub use exact::{ExactTourSolver, MAX_EXACT_NODES};
pub use heuristic::{HeuristicSolverConfig, HeuristicTourSolver};

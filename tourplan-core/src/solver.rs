//! The tour-solving capability shared by exact and approximate solvers.

use std::collections::HashSet;

use thiserror::Error;

use crate::{CancellationToken, DistanceMatrix, NodeIndex, Tour};

/// Parameters for a single tour solve.
///
/// The depot is implicitly the first and last stop and must not appear in
/// `nodes`.
///
/// # Examples
/// ```rust
/// use tourplan_core::{DistanceMatrix, TourRequest};
///
/// let matrix = DistanceMatrix::new(vec![vec![0, 1], vec![1, 0]]).expect("square");
/// let request = TourRequest::new(&matrix, 0, &[1]);
/// assert!(request.validate().is_ok());
/// assert!(TourRequest::new(&matrix, 0, &[]).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TourRequest<'a> {
    /// Travel costs between all nodes.
    pub matrix: &'a DistanceMatrix,
    /// Start and end of the tour.
    pub depot: NodeIndex,
    /// Nodes to visit exactly once.
    pub nodes: &'a [NodeIndex],
}

impl<'a> TourRequest<'a> {
    /// Bundle a matrix, depot and node set.
    #[must_use]
    pub const fn new(matrix: &'a DistanceMatrix, depot: NodeIndex, nodes: &'a [NodeIndex]) -> Self {
        Self {
            matrix,
            depot,
            nodes,
        }
    }

    /// Check the request describes a tour that can exist.
    ///
    /// # Errors
    /// Returns [`SolveError::EmptyNodeSet`] for no nodes,
    /// [`SolveError::NodeOutOfRange`] when the depot or a node lies outside
    /// the matrix, [`SolveError::DepotInNodeSet`] when the node set names the
    /// depot and [`SolveError::DuplicateNode`] for a repeated node.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.nodes.is_empty() {
            return Err(SolveError::EmptyNodeSet);
        }
        let size = self.matrix.len();
        if !self.matrix.contains(self.depot) {
            return Err(SolveError::NodeOutOfRange {
                node: self.depot,
                size,
            });
        }
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for &node in self.nodes {
            if !self.matrix.contains(node) {
                return Err(SolveError::NodeOutOfRange { node, size });
            }
            if node == self.depot {
                return Err(SolveError::DepotInNodeSet { depot: node });
            }
            if !seen.insert(node) {
                return Err(SolveError::DuplicateNode { node });
            }
        }
        Ok(())
    }
}

/// Errors returned by [`TourSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// No nodes to visit; there is no tour to return.
    #[error("node set must contain at least one node")]
    EmptyNodeSet,
    /// A node (or the depot) does not index the matrix.
    #[error("node {node} is outside a {size}-node distance matrix")]
    NodeOutOfRange {
        /// Offending index.
        node: NodeIndex,
        /// Matrix dimension.
        size: usize,
    },
    /// The depot was listed among the nodes to visit.
    #[error("depot {depot} must not be listed in the node set")]
    DepotInNodeSet {
        /// Depot index.
        depot: NodeIndex,
    },
    /// A node was listed twice.
    #[error("node {node} appears more than once in the node set")]
    DuplicateNode {
        /// Offending index.
        node: NodeIndex,
    },
    /// The node set is too large for this solver.
    #[error("{nodes} nodes exceeds this solver's limit of {limit}")]
    TooManyNodes {
        /// Requested node count.
        nodes: usize,
        /// Largest supported count.
        limit: usize,
    },
    /// The search was cancelled or ran past its deadline.
    #[error("tour search interrupted before completion")]
    Interrupted,
}

/// Find the cheapest closed tour from a depot through a node set.
///
/// Implementations must be pure functions of the request: identical requests
/// yield identical tours. Solvers must be `Send + Sync` so candidate
/// evaluations can run on a thread pool.
pub trait TourSolver: Send + Sync {
    /// Solve a request, producing a tour or an error.
    fn solve(&self, request: &TourRequest<'_>) -> Result<Tour, SolveError>;

    /// Solve a request, giving up when `token` says so.
    ///
    /// The default ignores the token; solvers with long search loops should
    /// poll it and return [`SolveError::Interrupted`] or degrade gracefully.
    fn solve_until(
        &self,
        request: &TourRequest<'_>,
        _token: &CancellationToken,
    ) -> Result<Tour, SolveError> {
        self.solve(request)
    }
}

impl<S: TourSolver + ?Sized> TourSolver for &S {
    fn solve(&self, request: &TourRequest<'_>) -> Result<Tour, SolveError> {
        (**self).solve(request)
    }

    fn solve_until(
        &self,
        request: &TourRequest<'_>,
        token: &CancellationToken,
    ) -> Result<Tour, SolveError> {
        (**self).solve_until(request, token)
    }
}

impl<S: TourSolver + ?Sized> TourSolver for Box<S> {
    fn solve(&self, request: &TourRequest<'_>) -> Result<Tour, SolveError> {
        (**self).solve(request)
    }

    fn solve_until(
        &self,
        request: &TourRequest<'_>,
        token: &CancellationToken,
    ) -> Result<Tour, SolveError> {
        (**self).solve_until(request, token)
    }
}

//! Results of partitioning jobs among workers.

use std::collections::BTreeSet;
use std::time::Duration;

use crate::{NodeIndex, Tour, Worker};

/// Whether a worker received the number of jobs they required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "status"))]
pub enum AssignmentStatus {
    /// Exactly `required_jobs` nodes were assigned.
    Complete,
    /// Too few unclaimed nodes remained when the worker's turn came.
    UnderAssigned {
        /// Jobs the worker asked for.
        required: usize,
        /// Jobs actually committed.
        assigned: usize,
        /// Unclaimed nodes left when the worker's turn came.
        available: usize,
    },
}

impl AssignmentStatus {
    /// `true` for [`AssignmentStatus::Complete`].
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// One worker's committed jobs and the tour through them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkerAssignment {
    /// The worker.
    pub worker: Worker,
    /// Committed job nodes.
    pub jobs: BTreeSet<NodeIndex>,
    /// Tour over `jobs` from the depot; `None` when `jobs` is empty.
    pub tour: Option<Tour>,
    /// Whether the required count was met.
    pub status: AssignmentStatus,
}

impl WorkerAssignment {
    /// Tour cost, zero when the worker has no tour.
    #[must_use]
    pub fn cost(&self) -> u64 {
        self.tour.as_ref().map_or(0, Tour::cost)
    }

    /// Whether the worker's tour is flagged approximate.
    #[must_use]
    pub fn is_approximate(&self) -> bool {
        self.tour.as_ref().is_some_and(|t| !t.quality().is_optimal())
    }
}

/// Metadata about an assignment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostics {
    /// Wall-clock time spent assigning.
    pub solve_time: Duration,
    /// Number of tour solves performed, final tours included.
    pub tour_evaluations: u64,
}

/// The full partition of jobs among workers, in worker input order.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use tourplan_core::{
///     Assignment, AssignmentStatus, Diagnostics, Tour, TourQuality, Worker, WorkerAssignment,
/// };
///
/// let entry = WorkerAssignment {
///     worker: Worker::new("Ada", 1).expect("valid worker"),
///     jobs: BTreeSet::from([2]),
///     tour: Some(Tour::closed(0, &[2], 8, TourQuality::Optimal)),
///     status: AssignmentStatus::Complete,
/// };
/// let assignment = Assignment::new(vec![entry], Diagnostics::default());
/// assert!(assignment.is_complete());
/// assert_eq!(assignment.total_cost(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    workers: Vec<WorkerAssignment>,
    diagnostics: Diagnostics,
}

impl Assignment {
    /// Bundle per-worker results with run diagnostics.
    #[must_use]
    pub const fn new(workers: Vec<WorkerAssignment>, diagnostics: Diagnostics) -> Self {
        Self {
            workers,
            diagnostics,
        }
    }

    /// Per-worker results in input order.
    #[must_use]
    pub fn workers(&self) -> &[WorkerAssignment] {
        &self.workers
    }

    /// Run metadata.
    #[must_use]
    pub const fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Whether every worker received their full count.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.workers.iter().all(|w| w.status.is_complete())
    }

    /// Workers whose count could not be met.
    pub fn under_assigned(&self) -> impl Iterator<Item = &WorkerAssignment> {
        self.workers.iter().filter(|w| !w.status.is_complete())
    }

    /// Workers whose tour is not proven optimal.
    pub fn approximate(&self) -> impl Iterator<Item = &WorkerAssignment> {
        self.workers.iter().filter(|w| w.is_approximate())
    }

    /// Every assigned node across all workers.
    #[must_use]
    pub fn assigned_nodes(&self) -> BTreeSet<NodeIndex> {
        self.workers
            .iter()
            .flat_map(|w| w.jobs.iter().copied())
            .collect()
    }

    /// Sum of all worker tour costs, saturating.
    #[must_use]
    pub fn total_cost(&self) -> u64 {
        self.workers
            .iter()
            .map(WorkerAssignment::cost)
            .fold(0, u64::saturating_add)
    }
}

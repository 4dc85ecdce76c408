//! Distance provider trait for job nodes.

use crate::{DistanceMatrix, JobNode};

use super::error::DistanceError;

/// Fetch pairwise travel costs for a set of jobs.
///
/// Implementers must return a square `n×n` matrix where `n == jobs.len()`.
/// `cost(i, j)` is the travel cost from `jobs[i]` to `jobs[j]`.
///
/// # Examples
///
/// ```rust
/// use tourplan_core::{DistanceError, DistanceMatrix, DistanceProvider, JobNode};
///
/// struct UnitProvider;
///
/// impl DistanceProvider for UnitProvider {
///     fn distance_matrix(&self, jobs: &[JobNode]) -> Result<DistanceMatrix, DistanceError> {
///         if jobs.is_empty() {
///             return Err(DistanceError::EmptyInput);
///         }
///         let n = jobs.len();
///         let rows: Vec<Vec<u64>> = (0..n)
///             .map(|i| (0..n).map(|j| u64::from(i != j)).collect())
///             .collect();
///         Ok(DistanceMatrix::new(rows)?)
///     }
/// }
///
/// let job = JobNode::new(0, 1, "Depot");
/// let matrix = UnitProvider.distance_matrix(&[job])?;
/// assert_eq!(matrix.len(), 1);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DistanceProvider {
    /// Return a matrix of travel costs for `jobs`.
    ///
    /// Implementations must return `Err(DistanceError::EmptyInput)` when
    /// `jobs` is empty.
    fn distance_matrix(&self, jobs: &[JobNode]) -> Result<DistanceMatrix, DistanceError>;
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for &P {
    fn distance_matrix(&self, jobs: &[JobNode]) -> Result<DistanceMatrix, DistanceError> {
        (**self).distance_matrix(jobs)
    }
}

//! Workers and the number of jobs each one must take.

use thiserror::Error;

/// A worker who must be given exactly `required_jobs` jobs.
///
/// # Examples
/// ```
/// use tourplan_core::Worker;
///
/// # fn main() -> Result<(), tourplan_core::WorkerError> {
/// let worker = Worker::new("Ada", 3)?;
/// assert_eq!(worker.required_jobs, 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Worker {
    /// Display name.
    pub name: String,
    /// Number of jobs the worker must receive.
    pub required_jobs: usize,
}

/// Errors returned by [`Worker::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    /// The worker name was blank.
    #[error("worker name must not be empty")]
    EmptyName,
    /// The worker asked for zero jobs.
    #[error("worker {name:?} must require at least one job")]
    ZeroRequiredJobs {
        /// Offending worker.
        name: String,
    },
}

impl Worker {
    /// Validates and constructs a [`Worker`].
    pub fn new(display_name: impl Into<String>, required_jobs: usize) -> Result<Self, WorkerError> {
        let name = display_name.into();
        if name.trim().is_empty() {
            return Err(WorkerError::EmptyName);
        }
        if required_jobs == 0 {
            return Err(WorkerError::ZeroRequiredJobs { name });
        }
        Ok(Self {
            name,
            required_jobs,
        })
    }
}

//! File-backed inputs for the Tourplan engine.
//!
//! Responsibilities:
//! - Load worker and job lists from JSON.
//! - Read and write distance matrix cache files.
//! - Adapt those files to [`tourplan_core::DistanceProvider`].
//!
//! Boundaries:
//! - Assignment rules live in `tourplan-core` and `tourplan-solver`.
//! - All filesystem access goes through `tourplan-fs`.

#![forbid(unsafe_code)]

mod error;
mod input;
mod matrix_cache;
mod provider;

pub use error::DataError;
pub use input::{JobRecord, WorkerRecord, load_jobs, load_workers};
pub use matrix_cache::{MatrixCache, cache_file_name, read_matrix, write_matrix};
pub use provider::{CachedDistanceProvider, FileDistanceProvider};

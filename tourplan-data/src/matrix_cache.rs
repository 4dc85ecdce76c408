//! Distance matrix cache files.
//!
//! A cache file is a JSON object holding the job ids the matrix was built
//! for, in matrix order, and the matrix rows:
//!
//! ```json
//! { "job_ids": [101, 102], "rows": [[0, 420.5], [415, 0]] }
//! ```
//!
//! Entries may be fractional; they are rounded to whole cost units on load.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tourplan_core::{Cost, DistanceMatrix, JobNode};

use crate::DataError;
use crate::input::read_json;

/// Decoded contents of a matrix cache file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatrixCache {
    /// Job ids in matrix order.
    pub job_ids: Vec<u64>,
    /// Matrix rows.
    pub rows: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct MatrixCacheOut<'a> {
    job_ids: &'a [u64],
    rows: Vec<Vec<Cost>>,
}

/// Conventional cache file name for a job list:
/// `distance_IDs_{min}_to_{max}.json` over the job ids.
///
/// Returns `None` for an empty job list.
///
/// # Examples
/// ```
/// use tourplan_core::JobNode;
/// use tourplan_data::cache_file_name;
///
/// let jobs = vec![JobNode::new(0, 40, "Depot"), JobNode::new(1, 12, "Site")];
/// assert_eq!(cache_file_name(&jobs).as_deref(), Some("distance_IDs_12_to_40.json"));
/// ```
#[must_use]
pub fn cache_file_name(jobs: &[JobNode]) -> Option<String> {
    let min = jobs.iter().map(|j| j.job_id).min()?;
    let max = jobs.iter().map(|j| j.job_id).max()?;
    Some(format!("distance_IDs_{min}_to_{max}.json"))
}

/// Read a cached matrix and check it was built for `jobs`.
///
/// # Errors
/// Returns [`DataError::CacheMismatch`] when the recorded ids differ from the
/// job list, [`DataError::Matrix`] when the rows are malformed, and I/O or
/// parse errors otherwise.
pub fn read_matrix(path: &Utf8Path, jobs: &[JobNode]) -> Result<DistanceMatrix, DataError> {
    let cache: MatrixCache = read_json(path)?;
    let expected: Vec<u64> = jobs.iter().map(|j| j.job_id).collect();
    if cache.job_ids != expected {
        return Err(DataError::CacheMismatch {
            path: path.to_path_buf(),
            expected,
            found: cache.job_ids,
        });
    }
    DistanceMatrix::try_from_real(cache.rows).map_err(|source| DataError::Matrix {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `matrix` as the cache for `jobs`, creating parent directories.
///
/// # Errors
/// Returns [`DataError`] if encoding or writing fails.
pub fn write_matrix(
    path: &Utf8Path,
    jobs: &[JobNode],
    matrix: &DistanceMatrix,
) -> Result<(), DataError> {
    let job_ids: Vec<u64> = jobs.iter().map(|j| j.job_id).collect();
    let out = MatrixCacheOut {
        job_ids: &job_ids,
        rows: matrix.to_rows(),
    };
    let text = serde_json::to_string(&out).map_err(DataError::Encode)?;
    tourplan_fs::write_string(path, &text).map_err(|err| DataError::io(path, err))?;
    log::info!("cached {}x{} distance matrix at {path}", matrix.len(), matrix.len());
    Ok(())
}

//! Errors raised while reading or writing Tourplan data files.

use camino::Utf8PathBuf;
use thiserror::Error;
use tourplan_core::{MatrixError, WorkerError};

/// Errors from the data layer.
#[derive(Debug, Error)]
pub enum DataError {
    /// Reading or writing a file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File involved.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A file did not contain the expected JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File involved.
        path: Utf8PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A CSV list had a malformed header or row.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        /// File involved.
        path: Utf8PathBuf,
        /// Underlying decoding failure, with its line position.
        #[source]
        source: csv::Error,
    },
    /// A matrix could not be encoded.
    #[error("failed to encode distance matrix: {0}")]
    Encode(#[source] serde_json::Error),
    /// A worker record was invalid.
    #[error("worker record {position} is invalid: {source}")]
    Worker {
        /// Zero-based record position.
        position: usize,
        /// Validation failure.
        #[source]
        source: WorkerError,
    },
    /// The job list was empty.
    #[error("job list {path} is empty")]
    NoJobs {
        /// File involved.
        path: Utf8PathBuf,
    },
    /// A cached matrix was malformed.
    #[error("distance matrix in {path} is invalid: {source}")]
    Matrix {
        /// File involved.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: MatrixError,
    },
    /// A cached matrix belongs to a different job list.
    #[error("distance matrix in {path} was built for jobs {found:?}, expected {expected:?}")]
    CacheMismatch {
        /// File involved.
        path: Utf8PathBuf,
        /// Job ids in the current job list.
        expected: Vec<u64>,
        /// Job ids recorded in the cache.
        found: Vec<u64>,
    },
}

impl DataError {
    pub(crate) fn io(path: &camino::Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &camino::Utf8Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &camino::Utf8Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the error means the file simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

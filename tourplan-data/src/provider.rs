//! `DistanceProvider` adapters over matrix cache files.

use camino::{Utf8Path, Utf8PathBuf};
use tourplan_core::{DistanceError, DistanceMatrix, DistanceProvider, JobNode};

use crate::matrix_cache::{cache_file_name, read_matrix, write_matrix};

/// Serves the matrix stored in a single cache file.
///
/// The file must have been written for exactly the requested jobs, in order.
#[derive(Debug, Clone)]
pub struct FileDistanceProvider {
    path: Utf8PathBuf,
}

impl FileDistanceProvider {
    /// Provider reading `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The cache file this provider reads.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl DistanceProvider for FileDistanceProvider {
    fn distance_matrix(&self, jobs: &[JobNode]) -> Result<DistanceMatrix, DistanceError> {
        if jobs.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        read_matrix(&self.path, jobs).map_err(|err| DistanceError::unavailable(err.to_string()))
    }
}

/// Caches another provider's matrices on disk.
///
/// Matrices are stored in `cache_dir` under [`cache_file_name`]. A readable
/// cache built for the same job ids is returned as is; otherwise the inner
/// provider is asked and its answer written back. Failing to write the cache
/// is logged and does not fail the request.
#[derive(Debug, Clone)]
pub struct CachedDistanceProvider<P> {
    cache_dir: Utf8PathBuf,
    inner: P,
}

impl<P: DistanceProvider> CachedDistanceProvider<P> {
    /// Wrap `inner`, caching in `cache_dir`.
    #[must_use]
    pub fn new(cache_dir: impl Into<Utf8PathBuf>, inner: P) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            inner,
        }
    }

    /// Cache file used for `jobs`, or `None` for an empty list.
    #[must_use]
    pub fn cache_path(&self, jobs: &[JobNode]) -> Option<Utf8PathBuf> {
        cache_file_name(jobs).map(|name| self.cache_dir.join(name))
    }

    fn cached(path: &Utf8Path, jobs: &[JobNode]) -> Option<DistanceMatrix> {
        match tourplan_fs::file_is_file(path) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(err) => {
                log::warn!("cannot inspect distance cache {path}: {err}");
                return None;
            }
        }
        match read_matrix(path, jobs) {
            Ok(matrix) => {
                log::debug!("using cached distance matrix {path}");
                Some(matrix)
            }
            Err(err) => {
                log::warn!("ignoring distance cache: {err}");
                None
            }
        }
    }
}

impl<P: DistanceProvider> DistanceProvider for CachedDistanceProvider<P> {
    fn distance_matrix(&self, jobs: &[JobNode]) -> Result<DistanceMatrix, DistanceError> {
        let Some(path) = self.cache_path(jobs) else {
            return Err(DistanceError::EmptyInput);
        };
        if let Some(matrix) = Self::cached(&path, jobs) {
            return Ok(matrix);
        }
        let matrix = self.inner.distance_matrix(jobs)?;
        if let Err(err) = write_matrix(&path, jobs, &matrix) {
            log::warn!("could not write distance cache: {err}");
        }
        Ok(matrix)
    }
}

//! Temporary input files for CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use tempfile::TempDir;

/// Job ids and addresses of the triangle fixture; the first entry is the
/// depot.
pub(super) const TRIANGLE_JOBS: [(u64, &str); 3] = [
    (100, "Depot"),
    (101, "1 North Road"),
    (102, "2 South Road"),
];

/// Rows of the triangle fixture: depot to north 10, depot to south 15,
/// north to south 5.
pub(super) fn triangle_rows() -> serde_json::Value {
    json!([[0, 10, 15], [10, 0, 5], [15, 5, 0]])
}

/// A temporary directory holding worker, job and matrix files.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn workers_path(&self) -> Utf8PathBuf {
        self.root.join("workers.json")
    }

    pub(super) fn jobs_path(&self) -> Utf8PathBuf {
        self.root.join("jobs.json")
    }

    pub(super) fn matrix_path(&self) -> Utf8PathBuf {
        self.root.join("matrix.json")
    }

    pub(super) fn write_workers(&self, workers: &[(&str, usize)]) {
        let records: Vec<_> = workers
            .iter()
            .map(|(name, jobs)| json!({ "name": name, "jobs": jobs }))
            .collect();
        write_json(&self.workers_path(), &json!(records));
    }

    pub(super) fn write_triangle_jobs(&self) {
        let records: Vec<_> = TRIANGLE_JOBS
            .iter()
            .map(|(id, address)| json!({ "id": id, "address": address }))
            .collect();
        write_json(&self.jobs_path(), &json!(records));
    }

    /// Write the triangle matrix to `path` as a cache file.
    pub(super) fn write_triangle_matrix(&self, path: &Utf8Path) {
        let ids: Vec<u64> = TRIANGLE_JOBS.iter().map(|(id, _)| *id).collect();
        write_json(path, &json!({ "job_ids": ids, "rows": triangle_rows() }));
    }
}

pub(super) fn write_json(path: &Utf8Path, value: &serde_json::Value) {
    let payload = serde_json::to_string_pretty(value).expect("encode json");
    std::fs::write(path, payload).expect("write json fixture");
}

//! Worker and job list loaders.
//!
//! Lists are JSON arrays of records, or CSV files with a header row when the
//! path ends in `.csv`. Worker CSV columns are `worker_name,number_of_jobs`;
//! job CSV columns are `job_ID,address`.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use tourplan_core::{JobNode, Worker};

use crate::DataError;

/// One entry of a worker list file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    /// Display name.
    pub name: String,
    /// Number of jobs the worker must receive.
    pub jobs: usize,
}

/// One entry of a job list file. The matrix index is the entry's position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// External job identifier.
    pub id: u64,
    /// Human-readable location.
    pub address: String,
}

#[derive(Debug, Deserialize)]
struct WorkerRow {
    worker_name: String,
    number_of_jobs: usize,
}

impl From<WorkerRow> for WorkerRecord {
    fn from(row: WorkerRow) -> Self {
        Self {
            name: row.worker_name,
            jobs: row.number_of_jobs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(rename = "job_ID")]
    job_id: u64,
    address: String,
}

impl From<JobRow> for JobRecord {
    fn from(row: JobRow) -> Self {
        Self {
            id: row.job_id,
            address: row.address,
        }
    }
}

/// Load and validate a list of [`WorkerRecord`]s.
///
/// # Errors
/// Returns [`DataError`] if the file cannot be read or parsed, or a record
/// fails [`Worker::new`] validation.
pub fn load_workers(path: &Utf8Path) -> Result<Vec<Worker>, DataError> {
    let records: Vec<WorkerRecord> = read_records::<WorkerRecord, WorkerRow>(path)?;
    let workers = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            Worker::new(record.name, record.jobs)
                .map_err(|source| DataError::Worker { position, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("loaded {} workers from {path}", workers.len());
    Ok(workers)
}

/// Load a list of [`JobRecord`]s as job nodes indexed by position.
///
/// # Errors
/// Returns [`DataError`] if the file cannot be read or parsed, or holds no
/// jobs.
pub fn load_jobs(path: &Utf8Path) -> Result<Vec<JobNode>, DataError> {
    let records: Vec<JobRecord> = read_records::<JobRecord, JobRow>(path)?;
    if records.is_empty() {
        return Err(DataError::NoJobs {
            path: path.to_path_buf(),
        });
    }
    let jobs: Vec<JobNode> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| JobNode::new(index, record.id, record.address))
        .collect();
    log::debug!("loaded {} jobs from {path}", jobs.len());
    Ok(jobs)
}

/// Read `path` as a JSON array of `T`, or as CSV rows of `R` when the
/// extension is `csv`.
fn read_records<T, R>(path: &Utf8Path) -> Result<Vec<T>, DataError>
where
    T: serde::de::DeserializeOwned + From<R>,
    R: serde::de::DeserializeOwned,
{
    if is_csv(path) {
        let rows: Vec<R> = read_csv(path)?;
        Ok(rows.into_iter().map(T::from).collect())
    } else {
        read_json(path)
    }
}

fn is_csv(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_csv<R: serde::de::DeserializeOwned>(path: &Utf8Path) -> Result<Vec<R>, DataError> {
    let text = tourplan_fs::read_to_string(path).map_err(|err| DataError::io(path, err))?;
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(|err| DataError::csv(path, err))
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Utf8Path) -> Result<T, DataError> {
    let text = tourplan_fs::read_to_string(path).map_err(|err| DataError::io(path, err))?;
    serde_json::from_str(&text).map_err(|err| DataError::parse(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp() -> TempDir {
        TempDir::new().expect("temp dir")
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        let path = root.join(name);
        tourplan_fs::write_string(&path, contents).expect("write fixture");
        path
    }

    #[rstest]
    fn loads_workers(temp: TempDir) {
        let path = write(
            &temp,
            "workers.json",
            r#"[{"name":"Ada","jobs":2},{"name":"Grace","jobs":1}]"#,
        );
        let workers = load_workers(&path).expect("load");
        assert_eq!(workers.len(), 2);
        assert_eq!(workers.first().map(|w| w.required_jobs), Some(2));
    }

    #[rstest]
    fn rejects_zero_job_workers(temp: TempDir) {
        let path = write(&temp, "workers.json", r#"[{"name":"Ada","jobs":0}]"#);
        let err = load_workers(&path).expect_err("zero jobs");
        assert!(matches!(err, DataError::Worker { position: 0, .. }));
    }

    #[rstest]
    fn loads_jobs_in_file_order(temp: TempDir) {
        let path = write(
            &temp,
            "jobs.json",
            r#"[{"id":7,"address":"Depot"},{"id":3,"address":"1 High St"}]"#,
        );
        let jobs = load_jobs(&path).expect("load");
        assert_eq!(jobs, vec![JobNode::new(0, 7, "Depot"), JobNode::new(1, 3, "1 High St")]);
    }

    #[rstest]
    #[case("[]")]
    fn rejects_empty_job_lists(temp: TempDir, #[case] contents: &str) {
        let path = write(&temp, "jobs.json", contents);
        assert!(matches!(load_jobs(&path), Err(DataError::NoJobs { .. })));
    }

    #[rstest]
    #[case(r#"{"id":1}"#)]
    #[case(r#"[{"id":"one","address":"x"}]"#)]
    #[case("not json")]
    fn rejects_malformed_job_lists(temp: TempDir, #[case] contents: &str) {
        let path = write(&temp, "jobs.json", contents);
        assert!(matches!(load_jobs(&path), Err(DataError::Parse { .. })));
    }

    #[rstest]
    fn loads_workers_from_csv(temp: TempDir) {
        let path = write(
            &temp,
            "workers.csv",
            "worker_name,number_of_jobs\nAda,2\nGrace Hopper, 1\n",
        );
        let workers = load_workers(&path).expect("load");
        let summary: Vec<(&str, usize)> = workers
            .iter()
            .map(|w| (w.name.as_str(), w.required_jobs))
            .collect();
        assert_eq!(summary, vec![("Ada", 2), ("Grace Hopper", 1)]);
    }

    #[rstest]
    fn loads_jobs_from_csv_in_file_order(temp: TempDir) {
        let path = write(
            &temp,
            "jobs.CSV",
            "job_ID,address\n7,Depot\n3,\"1 High St, Leeds\"\n",
        );
        let jobs = load_jobs(&path).expect("load");
        assert_eq!(
            jobs,
            vec![JobNode::new(0, 7, "Depot"), JobNode::new(1, 3, "1 High St, Leeds")]
        );
    }

    #[rstest]
    fn header_only_worker_csv_is_empty(temp: TempDir) {
        let path = write(&temp, "workers.csv", "worker_name,number_of_jobs\n");
        assert!(load_workers(&path).expect("load").is_empty());
    }

    #[rstest]
    fn header_only_job_csv_has_no_jobs(temp: TempDir) {
        let path = write(&temp, "jobs.csv", "job_ID,address\n");
        assert!(matches!(load_jobs(&path), Err(DataError::NoJobs { .. })));
    }

    #[rstest]
    #[case("worker_name,number_of_jobs\nAda,many\n")]
    #[case("worker_name,number_of_jobs\nAda,2,extra\n")]
    #[case("worker_name,number_of_jobs\nAda,-1\n")]
    fn rejects_malformed_worker_csv_rows(temp: TempDir, #[case] contents: &str) {
        let path = write(&temp, "workers.csv", contents);
        assert!(matches!(load_workers(&path), Err(DataError::Csv { .. })));
    }

    #[rstest]
    fn rejects_zero_job_workers_from_csv(temp: TempDir) {
        let path = write(&temp, "workers.csv", "worker_name,number_of_jobs\nAda,1\nBob,0\n");
        let err = load_workers(&path).expect_err("zero jobs");
        assert!(matches!(err, DataError::Worker { position: 1, .. }));
    }

    #[rstest]
    fn rejects_job_csv_with_wrong_headers(temp: TempDir) {
        let path = write(&temp, "jobs.csv", "id,address\n1,Depot\n");
        assert!(matches!(load_jobs(&path), Err(DataError::Csv { .. })));
    }

    #[rstest]
    fn missing_files_report_not_found(temp: TempDir) {
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 path");
        let err = load_workers(&root.join("absent.json")).expect_err("missing");
        assert!(err.is_not_found());
    }
}

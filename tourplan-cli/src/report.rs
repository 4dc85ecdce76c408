//! Rendering assignments for people and machines.

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tourplan_core::{
    Assignment, AssignmentStatus, Cost, JobNode, NodeIndex, TourQuality, WorkerAssignment,
};

use crate::CliError;

/// Output format accepted by `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One block per worker listing addresses and distance.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Printable view of an assignment with job details resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Report {
    pub(crate) workers: Vec<WorkerReport>,
    pub(crate) total_cost: Cost,
    pub(crate) tour_evaluations: u64,
    pub(crate) solve_time_ms: u64,
}

/// One worker's entry in a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct WorkerReport {
    pub(crate) name: String,
    pub(crate) required_jobs: usize,
    pub(crate) status: AssignmentStatus,
    pub(crate) jobs: Vec<NodeIndex>,
    pub(crate) job_ids: Vec<u64>,
    pub(crate) tour: Vec<NodeIndex>,
    pub(crate) addresses: Vec<String>,
    pub(crate) cost: Cost,
    pub(crate) quality: Option<TourQuality>,
}

impl Report {
    pub(crate) fn new(assignment: &Assignment, jobs: &[JobNode]) -> Self {
        let diagnostics = assignment.diagnostics();
        Self {
            workers: assignment
                .workers()
                .iter()
                .map(|entry| WorkerReport::new(entry, jobs))
                .collect(),
            total_cost: assignment.total_cost(),
            tour_evaluations: diagnostics.tour_evaluations,
            solve_time_ms: u64::try_from(diagnostics.solve_time.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl WorkerReport {
    fn new(entry: &WorkerAssignment, jobs: &[JobNode]) -> Self {
        let lookup = |node: NodeIndex| jobs.get(node);
        let tour: Vec<NodeIndex> = entry
            .tour
            .as_ref()
            .map(|t| t.nodes().to_vec())
            .unwrap_or_default();
        Self {
            name: entry.worker.name.clone(),
            required_jobs: entry.worker.required_jobs,
            status: entry.status,
            jobs: entry.jobs.iter().copied().collect(),
            job_ids: entry
                .jobs
                .iter()
                .filter_map(|&n| lookup(n).map(|j| j.job_id))
                .collect(),
            addresses: tour
                .iter()
                .filter_map(|&n| lookup(n).map(|j| j.address.clone()))
                .collect(),
            tour,
            cost: entry.cost(),
            quality: entry.tour.as_ref().map(|t| t.quality()),
        }
    }
}

/// Write `report` to `writer` in `format`.
pub(crate) fn write_report(
    writer: &mut dyn Write,
    report: &Report,
    format: ReportFormat,
) -> Result<(), CliError> {
    let payload = match format {
        ReportFormat::Text => render_text(report),
        ReportFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
            json.push('\n');
            json
        }
    };
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for worker in &report.workers {
        out.push_str(&format!("Worker: {}\n", worker.name));
        if worker.addresses.is_empty() {
            out.push_str("No jobs assigned\n");
        } else {
            out.push_str(&worker.addresses.join(" -> "));
            out.push('\n');
        }
        out.push_str(&format!("Distance: {}", worker.cost));
        if let Some(TourQuality::Approximate(reason)) = worker.quality {
            out.push_str(&format!(" (approximate: {reason})"));
        }
        out.push('\n');
        if let AssignmentStatus::UnderAssigned {
            required,
            assigned,
            available,
        } = worker.status
        {
            out.push_str(&format!(
                "UNDER-ASSIGNED {assigned}/{required} ({available} jobs were unclaimed)\n"
            ));
        }
        out.push('\n');
    }
    out.push_str(&format!("Total distance: {}\n", report.total_cost));
    out
}

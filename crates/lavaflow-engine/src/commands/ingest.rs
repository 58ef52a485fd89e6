//! Ingest orchestration.
//!
//! ## Pipeline (in order):
//! 1. Fetch the full snapshot set (a failed fetch stops the run, nothing is diffed)
//! 2. Diff in timestamp order; unrepairable snapshots are dropped and reported
//! 3. dry_run short-circuit (no store access)
//! 4. Upload, skipping ids already stored unless overwriting

use lavaflow_core::diff::{compute_diffs_with, DiffBatch};
use lavaflow_core::errors::{ExError, Result};
use lavaflow_core::geometry::repair::RepairPlan;
use lavaflow_core::source::SnapshotSource;
use lavaflow_core::upload::{upload, DocumentStore, UploadSummary};
use lavaflow_core::{log_op_end, log_op_error, log_op_start};
use lavaflow_core_types::RunId;
use serde::Serialize;
use std::time::Instant;

/// Options for an ingest run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Rewrite records whose id is already stored
    pub overwrite: bool,
    /// Fetch and diff only; the store is never touched
    pub dry_run: bool,
}

/// Result of an ingest run.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub run_id: String,
    /// Snapshots returned by the source
    pub fetched: usize,
    /// Diff records produced
    pub emitted: usize,
    /// Ids of snapshots dropped as unrepairable
    pub dropped: Vec<String>,
    /// Upload counts; `None` for dry runs
    pub upload: Option<UploadSummary>,
}

/// Fetch and diff without uploading.
///
/// # Errors
///
/// Source fetch failures.
pub fn preview_diffs<S: SnapshotSource + ?Sized>(source: &S) -> Result<DiffBatch> {
    let snapshots = source.fetch_snapshots()?;
    Ok(compute_diffs_with(&snapshots, &RepairPlan::default()))
}

/// Run one fetch, diff and upload cycle.
///
/// # Errors
///
/// Source fetch failures, and store failures during an existence check.
/// Rejected writes are counted in the report instead.
pub fn run_ingest<S, D>(source: &S, store: &mut D, options: IngestOptions) -> Result<IngestReport>
where
    S: SnapshotSource + ?Sized,
    D: DocumentStore + ?Sized,
{
    let start = Instant::now();
    let run_id = RunId::new();
    log_op_start!(
        "ingest",
        run_id = run_id.as_str(),
        overwrite = options.overwrite,
        dry_run = options.dry_run
    );

    match ingest_inner(source, store, options, &run_id) {
        Ok(report) => {
            log_op_end!(
                "ingest",
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = run_id.as_str(),
                fetched = report.fetched,
                emitted = report.emitted,
                dropped = report.dropped.len()
            );
            Ok(report)
        }
        Err(e) => {
            let err = e.with_run_id(run_id.clone());
            log_op_error!(
                "ingest",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = run_id.as_str()
            );
            Err(err)
        }
    }
}

fn ingest_inner<S, D>(
    source: &S,
    store: &mut D,
    options: IngestOptions,
    run_id: &RunId,
) -> std::result::Result<IngestReport, ExError>
where
    S: SnapshotSource + ?Sized,
    D: DocumentStore + ?Sized,
{
    let snapshots = source.fetch_snapshots()?;
    let fetched = snapshots.len();

    let batch = compute_diffs_with(&snapshots, &RepairPlan::default());

    let summary = if options.dry_run {
        tracing::info!(run_id = run_id.as_str(), records = batch.records.len(), "Dry run, skipping upload");
        None
    } else {
        Some(upload(store, &batch.records, options.overwrite)?)
    };

    Ok(IngestReport {
        run_id: run_id.to_string(),
        fetched,
        emitted: batch.records.len(),
        dropped: batch.dropped,
        upload: summary,
    })
}

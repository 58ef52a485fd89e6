use serde::Serialize;
use std::time::Instant;

use crate::errors::{ExError, Result};
use crate::model::DiffRecord;
use crate::upload::store::DocumentStore;
use crate::{log_op_end, log_op_error, log_op_start};
use lavaflow_core_types::schema::{EVENT_SKIPPED, EVENT_WRITE_FAILED};

/// What happened to one record
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// Written to the store
    Indexed,
    /// Already present and not overwritten
    Skipped,
    /// The store rejected the write
    Failed(ExError),
}

/// Aggregate counts for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub indexed: u64,
    pub skipped: u64,
    pub errors: u64,
}

impl UploadSummary {
    /// Fold one outcome into the counts
    pub fn record(&mut self, outcome: &UploadOutcome) {
        match outcome {
            UploadOutcome::Indexed => self.indexed += 1,
            UploadOutcome::Skipped => self.skipped += 1,
            UploadOutcome::Failed(_) => self.errors += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.indexed + self.skipped + self.errors
    }
}

/// Upload a single record.
///
/// Returns `Err` only when the existence check fails with something other
/// than not-found; write failures come back as `UploadOutcome::Failed`.
///
/// # Errors
///
/// Existence-check failures other than `NotFound`.
pub fn upload_record<S: DocumentStore + ?Sized>(
    store: &mut S,
    record: &DiffRecord,
    overwrite: bool,
) -> Result<UploadOutcome> {
    let id = record.id();

    if !overwrite {
        let exists = store.exists(id).map_err(|e| {
            ExError::new(e.kind())
                .with_op("upload")
                .with_entity_id(id)
                .with_message("existence check failed")
                .with_source(e)
        })?;
        if exists {
            tracing::debug!(event = EVENT_SKIPPED, snapshot_id = %id, "Document already stored");
            return Ok(UploadOutcome::Skipped);
        }
    }

    tracing::debug!(snapshot_id = %id, "Uploading document");
    match store.put(id, record) {
        Ok(()) => Ok(UploadOutcome::Indexed),
        Err(e) => {
            tracing::error!(
                event = EVENT_WRITE_FAILED,
                snapshot_id = %id,
                err.code = e.code(),
                error = %e,
                "Error uploading document"
            );
            Ok(UploadOutcome::Failed(e))
        }
    }
}

/// Upload a batch, skipping ids already stored unless `overwrite` is set.
///
/// A failed write never aborts the batch; it is counted in `errors`.
///
/// # Errors
///
/// A failed existence check (other than not-found) aborts the batch.
pub fn upload<S: DocumentStore + ?Sized>(
    store: &mut S,
    records: &[DiffRecord],
    overwrite: bool,
) -> Result<UploadSummary> {
    let start = Instant::now();
    log_op_start!("upload", records = records.len(), overwrite = overwrite);

    let mut summary = UploadSummary::default();
    for record in records {
        match upload_record(store, record, overwrite) {
            Ok(outcome) => summary.record(&outcome),
            Err(e) => {
                log_op_error!(
                    "upload",
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    snapshot_id = record.id()
                );
                return Err(e);
            }
        }
    }

    log_op_end!(
        "upload",
        duration_ms = start.elapsed().as_millis() as u64,
        indexed = summary.indexed,
        skipped = summary.skipped,
        errors = summary.errors
    );
    Ok(summary)
}

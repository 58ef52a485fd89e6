//! Snapshot diff computation.
//!
//! The predecessor of a snapshot is the one immediately before it in
//! timestamp order, whether or not that predecessor itself produced a record.

use crate::diff::model::{DiffBatch, DiffOutcome, DropReason};
use crate::geometry::repair::{RepairOutcome, RepairPlan};
use crate::geometry::sliver::{filter_slivers, SLIVER_TOLERANCE_M2};
use crate::geometry::FlowGeometry;
use crate::model::{DiffRecord, Snapshot};
use crate::{log_op_end, log_op_start};
use lavaflow_core_types::schema::{EVENT_DROPPED, EVENT_SLIVERS_REMOVED};
use std::time::Instant;

/// Distance tolerance for simplifying a raw difference (degrees)
pub const SIMPLIFY_TOLERANCE: f64 = 1e-6;

/// Stable sort by timestamp; equal timestamps keep input order.
pub fn sort_chronologically(snapshots: &[Snapshot]) -> Vec<&Snapshot> {
    let mut sorted: Vec<&Snapshot> = snapshots.iter().collect();
    sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    sorted
}

/// Raw growth geometry before repair: the current geometry when there is no
/// predecessor, otherwise the simplified difference with slivers removed.
fn growth_geometry(current: &Snapshot, previous: Option<&Snapshot>) -> FlowGeometry {
    let Some(previous) = previous else {
        tracing::debug!(snapshot_id = %current.id, "Snapshot has no predecessor");
        return current.geometry.clone();
    };

    let diff = current
        .geometry
        .difference(&previous.geometry)
        .simplify(SIMPLIFY_TOLERANCE);
    if !diff.is_multi() {
        return diff;
    }

    let report = filter_slivers(diff, SLIVER_TOLERANCE_M2);
    if report.removed > 0 {
        tracing::debug!(
            event = EVENT_SLIVERS_REMOVED,
            snapshot_id = %current.id,
            parts_removed = report.removed,
            "Removed sliver parts from difference"
        );
    }
    report.geometry
}

/// Diff one snapshot against its predecessor.
pub fn diff_snapshot(
    current: &Snapshot,
    previous: Option<&Snapshot>,
    plan: &RepairPlan,
) -> DiffOutcome {
    let raw = growth_geometry(current, previous);

    let geometry = match plan.repair(raw) {
        RepairOutcome::AlreadyValid(g) => g,
        RepairOutcome::Repaired { geometry, strategy } => {
            tracing::debug!(snapshot_id = %current.id, strategy, "Repaired diff geometry");
            geometry
        }
        RepairOutcome::Unrepairable => {
            tracing::warn!(
                op = "compute_diffs",
                event = EVENT_DROPPED,
                snapshot_id = %current.id,
                "Diff geometry is unrepairable, snapshot dropped"
            );
            return DiffOutcome::Dropped {
                snapshot_id: current.id.clone(),
                reason: DropReason::Unrepairable,
            };
        }
    };

    DiffOutcome::Emitted(DiffRecord::new(current.clone(), previous, geometry))
}

/// Diff every snapshot in timestamp order, returning one outcome per snapshot.
pub fn diff_outcomes(snapshots: &[Snapshot], plan: &RepairPlan) -> Vec<DiffOutcome> {
    let sorted = sort_chronologically(snapshots);
    let mut previous: Option<&Snapshot> = None;
    let mut outcomes = Vec::with_capacity(sorted.len());
    for current in sorted {
        outcomes.push(diff_snapshot(current, previous, plan));
        previous = Some(current);
    }
    outcomes
}

/// Diff with an explicit repair plan.
pub fn compute_diffs_with(snapshots: &[Snapshot], plan: &RepairPlan) -> DiffBatch {
    let start = Instant::now();
    log_op_start!("compute_diffs", snapshots = snapshots.len());

    let batch: DiffBatch = diff_outcomes(snapshots, plan).into_iter().collect();

    log_op_end!(
        "compute_diffs",
        duration_ms = start.elapsed().as_millis() as u64,
        emitted = batch.records.len(),
        dropped = batch.dropped.len()
    );
    batch
}

/// Diff with the default repair plan, keeping emitted records only.
pub fn compute_diffs(snapshots: &[Snapshot]) -> Vec<DiffRecord> {
    compute_diffs_with(snapshots, &RepairPlan::default()).records
}

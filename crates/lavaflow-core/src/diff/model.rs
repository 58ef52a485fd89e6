//! Per-snapshot diff outcomes.

use crate::model::DiffRecord;

/// Why a snapshot produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Neither the difference nor any repair of it validates
    Unrepairable,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::Unrepairable => write!(f, "unrepairable geometry"),
        }
    }
}

/// Result of diffing one snapshot against its predecessor
#[derive(Debug, Clone, PartialEq)]
pub enum DiffOutcome {
    Emitted(DiffRecord),
    Dropped {
        snapshot_id: String,
        reason: DropReason,
    },
}

/// Emitted records plus the ids of dropped snapshots, in processing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffBatch {
    pub records: Vec<DiffRecord>,
    pub dropped: Vec<String>,
}

impl FromIterator<DiffOutcome> for DiffBatch {
    fn from_iter<I: IntoIterator<Item = DiffOutcome>>(iter: I) -> Self {
        let mut batch = DiffBatch::default();
        for outcome in iter {
            match outcome {
                DiffOutcome::Emitted(record) => batch.records.push(record),
                DiffOutcome::Dropped { snapshot_id, .. } => batch.dropped.push(snapshot_id),
            }
        }
        batch
    }
}

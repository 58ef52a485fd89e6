use crate::geometry::FlowGeometry;
use crate::model::snapshot::Snapshot;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A snapshot annotated with its growth since the chronological predecessor
///
/// Serialises as one flat document: the snapshot fields followed by the
/// `diff_*` fields. The snapshot part is never altered by diffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    /// Predecessor id, absent for the earliest snapshot
    pub diff_id: Option<String>,
    /// Predecessor timestamp, absent for the earliest snapshot
    pub diff_timestamp: Option<DateTime<FixedOffset>>,
    /// Repaired, sliver-filtered difference
    pub diff_geometry: FlowGeometry,
    /// Canonical area of `diff_geometry`
    pub diff_area: f64,
}

impl DiffRecord {
    /// Build a record; `diff_area` is always derived from `diff_geometry`.
    pub fn new(
        snapshot: Snapshot,
        previous: Option<&Snapshot>,
        diff_geometry: FlowGeometry,
    ) -> Self {
        let diff_area = diff_geometry.area();
        Self {
            snapshot,
            diff_id: previous.map(|p| p.id.clone()),
            diff_timestamp: previous.map(|p| p.timestamp),
            diff_geometry,
            diff_area,
        }
    }

    /// Stable document identifier (the snapshot id)
    pub fn id(&self) -> &str {
        &self.snapshot.id
    }
}

//! Snapshot source boundary.
//!
//! A source supplies the complete raw snapshot set for one run. Order is not
//! significant; the differ sorts. A failed fetch yields no snapshots at all,
//! so diffing never runs on a partial set.

use crate::errors::Result;
use crate::model::Snapshot;

/// Supplier of raw snapshots
pub trait SnapshotSource {
    /// Fetch every snapshot known to the source
    ///
    /// # Errors
    ///
    /// `SourceFetch` (or a more specific kind) when any part of the set
    /// cannot be retrieved.
    fn fetch_snapshots(&self) -> Result<Vec<Snapshot>>;
}

/// Source over a fixed list, for tests and pre-loaded data
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshots: Vec<Snapshot>,
}

impl StaticSource {
    pub fn new(snapshots: Vec<Snapshot>) -> Self {
        Self { snapshots }
    }
}

impl SnapshotSource for StaticSource {
    fn fetch_snapshots(&self) -> Result<Vec<Snapshot>> {
        Ok(self.snapshots.clone())
    }
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &S {
    fn fetch_snapshots(&self) -> Result<Vec<Snapshot>> {
        (**self).fetch_snapshots()
    }
}

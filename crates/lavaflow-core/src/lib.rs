//! Lava-flow footprint diff engine.
//!
//! Turns a set of timestamped flow footprints into per-snapshot growth
//! records and uploads them idempotently to a document store.
//!
//! - [`geometry`]: footprint geometry, repair and sliver removal
//! - [`diff`]: chronological snapshot differ
//! - [`upload`]: idempotent upload coordinator and the store boundary
//! - [`source`]: snapshot source boundary

// Re-exported so the logging macros can reach the schema constants
pub use lavaflow_core_types;

pub mod diff;
pub mod errors;
pub mod geometry;
pub mod logging_facility;
pub mod model;
pub mod source;
pub mod upload;

pub use diff::{compute_diffs, compute_diffs_with, DiffBatch, DiffOutcome};
pub use errors::{ExError, ExErrorKind, FootprintError, Result};
pub use geometry::repair::{repair, RepairOutcome, RepairPlan};
pub use geometry::sliver::filter_slivers;
pub use geometry::FlowGeometry;
pub use model::{DiffRecord, Snapshot};
pub use source::{SnapshotSource, StaticSource};
pub use upload::{upload, DocumentStore, InMemoryStore, UploadSummary};

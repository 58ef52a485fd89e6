//! Snapshot differ.
//!
//! Orders snapshots by time and derives, for each one, the growth since its
//! chronological predecessor.
//!
//! ## Entry point
//!
//! ```ignore
//! use lavaflow_core::diff::compute_diffs;
//!
//! let records = compute_diffs(&snapshots);
//! ```
//!
//! ## Guarantees
//!
//! - **Order independence**: input order only matters between equal timestamps.
//! - **Validity**: every emitted `diff_geometry` validates; snapshots whose
//!   difference cannot be repaired are dropped with a `dropped` event.
//! - **Derived area**: `diff_area` is computed from the final geometry.

pub mod engine;
pub mod model;

pub use engine::{compute_diffs, compute_diffs_with, diff_outcomes, diff_snapshot};
pub use model::{DiffBatch, DiffOutcome, DropReason};

//! Lavaflow Engine - Orchestration layer
//!
//! Wires a snapshot source, the differ and a document store into one ingest
//! run.

pub mod commands;

pub use commands::ingest::{preview_diffs, run_ingest, IngestOptions, IngestReport};

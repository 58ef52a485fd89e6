//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use lavaflow_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Per-record diagnostics (dropped snapshots, removed slivers, skipped or
//! failed uploads) are plain `tracing` events carrying an `event` field from
//! `lavaflow_core_types::schema`.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

//! Lavaflow Store - SQLite document store and snapshot catalogs
//!
//! Provides:
//! - SQLite schema with migrations framework
//! - `SqliteStore`, the persistent `DocumentStore` for diff records
//! - YAML snapshot catalog parser and the `CatalogSource` adapter

pub mod catalog;
pub mod db;
pub mod docs;
pub mod errors;
pub mod migrations;

// Re-export key types
pub use catalog::CatalogSource;
pub use docs::SqliteStore;
pub use errors::Result;

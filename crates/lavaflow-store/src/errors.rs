//! Error handling for lavaflow-store
//!
//! Wraps lavaflow-core ExError with store-specific helpers

use lavaflow_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create the store's explicit absence signal
pub fn not_found(id: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("get")
        .with_entity_id(id)
        .with_message("document not found")
}

/// Create a write rejection error from rusqlite::Error
pub fn write_rejected(id: &str, err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::WriteRejected)
        .with_op("put")
        .with_entity_id(id)
        .with_message(err.to_string())
}

/// Create a catalog validation error
pub fn catalog_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("catalog_parse")
        .with_message(reason.to_string())
}

/// Create a snapshot fetch error wrapping its cause
pub fn source_fetch(snapshot_id: &str, cause: ExError) -> ExError {
    ExError::new(ExErrorKind::SourceFetch)
        .with_op("fetch_snapshots")
        .with_entity_id(snapshot_id)
        .with_message("could not load snapshot footprint")
        .with_source(cause)
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

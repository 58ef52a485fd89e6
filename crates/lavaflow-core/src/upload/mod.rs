//! Idempotent upload of diff records into a document store.
//!
//! Records are keyed by snapshot id. Unless overwriting, a record whose id is
//! already present is skipped; only the store's explicit not-found signal
//! leads to a write. Any other failure during that check aborts the batch.

pub mod coordinator;
pub mod store;

pub use coordinator::{upload, upload_record, UploadOutcome, UploadSummary};
pub use store::{DocumentStore, InMemoryStore};

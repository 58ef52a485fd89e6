pub mod record;
pub mod snapshot;

pub use record::DiffRecord;
pub use snapshot::Snapshot;

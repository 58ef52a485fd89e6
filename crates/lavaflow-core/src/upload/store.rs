use std::collections::{BTreeMap, HashMap};

use crate::errors::{ExError, ExErrorKind, Result};
use crate::model::DiffRecord;

/// Persistence boundary for diff records
///
/// Implementations must report a missing document from `get` as an error of
/// kind `NotFound`, and nothing else with that kind.
pub trait DocumentStore {
    /// Fetch a stored record by id
    ///
    /// # Errors
    ///
    /// `NotFound` when no document exists; any other kind for store failures.
    fn get(&self, id: &str) -> Result<DiffRecord>;

    /// Write (insert or replace) a record under `id`
    ///
    /// # Errors
    ///
    /// Any store-reported write failure.
    fn put(&mut self, id: &str, record: &DiffRecord) -> Result<()>;

    /// Number of stored documents
    ///
    /// # Errors
    ///
    /// Store failures.
    fn count(&self) -> Result<u64>;

    /// Existence check built on `get`: `Ok(false)` only for `NotFound`
    ///
    /// # Errors
    ///
    /// Every `get` failure other than `NotFound`.
    fn exists(&self, id: &str) -> Result<bool> {
        match self.get(id) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Map-backed store for tests and dry runs
///
/// Failures can be injected per id for reads (`fail_get`) and writes
/// (`fail_put`).
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    documents: BTreeMap<String, DiffRecord>,
    get_failures: HashMap<String, ExErrorKind>,
    put_failures: HashMap<String, ExErrorKind>,
    writes: Vec<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document without recording it as a write
    pub fn seed(&mut self, record: DiffRecord) {
        self.documents.insert(record.id().to_string(), record);
    }

    /// Make `get(id)` fail with `kind`
    pub fn fail_get(&mut self, id: impl Into<String>, kind: ExErrorKind) {
        self.get_failures.insert(id.into(), kind);
    }

    /// Make `put(id, _)` fail with `kind`
    pub fn fail_put(&mut self, id: impl Into<String>, kind: ExErrorKind) {
        self.put_failures.insert(id.into(), kind);
    }

    /// Ids written through `put`, in order
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }
}

impl DocumentStore for InMemoryStore {
    fn get(&self, id: &str) -> Result<DiffRecord> {
        if let Some(kind) = self.get_failures.get(id) {
            return Err(ExError::new(*kind)
                .with_op("get")
                .with_entity_id(id)
                .with_message("injected read failure"));
        }
        self.documents.get(id).cloned().ok_or_else(|| {
            ExError::new(ExErrorKind::NotFound)
                .with_op("get")
                .with_entity_id(id)
                .with_message("document not found")
        })
    }

    fn put(&mut self, id: &str, record: &DiffRecord) -> Result<()> {
        if let Some(kind) = self.put_failures.get(id) {
            return Err(ExError::new(*kind)
                .with_op("put")
                .with_entity_id(id)
                .with_message("injected write failure"));
        }
        self.documents.insert(id.to_string(), record.clone());
        self.writes.push(id.to_string());
        Ok(())
    }

    fn count(&self) -> Result<u64> {
        Ok(self.documents.len() as u64)
    }
}

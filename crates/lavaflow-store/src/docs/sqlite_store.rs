//! SQLite-backed document store
//!
//! One row per snapshot id. The full diff record is kept as JSON; timestamp,
//! areas and predecessor id are copied into columns for listing and status.

use crate::db;
use crate::errors::{from_rusqlite, not_found, write_rejected, Result};
use crate::migrations::apply_migrations;
use lavaflow_core::model::DiffRecord;
use lavaflow_core::upload::DocumentStore;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

/// Persistent [`DocumentStore`] over a migrated SQLite connection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) a store file and bring its schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(db::open(path)?)
    }

    /// In-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    /// Wrap an existing connection, configuring and migrating it
    pub fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Id and timestamp of the most recent stored snapshot
    pub fn latest(&self) -> Result<Option<(String, String)>> {
        self.conn
            .query_row(
                "SELECT id, json_extract(document, '$.timestamp') FROM footprints
                 ORDER BY timestamp_ms DESC, id DESC LIMIT 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(from_rusqlite)
    }

    /// Stored ids in timestamp order
    pub fn list_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM footprints ORDER BY timestamp_ms, id")
            .map_err(from_rusqlite)?;
        let ids = stmt
            .query_map([], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(from_rusqlite)?;
        Ok(ids)
    }
}

impl DocumentStore for SqliteStore {
    fn get(&self, id: &str) -> Result<DiffRecord> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM footprints WHERE id = ?1",
                [id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| from_rusqlite(e).with_entity_id(id))?;

        let document = document.ok_or_else(|| not_found(id))?;
        let record: DiffRecord = serde_json::from_str(&document)?;
        Ok(record)
    }

    fn put(&mut self, id: &str, record: &DiffRecord) -> Result<()> {
        let document = serde_json::to_string(record)?;
        let now = chrono::Utc::now().timestamp();

        self.conn
            .execute(
                "INSERT INTO footprints (id, timestamp_ms, area, diff_id, diff_area, document, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                    timestamp_ms = excluded.timestamp_ms,
                    area = excluded.area,
                    diff_id = excluded.diff_id,
                    diff_area = excluded.diff_area,
                    document = excluded.document,
                    updated_at = excluded.updated_at",
                rusqlite::params![
                    id,
                    record.snapshot.timestamp.timestamp_millis(),
                    record.snapshot.area,
                    record.diff_id,
                    record.diff_area,
                    document,
                    now,
                ],
            )
            .map_err(|e| write_rejected(id, e))?;

        Ok(())
    }

    fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM footprints", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count.max(0) as u64)
    }
}

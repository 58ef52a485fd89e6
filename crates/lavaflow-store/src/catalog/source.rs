//! Catalog-backed snapshot source
//!
//! Each entry's GeoJSON file may hold a FeatureCollection, a single Feature,
//! or a bare geometry. The first feature's geometry is the footprint. It is
//! rewound to the right-hand rule before its area is taken.

use crate::catalog::format::ResolvedEntry;
use crate::catalog::parser::parse_catalog_file;
use crate::errors::{io_error, source_fetch, Result};
use lavaflow_core::errors::{ExError, FootprintError};
use lavaflow_core::geometry::geojson::geometry_from_value;
use lavaflow_core::model::Snapshot;
use lavaflow_core::source::SnapshotSource;
use lavaflow_core::{log_op_end, log_op_error, log_op_start};
use lavaflow_core_types::schema::EVENT_SKIPPED;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

/// [`SnapshotSource`] over a parsed catalog
#[derive(Debug, Clone)]
pub struct CatalogSource {
    entries: Vec<ResolvedEntry>,
}

impl CatalogSource {
    pub fn new(entries: Vec<ResolvedEntry>) -> Self {
        Self { entries }
    }

    /// Parse and validate a catalog file
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(parse_catalog_file(path)?.entries))
    }

    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    /// Load one entry; `Ok(None)` when the file holds no footprint geometry
    fn load_entry(&self, entry: &ResolvedEntry) -> Result<Option<Snapshot>> {
        let content = std::fs::read_to_string(&entry.file)
            .map_err(|e| io_error("read_footprint", e).with_entity_id(entry.id.as_str()))?;
        let document: Value = serde_json::from_str(&content)?;

        let Some(geometry_value) = first_geometry(&document) else {
            return Ok(None);
        };
        let geometry = match geometry_from_value(geometry_value) {
            Ok(geometry) => geometry.rewind(),
            Err(FootprintError::UnsupportedGeometry { geometry_type }) => {
                tracing::debug!(snapshot_id = %entry.id, geometry_type = %geometry_type, "Not a footprint geometry");
                return Ok(None);
            }
            Err(e) => return Err(ExError::from(e).with_entity_id(entry.id.as_str())),
        };

        let snapshot = Snapshot::with_computed_area(entry.id.clone(), geometry, entry.timestamp);
        snapshot.validate()?;
        Ok(Some(snapshot))
    }
}

/// Geometry of the first feature, or the document itself if it is a geometry
fn first_geometry(document: &Value) -> Option<&Value> {
    match document.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => document
            .get("features")?
            .as_array()?
            .first()?
            .get("geometry")
            .filter(|g| !g.is_null()),
        Some("Feature") => document.get("geometry").filter(|g| !g.is_null()),
        Some(_) => Some(document),
        None => None,
    }
}

impl SnapshotSource for CatalogSource {
    fn fetch_snapshots(&self) -> Result<Vec<Snapshot>> {
        let start = Instant::now();
        log_op_start!("fetch_snapshots", entries = self.entries.len());

        let mut snapshots = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            tracing::debug!(snapshot_id = %entry.id, file = %entry.file.display(), "Loading footprint");
            match self.load_entry(entry) {
                Ok(Some(snapshot)) => snapshots.push(snapshot),
                Ok(None) => {
                    tracing::error!(
                        event = EVENT_SKIPPED,
                        snapshot_id = %entry.id,
                        file = %entry.file.display(),
                        "No footprint geometry in file, snapshot skipped"
                    );
                }
                Err(cause) => {
                    let err = source_fetch(&entry.id, cause);
                    log_op_error!(
                        "fetch_snapshots",
                        err.clone(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        snapshot_id = entry.id.as_str()
                    );
                    return Err(err);
                }
            }
        }

        log_op_end!(
            "fetch_snapshots",
            duration_ms = start.elapsed().as_millis() as u64,
            fetched = snapshots.len()
        );
        Ok(snapshots)
    }
}

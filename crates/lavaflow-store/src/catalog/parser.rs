//! Catalog parser with validation
//!
//! Parses YAML and validates schema version, id uniqueness and timestamps

use crate::catalog::format::{CatalogV1, ResolvedEntry};
use crate::errors::{catalog_validation, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A validated catalog
#[derive(Debug, Clone)]
pub struct ParsedCatalog {
    pub entries: Vec<ResolvedEntry>,
}

/// Parse a catalog file; entry files resolve against its directory
pub fn parse_catalog_file(path: &Path) -> Result<ParsedCatalog> {
    let content = fs::read_to_string(path)
        .map_err(|e| catalog_validation(&format!("Failed to read catalog file: {}", e)))?;

    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    parse_catalog_str(&content, &base_dir)
}

/// Parse a catalog from a string
pub fn parse_catalog_str(content: &str, base_dir: &Path) -> Result<ParsedCatalog> {
    let catalog: CatalogV1 = serde_yaml::from_str(content)
        .map_err(|e| catalog_validation(&format!("YAML parse error: {}", e)))?;

    validate_catalog(&catalog, base_dir)
}

/// Where local capture times are anchored
#[derive(Debug, Clone, Copy)]
enum CaptureZone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl CaptureZone {
    fn fixed(offset: &str) -> Result<Self> {
        offset
            .parse::<FixedOffset>()
            .map(CaptureZone::Fixed)
            .map_err(|_| catalog_validation(&format!("Invalid utc_offset: '{}'", offset)))
    }

    fn named(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(CaptureZone::Named)
            .map_err(|_| catalog_validation(&format!("Unknown timezone: '{}'", name)))
    }

    /// Zoned instant for a local wall-clock time.
    ///
    /// A wall-clock time repeated when summer time ends resolves to standard
    /// time. One skipped when it starts does not resolve.
    fn localize(&self, local: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        match self {
            CaptureZone::Fixed(offset) => offset.from_local_datetime(local).single(),
            CaptureZone::Named(tz) => tz
                .from_local_datetime(local)
                .latest()
                .map(|dt| dt.fixed_offset()),
        }
    }
}

/// Combine local date and time into a zoned timestamp
fn zoned_timestamp(date: &str, time: &str, zone: CaptureZone) -> Option<DateTime<FixedOffset>> {
    let local =
        NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M").ok()?;
    zone.localize(&local)
}

fn validate_catalog(catalog: &CatalogV1, base_dir: &Path) -> Result<ParsedCatalog> {
    if catalog.schema_version != 1 {
        return Err(catalog_validation(&format!(
            "Unsupported schema_version: {}. Expected 1",
            catalog.schema_version
        )));
    }

    if catalog.snapshots.is_empty() {
        return Err(catalog_validation("Catalog lists no snapshots"));
    }

    let catalog_zone = match &catalog.utc_offset {
        Some(offset) => CaptureZone::fixed(offset)?,
        None => CaptureZone::named(&catalog.timezone)?,
    };

    let mut seen = HashSet::new();
    let mut entries = Vec::with_capacity(catalog.snapshots.len());
    for entry in &catalog.snapshots {
        if entry.id.trim().is_empty() {
            return Err(catalog_validation("Snapshot id must not be empty"));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(catalog_validation(&format!(
                "Duplicate snapshot id: {}",
                entry.id
            )));
        }

        let zone = match &entry.utc_offset {
            Some(offset) => CaptureZone::fixed(offset)?,
            None => catalog_zone,
        };
        let timestamp = zoned_timestamp(&entry.date, &entry.time, zone).ok_or_else(|| {
            catalog_validation(&format!(
                "Invalid date/time for snapshot {}: '{} {}' in {:?}",
                entry.id, entry.date, entry.time, zone
            ))
        })?;

        let file: PathBuf = if entry.file.is_absolute() {
            entry.file.clone()
        } else {
            base_dir.join(&entry.file)
        };

        entries.push(ResolvedEntry {
            id: entry.id.clone(),
            timestamp,
            file,
        });
    }

    Ok(ParsedCatalog { entries })
}

//! Catalog Format v1 schema
//!
//! Defines the YAML structure of a snapshot catalog

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Zone applied when the catalog names none
pub const DEFAULT_TIMEZONE: &str = "Atlantic/Canary";

/// Top-level catalog file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogV1 {
    /// Schema version (must be 1 for this format)
    pub schema_version: u32,

    /// IANA zone of the capture times; daylight saving follows the zone
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Fixed offset for every entry, e.g. `+01:00`; overrides `timezone`
    #[serde(default)]
    pub utc_offset: Option<String>,

    /// Snapshots in any order
    pub snapshots: Vec<CatalogEntry>,
}

/// One snapshot in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Snapshot id (stable across runs)
    pub id: String,

    /// Local capture date, `YYYY-MM-DD`
    pub date: String,

    /// Local capture time, `HH:MM`
    pub time: String,

    /// GeoJSON file, relative to the catalog file
    pub file: PathBuf,

    /// Fixed offset for this entry; overrides the catalog zone and offset
    #[serde(default)]
    pub utc_offset: Option<String>,
}

/// A validated entry with its zoned timestamp and absolute file path
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub id: String,
    pub timestamp: DateTime<FixedOffset>,
    pub file: PathBuf,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

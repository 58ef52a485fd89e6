//! Snapshot catalogs
//!
//! A catalog is a YAML file listing footprint snapshots: an id, the local
//! date and time of capture, and a GeoJSON file holding the footprint. It is
//! parsed and validated up front; footprints are read when the source is
//! fetched.

pub mod format;
pub mod parser;
pub mod source;

pub use format::{CatalogEntry, CatalogV1, ResolvedEntry};
pub use parser::{parse_catalog_file, parse_catalog_str, ParsedCatalog};
pub use source::CatalogSource;

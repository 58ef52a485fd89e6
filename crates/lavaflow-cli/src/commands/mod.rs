pub mod diff;
pub mod ingest;
pub mod status;

use std::path::Path;

/// Store location used when neither `--db` nor `LAVAFLOW_DB` is given
pub const DEFAULT_DB_PATH: &str = ".lavaflow/footprints.db";

/// Create the parent directory of a store file if it is missing
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

//! Ingest command
//!
//! Usage: lavaflow ingest --catalog <PATH> [--db <PATH>] [--overwrite] [--dry-run] [--json]

use clap::Args;
use lavaflow_core::upload::InMemoryStore;
use lavaflow_engine::{run_ingest, IngestOptions};
use lavaflow_store::{CatalogSource, SqliteStore};
use std::path::PathBuf;

use super::{ensure_parent_dir, DEFAULT_DB_PATH};

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Snapshot catalog (YAML)
    #[arg(long, env = "LAVAFLOW_CATALOG")]
    pub catalog: PathBuf,

    /// Document store (SQLite file)
    #[arg(long, env = "LAVAFLOW_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Rewrite records that are already stored
    #[arg(long)]
    pub overwrite: bool,

    /// Diff only; do not open or write the store
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute ingest command
pub fn execute(args: IngestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = CatalogSource::from_path(&args.catalog)?;
    let options = IngestOptions {
        overwrite: args.overwrite,
        dry_run: args.dry_run,
    };

    let report = if args.dry_run {
        run_ingest(&source, &mut InMemoryStore::new(), options)?
    } else {
        ensure_parent_dir(&args.db)?;
        let mut store = SqliteStore::open(&args.db)?;
        run_ingest(&source, &mut store, options)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Run {}", report.run_id);
    println!("  fetched: {}", report.fetched);
    println!("  emitted: {}", report.emitted);
    for id in &report.dropped {
        println!("  dropped: {} (unrepairable geometry)", id);
    }
    match report.upload {
        Some(summary) => {
            println!("  indexed: {}", summary.indexed);
            println!("  skipped: {}", summary.skipped);
            println!("  errors: {}", summary.errors);
        }
        None => println!("  dry run: nothing uploaded"),
    }

    Ok(())
}

//! Status command
//!
//! Usage: lavaflow status [--db <PATH>]

use clap::Args;
use lavaflow_core::upload::DocumentStore;
use lavaflow_store::SqliteStore;
use std::path::PathBuf;

use super::DEFAULT_DB_PATH;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Document store (SQLite file)
    #[arg(long, env = "LAVAFLOW_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
}

/// Execute status command
pub fn execute(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.db.exists() {
        return Err(format!("No store at {}", args.db.display()).into());
    }

    let store = SqliteStore::open(&args.db)?;
    println!("documents: {}", store.count()?);
    match store.latest()? {
        Some((id, timestamp)) => println!("latest: {} ({})", id, timestamp),
        None => println!("latest: none"),
    }

    Ok(())
}

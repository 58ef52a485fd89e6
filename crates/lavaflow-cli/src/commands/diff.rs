//! Diff command
//!
//! Usage: lavaflow diff --catalog <PATH>

use clap::Args;
use lavaflow_engine::preview_diffs;
use lavaflow_store::CatalogSource;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot catalog (YAML)
    #[arg(long, env = "LAVAFLOW_CATALOG")]
    pub catalog: PathBuf,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = CatalogSource::from_path(&args.catalog)?;
    let batch = preview_diffs(&source)?;

    for id in &batch.dropped {
        eprintln!("dropped {}: unrepairable geometry", id);
    }
    println!("{}", serde_json::to_string_pretty(&batch.records)?);

    Ok(())
}

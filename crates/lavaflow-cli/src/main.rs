//! Lavaflow CLI
//!
//! Command-line interface for the lava-flow footprint diff engine

use clap::{Parser, Subcommand};
use lavaflow_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lavaflow")]
#[command(about = "Lava-flow footprint diffs - ingest, inspect and track snapshots", long_about = None)]
struct Cli {
    /// Log output: dev (human readable) or json
    #[arg(long, global = true, env = "LAVAFLOW_LOG_FORMAT", default_value = "dev")]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch, diff and upload the snapshots of a catalog
    Ingest(commands::ingest::IngestArgs),
    /// Print the diff records of a catalog as JSON without storing them
    Diff(commands::diff::DiffArgs),
    /// Show what the document store holds
    Status(commands::status::StatusArgs),
}

fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging_facility::init(cli.log_format);

    let result = match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Status(args) => commands::status::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

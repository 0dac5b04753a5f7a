use anyhow::Result;
use clap::{Parser, Subcommand};
use fpindex::Fingerprint;
use indexer::build_index;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory fingerprint index from JSON/JSONL documents and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print term, posting and document counts
    Stats {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
    },
    /// Look up postings for one or more fingerprints
    Find {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Fingerprint to look up; repeat for several
        #[arg(long = "term", required = true)]
        terms: Vec<Fingerprint>,
    },
    /// Print the document id mapping and every entry in order of first observation
    Dump {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only JSON.
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { input } => {
            let loaded = build_index(&input)?;
            print_json(&loaded.index.stats())
        }
        Commands::Find { input, terms } => {
            let loaded = build_index(&input)?;
            let results: Vec<_> = terms.into_iter().map(|t| loaded.lookup(t)).collect();
            print_json(&results)
        }
        Commands::Dump { input } => {
            let loaded = build_index(&input)?;
            print_json(&loaded.dump())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

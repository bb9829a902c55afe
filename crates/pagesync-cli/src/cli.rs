//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pagesync - Reconcile desired records into a page collection
#[derive(Parser, Debug)]
#[command(name = "pagesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize desired records into a collection snapshot
    ///
    /// Matches every desired record against the snapshot, creates or updates
    /// what differs and archives records nothing matched (unless disabled in
    /// the config).
    ///
    /// Examples:
    ///   pagesync sync -c pagesync.toml -s tasks.json -d desired.json
    ///   pagesync sync -c pagesync.toml -s tasks.json -d desired.json --dry-run
    Sync {
        /// Path to the TOML run configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Path to the JSON collection snapshot
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Path to the JSON array of desired records
        #[arg(short, long)]
        desired: PathBuf,

        /// Preview changes without writing the snapshot back
        #[arg(long)]
        dry_run: bool,

        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the live records of a collection snapshot
    List {
        /// Path to the JSON collection snapshot
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

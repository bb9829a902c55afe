//! pagesync CLI
//!
//! Reconciles a JSON file of desired records into a local collection
//! snapshot.

mod cli;
mod commands;
mod error;
mod input;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::SyncArgs;
use error::{CliError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to initialize logging: {}", e)))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd).await,
        None => {
            println!("{} page collection reconciler", "pagesync".green().bold());
            println!();
            println!("Run {} for available commands.", "pagesync --help".cyan());
            Ok(())
        }
    }
}

async fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            config,
            snapshot,
            desired,
            dry_run,
            json,
        } => {
            commands::run_sync(SyncArgs {
                config: &config,
                snapshot: &snapshot,
                desired: &desired,
                dry_run,
                json,
            })
            .await
        }
        Commands::List { snapshot, json } => commands::run_list(&snapshot, json),
    }
}

//! Sync command implementation

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use pagesync_core::{SyncConfig, SyncReport, Synchronizer, run};
use pagesync_store::MemoryStore;

use crate::error::Result;
use crate::input::{load_desired, load_snapshot, save_snapshot};

/// Placeholder shown for records without a title
const UNTITLED: &str = "Untitled";

/// Paths and flags of one `pagesync sync` invocation
#[derive(Debug, Clone)]
pub struct SyncArgs<'a> {
    pub config: &'a Path,
    pub snapshot: &'a Path,
    pub desired: &'a Path,
    pub dry_run: bool,
    pub json: bool,
}

/// Run the sync command
///
/// Loads the snapshot into an in-memory store, reconciles the desired
/// records against it and writes the resulting snapshot back unless
/// `dry_run` is set.
pub async fn run_sync(args: SyncArgs<'_>) -> Result<()> {
    let config = SyncConfig::load(args.config)?;
    let entries = load_snapshot(args.snapshot)?;
    let desired = load_desired(args.desired)?;

    let requests = desired
        .into_iter()
        .map(|d| d.into_request(&config.digest_property))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        collection = %config.collection,
        records = entries.len(),
        desired = requests.len(),
        "Starting sync"
    );

    let store = Arc::new(MemoryStore::from_snapshot(&config.collection, entries));
    let ctx = config.context();
    let mut synchronizer =
        Synchronizer::connect(store.clone(), &ctx, &config.collection, config.filter.as_ref())
            .await?;
    let report = run(&mut synchronizer, &ctx, requests, config.archive_unmatched).await?;

    if !args.dry_run {
        save_snapshot(args.snapshot, &store.snapshot(&config.collection))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&config, &report, &store, args.dry_run);
    }
    Ok(())
}

fn print_report(config: &SyncConfig, report: &SyncReport, store: &MemoryStore, dry_run: bool) {
    let heading = if dry_run {
        "Dry run for collection"
    } else {
        "Synchronized collection"
    };
    println!("{} {} {}", "=>".blue().bold(), heading, config.collection.cyan());

    let label = |id: &str| {
        store
            .record(id)
            .map(|r| r.title_with_emoji(UNTITLED))
            .unwrap_or_else(|| UNTITLED.to_string())
    };

    for id in &report.created {
        println!("   {} {} {}", "+".green(), label(id), id.dimmed());
    }
    for id in &report.updated {
        println!("   {} {} {}", "~".yellow(), label(id), id.dimmed());
    }
    for id in &report.archived {
        println!("   {} {} {}", "-".red(), label(id), id.dimmed());
    }

    println!();
    if report.is_noop() {
        println!(
            "{} Collection is up to date ({} unchanged).",
            "OK".green().bold(),
            report.unchanged.len()
        );
    } else {
        println!(
            "{} created, {} updated, {} unchanged, {} archived",
            report.created.len(),
            report.updated.len(),
            report.unchanged.len(),
            report.archived.len()
        );
    }
    if dry_run {
        println!("{} Snapshot not written.", "DRY RUN".yellow().bold());
    }
}

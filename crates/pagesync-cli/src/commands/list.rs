//! List command implementation

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use crate::error::Result;
use crate::input::load_snapshot;

/// Run the list command
///
/// Prints every non-archived record of the snapshot with its display title.
pub fn run_list(snapshot: &Path, json: bool) -> Result<()> {
    let records: Vec<_> = load_snapshot(snapshot)?
        .into_iter()
        .map(|entry| entry.record)
        .filter(|record| !record.archived)
        .collect();

    if json {
        let entries: Vec<serde_json::Value> = records
            .iter()
            .map(|r| {
                json!({
                    "id": r.id,
                    "title": r.title(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} Snapshot holds no live records.", "=>".blue().bold());
        return Ok(());
    }
    for record in &records {
        println!(
            "   {} {} {}",
            "-".blue(),
            record.title_with_emoji("Untitled"),
            record.id.dimmed()
        );
    }
    Ok(())
}

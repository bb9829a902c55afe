//! Record and block fixtures.

use pagesync_model::{Block, Property, PropertyEntry, Record};

/// Collection id used by fixtures
pub const COLLECTION: &str = "tasks-db";

/// Name of the digest property used by fixtures
pub const DIGEST: &str = "Digest";

/// A record whose `Name` title property carries the store id `title`.
pub fn task(id: &str, title: &str) -> Record {
    Record::new(id).with_property("Name", PropertyEntry::with_id("title", Property::title(title)))
}

/// A [`task`] that also stores `digest` in the [`DIGEST`] property.
pub fn task_with_digest(id: &str, title: &str, digest: &str) -> Record {
    task(id, title).with_property(DIGEST, Property::rich_text(digest))
}

/// `n` tasks with ids `r0..r{n-1}` and titles `Task 0..Task {n-1}`.
pub fn tasks(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| task(&format!("r{i}"), &format!("Task {i}")))
        .collect()
}

/// A short, varied block list.
pub fn sample_blocks() -> Vec<Block> {
    vec![
        Block::heading(1, "Overview"),
        Block::paragraph("Quarterly planning notes."),
        Block::bulleted("Hire two engineers"),
        Block::to_do("Book offsite", false),
        Block::divider(),
    ]
}

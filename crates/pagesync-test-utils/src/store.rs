//! Seeded [`MemoryStore`] helpers.

use std::sync::Arc;

use pagesync_model::{Block, Record};
use pagesync_store::{MemoryStore, RecordStore};

use crate::records::COLLECTION;

/// A store holding `records` under [`COLLECTION`], in order.
pub fn seeded(records: Vec<Record>) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new().with_records(COLLECTION, records))
}

/// A store holding one record under [`COLLECTION`] with the given children.
pub fn seeded_with_children(record: Record, children: Vec<Block>) -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    store.insert(COLLECTION, record, children);
    Arc::new(store)
}

/// Upcast a concrete store for APIs taking `Arc<dyn RecordStore>`.
pub fn as_dyn(store: &Arc<MemoryStore>) -> Arc<dyn RecordStore> {
    store.clone()
}

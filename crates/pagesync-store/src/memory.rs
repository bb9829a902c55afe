//! In-process record store
//!
//! [`MemoryStore`] keeps records and their children in memory, journals every
//! call it receives and can be told to fail specific calls. It backs the CLI's
//! local snapshot files and the test suites.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagesync_model::{Block, PropertyEntry, Record};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::RecordStore;
use crate::context::Context;
use crate::payload::{CreateRequest, MAX_PAGE_SIZE, QueryRequest, QueryResponse, UpdateRequest};
use crate::{Error, Result};

/// Kind of store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Query,
    CreateRecord,
    UpdateRecord,
    ListChildren,
    DeleteBlock,
    AppendChildren,
}

impl CallKind {
    fn name(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::CreateRecord => "create_record",
            Self::UpdateRecord => "update_record",
            Self::ListChildren => "list_children",
            Self::DeleteBlock => "delete_block",
            Self::AppendChildren => "append_children",
        }
    }
}

/// A journaled store call with its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query {
        collection_id: String,
        start_cursor: Option<String>,
    },
    CreateRecord {
        request: CreateRequest,
    },
    UpdateRecord {
        record_id: String,
        request: UpdateRequest,
    },
    ListChildren {
        record_id: String,
    },
    DeleteBlock {
        block_id: String,
    },
    AppendChildren {
        record_id: String,
        blocks: Vec<Block>,
    },
}

impl Call {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::Query { .. } => CallKind::Query,
            Self::CreateRecord { .. } => CallKind::CreateRecord,
            Self::UpdateRecord { .. } => CallKind::UpdateRecord,
            Self::ListChildren { .. } => CallKind::ListChildren,
            Self::DeleteBlock { .. } => CallKind::DeleteBlock,
            Self::AppendChildren { .. } => CallKind::AppendChildren,
        }
    }

    /// True for calls that change remote state
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::Query { .. } | Self::ListChildren { .. })
    }
}

/// A record together with its child blocks, as persisted in snapshot files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    #[serde(flatten)]
    pub record: Record,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
}

struct Stored {
    collection_id: String,
    record: Record,
    children: Vec<Block>,
}

struct Fault {
    kind: CallKind,
    remaining: usize,
}

#[derive(Default)]
struct State {
    records: Vec<Stored>,
    calls: Vec<Call>,
    faults: Vec<Fault>,
}

impl State {
    fn find_mut(&mut self, record_id: &str) -> Result<&mut Stored> {
        self.records
            .iter_mut()
            .find(|s| s.record.id == record_id)
            .ok_or_else(|| Error::NotFound {
                id: record_id.to_string(),
            })
    }

    /// Journal `call` and trip any fault armed for its kind
    fn begin(&mut self, call: Call) -> Result<()> {
        let kind = call.kind();
        self.calls.push(call);

        for fault in self.faults.iter_mut().filter(|f| f.kind == kind) {
            fault.remaining = fault.remaining.saturating_sub(1);
        }
        let tripped = self
            .faults
            .iter()
            .position(|f| f.kind == kind && f.remaining == 0);

        match tripped {
            Some(index) => {
                self.faults.remove(index);
                Err(Error::rejected(kind.name(), "injected failure"))
            }
            None => Ok(()),
        }
    }
}

fn assign_ids(blocks: &[Block]) -> Vec<Block> {
    blocks
        .iter()
        .map(|b| b.clone().with_id(Uuid::new_v4().to_string()))
        .collect()
}

/// In-memory [`RecordStore`]
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    page_size: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap query pages at `page_size` records regardless of what callers request
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Seed a store with records under `collection_id`, in order
    pub fn with_records(
        self,
        collection_id: &str,
        records: impl IntoIterator<Item = Record>,
    ) -> Self {
        for record in records {
            self.insert(collection_id, record, Vec::new());
        }
        self
    }

    /// Seed a store from snapshot entries under `collection_id`
    pub fn from_snapshot(
        collection_id: &str,
        entries: impl IntoIterator<Item = SnapshotEntry>,
    ) -> Self {
        let store = Self::new();
        for entry in entries {
            store.insert(collection_id, entry.record, entry.children);
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| Error::Poisoned)
    }

    /// Lock for seeding and test setup, taking over a poisoned state
    fn lock_for_setup(&self, operation: &str) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::warn!(operation, "Memory store lock was poisoned; reusing its state");
            poisoned.into_inner()
        })
    }

    /// Add a record with its children; blocks without ids are given one.
    ///
    /// Seeding is not journaled.
    pub fn insert(&self, collection_id: &str, record: Record, children: Vec<Block>) {
        let children = children
            .into_iter()
            .map(|b| match b.id {
                Some(_) => b,
                None => b.with_id(Uuid::new_v4().to_string()),
            })
            .collect();
        self.lock_for_setup("insert").records.push(Stored {
            collection_id: collection_id.to_string(),
            record,
            children,
        });
    }

    /// Make the `nth` upcoming call of `kind` (1-based) fail
    pub fn fail_nth(&self, kind: CallKind, nth: usize) {
        self.lock_for_setup("fail_nth").faults.push(Fault {
            kind,
            remaining: nth.max(1),
        });
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.lock().map(|s| s.calls.clone()).unwrap_or_default()
    }

    /// Calls received so far that change remote state
    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.lock_for_setup("clear_calls").calls.clear();
    }

    /// Any record by id, archived or not
    pub fn record(&self, record_id: &str) -> Option<Record> {
        let state = self.lock().ok()?;
        state
            .records
            .iter()
            .find(|s| s.record.id == record_id)
            .map(|s| s.record.clone())
    }

    /// Non-archived records of a collection, in insertion order
    pub fn records(&self, collection_id: &str) -> Vec<Record> {
        self.snapshot(collection_id)
            .into_iter()
            .map(|e| e.record)
            .filter(|r| !r.archived)
            .collect()
    }

    /// Child blocks of a record
    pub fn children(&self, record_id: &str) -> Vec<Block> {
        self.lock()
            .ok()
            .and_then(|s| {
                s.records
                    .iter()
                    .find(|r| r.record.id == record_id)
                    .map(|r| r.children.clone())
            })
            .unwrap_or_default()
    }

    /// Every record of a collection with its children, archived ones included
    pub fn snapshot(&self, collection_id: &str) -> Vec<SnapshotEntry> {
        let Ok(state) = self.lock() else {
            return Vec::new();
        };
        state
            .records
            .iter()
            .filter(|s| s.collection_id == collection_id)
            .map(|s| SnapshotEntry {
                record: s.record.clone(),
                children: s.children.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn query(
        &self,
        ctx: &Context,
        collection_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse> {
        ctx.check()?;
        let mut state = self.lock()?;
        state.begin(Call::Query {
            collection_id: collection_id.to_string(),
            start_cursor: request.start_cursor.clone(),
        })?;

        let offset = match &request.start_cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| Error::rejected("query", format!("invalid cursor: {}", cursor)))?,
            None => 0,
        };
        let page_size = request
            .page_size
            .clamp(1, MAX_PAGE_SIZE)
            .min(self.page_size.unwrap_or(MAX_PAGE_SIZE)) as usize;

        let matching: Vec<&Record> = state
            .records
            .iter()
            .filter(|s| s.collection_id == collection_id && !s.record.archived)
            .map(|s| &s.record)
            .filter(|r| request.filter.as_ref().is_none_or(|f| f.matches(r)))
            .collect();

        let results: Vec<Record> = matching
            .iter()
            .skip(offset)
            .take(page_size)
            .map(|r| (*r).clone())
            .collect();
        let end = offset + results.len();
        let has_more = end < matching.len();

        Ok(QueryResponse {
            results,
            has_more,
            next_cursor: has_more.then(|| end.to_string()),
        })
    }

    async fn create_record(&self, ctx: &Context, request: &CreateRequest) -> Result<Record> {
        ctx.check()?;
        let mut state = self.lock()?;
        state.begin(Call::CreateRecord {
            request: request.clone(),
        })?;

        let record = Record {
            id: Uuid::new_v4().to_string(),
            archived: false,
            icon: request.icon.clone(),
            cover: request.cover.clone(),
            properties: request
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), PropertyEntry::new(v.clone())))
                .collect(),
        };
        state.records.push(Stored {
            collection_id: request.parent.database_id.clone(),
            record: record.clone(),
            children: assign_ids(&request.children),
        });
        tracing::debug!(record = %record.id, "Created record");
        Ok(record)
    }

    async fn update_record(
        &self,
        ctx: &Context,
        record_id: &str,
        request: &UpdateRequest,
    ) -> Result<Record> {
        ctx.check()?;
        let mut state = self.lock()?;
        state.begin(Call::UpdateRecord {
            record_id: record_id.to_string(),
            request: request.clone(),
        })?;

        let stored = state.find_mut(record_id)?;
        let record = &mut stored.record;
        for (key, value) in &request.properties {
            // Keys may address a property by id as well as by name
            let by_id = record
                .properties
                .iter()
                .find(|(_, e)| e.id.as_deref() == Some(key.as_str()))
                .map(|(name, _)| name.clone());
            let name = by_id.unwrap_or_else(|| key.clone());
            match record.properties.get_mut(&name) {
                Some(entry) => entry.value = value.clone(),
                None => {
                    record
                        .properties
                        .insert(name, PropertyEntry::new(value.clone()));
                }
            }
        }
        if let Some(icon) = &request.icon {
            record.icon = Some(icon.clone());
        }
        if let Some(cover) = &request.cover {
            record.cover = Some(cover.clone());
        }
        if request.archived {
            record.archived = true;
        }
        Ok(record.clone())
    }

    async fn list_children(&self, ctx: &Context, record_id: &str) -> Result<Vec<Block>> {
        ctx.check()?;
        let mut state = self.lock()?;
        state.begin(Call::ListChildren {
            record_id: record_id.to_string(),
        })?;
        Ok(state.find_mut(record_id)?.children.clone())
    }

    async fn delete_block(&self, ctx: &Context, block_id: &str) -> Result<()> {
        ctx.check()?;
        let mut state = self.lock()?;
        state.begin(Call::DeleteBlock {
            block_id: block_id.to_string(),
        })?;

        for stored in state.records.iter_mut() {
            if let Some(pos) = stored
                .children
                .iter()
                .position(|b| b.id.as_deref() == Some(block_id))
            {
                stored.children.remove(pos);
                return Ok(());
            }
        }
        Err(Error::NotFound {
            id: block_id.to_string(),
        })
    }

    async fn append_children(
        &self,
        ctx: &Context,
        record_id: &str,
        blocks: &[Block],
    ) -> Result<()> {
        ctx.check()?;
        let mut state = self.lock()?;
        state.begin(Call::AppendChildren {
            record_id: record_id.to_string(),
            blocks: blocks.to_vec(),
        })?;
        let stored = state.find_mut(record_id)?;
        stored.children.extend(assign_ids(blocks));
        Ok(())
    }
}

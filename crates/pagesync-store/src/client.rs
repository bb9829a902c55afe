//! RecordStore trait and helpers built on it

use async_trait::async_trait;
use pagesync_model::{Block, Record};

use crate::Result;
use crate::context::Context;
use crate::filter::Filter;
use crate::payload::{CreateRequest, QueryRequest, QueryResponse, UpdateRequest};

/// Primitive operations of a remote record store
///
/// Implementations make a single attempt per call and surface failures
/// verbatim. Every operation receives the caller's context unchanged.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one page of records in `collection_id`
    async fn query(
        &self,
        ctx: &Context,
        collection_id: &str,
        request: &QueryRequest,
    ) -> Result<QueryResponse>;

    async fn create_record(&self, ctx: &Context, request: &CreateRequest) -> Result<Record>;

    async fn update_record(
        &self,
        ctx: &Context,
        record_id: &str,
        request: &UpdateRequest,
    ) -> Result<Record>;

    /// Ordered child blocks of a record
    async fn list_children(&self, ctx: &Context, record_id: &str) -> Result<Vec<Block>>;

    async fn delete_block(&self, ctx: &Context, block_id: &str) -> Result<()>;

    /// Append blocks after the record's existing children
    async fn append_children(
        &self,
        ctx: &Context,
        record_id: &str,
        blocks: &[Block],
    ) -> Result<()>;

    /// Soft-delete a record: an update with the archived flag and no property diff
    async fn archive_record(&self, ctx: &Context, record_id: &str) -> Result<Record> {
        self.update_record(ctx, record_id, &UpdateRequest::archive()).await
    }
}

/// Fetch every record in `collection_id` matching `filter`.
///
/// Follows the query cursor until the store reports no more pages and
/// returns the records in fetch order. The first failing page aborts.
pub async fn query_all(
    store: &dyn RecordStore,
    ctx: &Context,
    collection_id: &str,
    filter: Option<&Filter>,
) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut request = QueryRequest::new(filter.cloned());

    loop {
        let page = store.query(ctx, collection_id, &request).await?;
        tracing::debug!(
            collection = collection_id,
            fetched = page.results.len(),
            has_more = page.has_more,
            "Fetched query page"
        );
        records.extend(page.results);

        match page.next_cursor {
            Some(cursor) if page.has_more => request.start_cursor = Some(cursor),
            _ => break,
        }
    }

    Ok(records)
}

/// Delete every child block of `parent_id`, in order.
pub async fn clear_children(store: &dyn RecordStore, ctx: &Context, parent_id: &str) -> Result<()> {
    let children = store.list_children(ctx, parent_id).await?;
    let mut deleted = 0usize;
    for id in children.iter().filter_map(|b| b.id.as_deref()) {
        store.delete_block(ctx, id).await?;
        deleted += 1;
    }
    tracing::debug!(parent = parent_id, deleted, "Cleared children");
    Ok(())
}

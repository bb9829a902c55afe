//! Reconciler
//!
//! A [`Synchronizer`] is built from a full snapshot of a collection. Each
//! [`Synchronizer::synchronize`] call claims at most one record from the
//! unmatched set, diffs it against the desired state and issues the minimal
//! mutation. Whatever is still unmatched at the end can be archived with
//! [`Synchronizer::delete_unmatched_pages`].

use std::sync::Arc;

use pagesync_model::{Property, Record};
use pagesync_store::{
    Context, CreateRequest, Filter, RecordStore, UpdateRequest, clear_children, query_all,
};

use crate::compare::properties_equal;
use crate::matcher::Matcher;
use crate::request::{ContentSpec, SyncAction, SynchronizeRequest, SynchronizeResult};
use crate::{Error, Result};

/// Reconciles desired records against one collection
pub struct Synchronizer {
    store: Arc<dyn RecordStore>,
    collection_id: String,
    /// Records not yet claimed by any request, in fetch order
    unmatched: Vec<Record>,
}

impl Synchronizer {
    /// Fetch the current contents of `collection_id` and start a run over them.
    ///
    /// # Errors
    ///
    /// Returns the store error if any query page fails.
    pub async fn connect(
        store: Arc<dyn RecordStore>,
        ctx: &Context,
        collection_id: impl Into<String>,
        filter: Option<&Filter>,
    ) -> Result<Self> {
        let collection_id = collection_id.into();
        let records = query_all(store.as_ref(), ctx, &collection_id, filter).await?;
        tracing::debug!(
            collection = %collection_id,
            records = records.len(),
            "Loaded collection snapshot"
        );
        Ok(Self::from_records(store, collection_id, records))
    }

    /// Start a run over an already fetched snapshot
    pub fn from_records(
        store: Arc<dyn RecordStore>,
        collection_id: impl Into<String>,
        records: Vec<Record>,
    ) -> Self {
        Self {
            store,
            collection_id: collection_id.into(),
            unmatched: records,
        }
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Records no request has claimed so far, in fetch order
    pub fn unmatched_pages(&self) -> &[Record] {
        &self.unmatched
    }

    /// Bring one logical record to its desired state.
    ///
    /// The first unmatched record accepted by the request's matcher is
    /// claimed and removed from the unmatched set before any store call is
    /// made; a failing store call does not put it back. Without a match a new
    /// record is created.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingMatcher`] if the request has no matcher
    /// - [`Error::UnsupportedComparison`] if a desired property's variant
    ///   differs from the stored one
    /// - [`Error::DigestPropertyType`] if the digest property is not text
    /// - [`Error::Store`] for any failing store call
    pub async fn synchronize(
        &mut self,
        ctx: &Context,
        request: SynchronizeRequest,
    ) -> Result<SynchronizeResult> {
        let matcher = request.matcher.as_ref().ok_or(Error::MissingMatcher)?;

        if request.cover.is_some() {
            tracing::debug!("Cover images are not synchronized; ignoring requested cover");
        }

        match self.claim(matcher) {
            Some(record) => self.update_existing(ctx, record, &request).await,
            None => self.create(ctx, request).await,
        }
    }

    fn claim(&mut self, matcher: &Matcher) -> Option<Record> {
        let index = self.unmatched.iter().position(|r| matcher.matches(r))?;
        Some(self.unmatched.remove(index))
    }

    async fn update_existing(
        &self,
        ctx: &Context,
        record: Record,
        request: &SynchronizeRequest,
    ) -> Result<SynchronizeResult> {
        let mut update = UpdateRequest::default();

        for (key, desired) in &request.properties {
            let changed = match record.property(key) {
                Some(entry) => !properties_equal(desired, &entry.value).map_err(|source| {
                    Error::UnsupportedComparison {
                        key: key.clone(),
                        source,
                    }
                })?,
                None => true,
            };
            if changed {
                update.properties.insert(key.clone(), desired.clone());
            }
        }

        if let Some(icon) = &request.icon {
            let desired = serde_json::to_string(&Some(icon))?;
            let current = serde_json::to_string(&record.icon)?;
            if desired != current {
                update.icon = Some(icon.clone());
            }
        }

        if let Some(content) = &request.children {
            let digest = content.digest()?;
            if stored_digest(&record, content)? != digest {
                self.replace_children(ctx, &record.id, content).await?;
                update
                    .properties
                    .insert(content.digest_property.clone(), Property::rich_text(digest));
            } else {
                tracing::debug!(record = %record.id, "Content digest unchanged");
            }
        }

        if update.is_empty() {
            tracing::debug!(record = %record.id, "Record already up to date");
            return Ok(SynchronizeResult {
                record,
                action: SyncAction::Unchanged,
            });
        }

        let updated = self.store.update_record(ctx, &record.id, &update).await?;
        tracing::info!(
            record = %updated.id,
            properties = update.properties.len(),
            icon = update.icon.is_some(),
            "Updated record"
        );
        Ok(SynchronizeResult {
            record: updated,
            action: SyncAction::Updated(update),
        })
    }

    async fn replace_children(
        &self,
        ctx: &Context,
        record_id: &str,
        content: &ContentSpec,
    ) -> Result<()> {
        clear_children(self.store.as_ref(), ctx, record_id).await?;
        self.store.append_children(ctx, record_id, &content.blocks).await?;
        tracing::debug!(
            record = record_id,
            blocks = content.blocks.len(),
            "Rewrote content"
        );
        Ok(())
    }

    async fn create(
        &self,
        ctx: &Context,
        request: SynchronizeRequest,
    ) -> Result<SynchronizeResult> {
        let mut create = CreateRequest::new(&self.collection_id);
        create.properties = request.properties;
        create.icon = request.icon;

        if let Some(content) = request.children {
            let digest = content.digest()?;
            create
                .properties
                .insert(content.digest_property, Property::rich_text(digest));
            create.children = content.blocks;
        }

        let record = self.store.create_record(ctx, &create).await?;
        tracing::info!(record = %record.id, collection = %self.collection_id, "Created record");
        Ok(SynchronizeResult {
            record,
            action: SyncAction::Created(create),
        })
    }

    /// Archive every record still in the unmatched set, in order.
    ///
    /// Stops at the first failure. Records archived before it are dropped
    /// from the unmatched set; the failing record and everything after it
    /// stay for a retry.
    pub async fn delete_unmatched_pages(&mut self, ctx: &Context) -> Result<()> {
        let mut archived = 0;
        let mut outcome: Result<()> = Ok(());

        for record in &self.unmatched {
            match self.store.archive_record(ctx, &record.id).await {
                Ok(_) => {
                    tracing::info!(record = %record.id, "Archived unmatched record");
                    archived += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        record = %record.id,
                        remaining = self.unmatched.len() - archived,
                        error = %err,
                        "Stopped archiving unmatched records"
                    );
                    outcome = Err(err.into());
                    break;
                }
            }
        }

        self.unmatched.drain(..archived);
        outcome
    }
}

/// Digest text currently stored on `record`; empty when the property is absent
fn stored_digest(record: &Record, content: &ContentSpec) -> Result<String> {
    match record.property(&content.digest_property) {
        None => Ok(String::new()),
        Some(entry) => entry.value.plain_text().ok_or_else(|| Error::DigestPropertyType {
            key: content.digest_property.clone(),
            found: entry.value.kind(),
        }),
    }
}

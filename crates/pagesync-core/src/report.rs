//! Whole-run orchestration and its report

use pagesync_store::Context;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::request::{SyncAction, SynchronizeRequest, SynchronizeResult};
use crate::synchronizer::Synchronizer;

/// Record ids touched by a run, grouped by outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub unchanged: Vec<String>,
    pub archived: Vec<String>,
}

impl SyncReport {
    /// Add the outcome of one synchronize call
    pub fn record(&mut self, result: &SynchronizeResult) {
        let id = result.record.id.clone();
        match result.action {
            SyncAction::Created(_) => self.created.push(id),
            SyncAction::Updated(_) => self.updated.push(id),
            SyncAction::Unchanged => self.unchanged.push(id),
        }
    }

    /// True when the run changed nothing in the store
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.archived.is_empty()
    }
}

/// Synchronize every request in order, then optionally archive leftovers.
///
/// # Errors
///
/// The first failing request or archive aborts the run and is returned.
pub async fn run<I>(
    synchronizer: &mut Synchronizer,
    ctx: &Context,
    requests: I,
    archive_unmatched: bool,
) -> Result<SyncReport>
where
    I: IntoIterator<Item = SynchronizeRequest>,
{
    let mut report = SyncReport::default();

    for request in requests {
        let result = synchronizer.synchronize(ctx, request).await?;
        report.record(&result);
    }

    if archive_unmatched {
        let leftovers: Vec<String> = synchronizer
            .unmatched_pages()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        synchronizer.delete_unmatched_pages(ctx).await?;
        report.archived = leftovers;
    }

    tracing::info!(
        created = report.created.len(),
        updated = report.updated.len(),
        unchanged = report.unchanged.len(),
        archived = report.archived.len(),
        "Sync run complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesync_model::Record;
    use pagesync_store::UpdateRequest;

    #[test]
    fn report_groups_by_action() {
        let mut report = SyncReport::default();
        report.record(&SynchronizeResult {
            record: Record::new("a"),
            action: SyncAction::Unchanged,
        });
        report.record(&SynchronizeResult {
            record: Record::new("b"),
            action: SyncAction::Updated(UpdateRequest::default()),
        });

        assert_eq!(report.unchanged, vec!["a"]);
        assert_eq!(report.updated, vec!["b"]);
        assert!(!report.is_noop());
    }

    #[test]
    fn empty_report_is_noop() {
        assert!(SyncReport::default().is_noop());
    }
}

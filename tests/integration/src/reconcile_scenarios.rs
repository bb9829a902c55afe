//! Multi-run reconciliation scenarios
//!
//! Each scenario drives several complete runs (connect, synchronize every
//! desired record, archive leftovers) against one store and checks what the
//! store looks like in between.

use std::sync::Arc;

use pagesync_core::{
    ContentSpec, Matcher, SyncConfig, SyncReport, Synchronizer, SynchronizeRequest, run,
};
use pagesync_model::{Block, Icon, Property, Record};
use pagesync_store::{CallKind, Condition, Context, Filter, MemoryStore};
use pagesync_test_utils::records::{COLLECTION, DIGEST};
use pagesync_test_utils::store::{as_dyn, seeded};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A desired task keyed by a stable external identifier
#[derive(Clone)]
struct Desired {
    key: &'static str,
    title: &'static str,
    status: &'static str,
    notes: Vec<&'static str>,
}

impl Desired {
    fn new(key: &'static str, title: &'static str, status: &'static str) -> Self {
        Self {
            key,
            title,
            status,
            notes: Vec::new(),
        }
    }

    fn notes(mut self, notes: &[&'static str]) -> Self {
        self.notes = notes.to_vec();
        self
    }

    fn request(&self) -> SynchronizeRequest {
        let key = Property::rich_text(self.key);
        let blocks = self.notes.iter().map(|n| Block::bulleted(*n)).collect();
        SynchronizeRequest::new(Matcher::by_property("Key", key.clone()))
            .property("Key", key)
            .property("Name", Property::title(self.title))
            .property("Status", Property::select(self.status))
            .icon(Icon::emoji("📌"))
            .children(ContentSpec::new(DIGEST, blocks))
    }
}

async fn sync_run(store: &Arc<MemoryStore>, config: &SyncConfig, desired: &[Desired]) -> SyncReport {
    let ctx = config.context();
    let mut synchronizer =
        Synchronizer::connect(as_dyn(store), &ctx, &config.collection, config.filter.as_ref())
            .await
            .unwrap();
    run(
        &mut synchronizer,
        &ctx,
        desired.iter().map(Desired::request),
        config.archive_unmatched,
    )
    .await
    .unwrap()
}

fn live_titles(store: &MemoryStore) -> Vec<String> {
    let mut titles: Vec<String> = store
        .records(COLLECTION)
        .iter()
        .filter_map(Record::title)
        .collect();
    titles.sort();
    titles
}

fn count(store: &MemoryStore, kind: CallKind) -> usize {
    store.calls().iter().filter(|c| c.kind() == kind).count()
}

#[tokio::test]
async fn evolving_desired_set_converges() {
    let store = seeded(vec![]);
    let config = SyncConfig::new(COLLECTION);

    let week1 = vec![
        Desired::new("T-1", "Write RFC", "Todo").notes(&["outline", "draft"]),
        Desired::new("T-2", "Review budget", "Todo"),
        Desired::new("T-3", "Plan offsite", "Doing"),
    ];
    let report = sync_run(&store, &config, &week1).await;
    assert_eq!(report.created.len(), 3);
    assert_eq!(live_titles(&store), vec!["Plan offsite", "Review budget", "Write RFC"]);

    // T-1 renamed, T-2 dropped, T-4 added
    let week2 = vec![
        Desired::new("T-1", "Write RFC v2", "Doing").notes(&["outline", "draft"]),
        Desired::new("T-3", "Plan offsite", "Doing"),
        Desired::new("T-4", "Hire designer", "Todo"),
    ];
    store.clear_calls();
    let report = sync_run(&store, &config, &week2).await;

    assert_eq!(report.updated.len(), 1);
    assert_eq!(report.unchanged.len(), 1);
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.archived.len(), 1);
    assert_eq!(
        live_titles(&store),
        vec!["Hire designer", "Plan offsite", "Write RFC v2"]
    );
    // Same notes, so no content rewrite for the renamed task
    assert_eq!(count(&store, CallKind::ListChildren), 0);

    store.clear_calls();
    let report = sync_run(&store, &config, &week2).await;
    assert!(report.is_noop());
    assert_eq!(report.unchanged.len(), 3);
    assert!(store.mutations().is_empty());
}

#[tokio::test]
async fn content_changes_rewrite_only_affected_records() {
    let store = seeded(vec![]);
    let config = SyncConfig::new(COLLECTION);

    let first = vec![
        Desired::new("A", "Alpha", "Todo").notes(&["one"]),
        Desired::new("B", "Beta", "Todo").notes(&["two"]),
    ];
    sync_run(&store, &config, &first).await;

    let second = vec![
        Desired::new("A", "Alpha", "Todo").notes(&["one", "one and a half"]),
        Desired::new("B", "Beta", "Todo").notes(&["two"]),
    ];
    store.clear_calls();
    let report = sync_run(&store, &config, &second).await;

    assert_eq!(report.updated.len(), 1);
    assert_eq!(report.unchanged.len(), 1);
    assert_eq!(count(&store, CallKind::ListChildren), 1);
    assert_eq!(count(&store, CallKind::DeleteBlock), 1);
    assert_eq!(count(&store, CallKind::AppendChildren), 1);

    let alpha = &report.updated[0];
    let notes: Vec<Block> = store.children(alpha).iter().map(Block::without_id).collect();
    assert_eq!(
        notes,
        vec![Block::bulleted("one"), Block::bulleted("one and a half")]
    );
}

#[tokio::test]
async fn filter_shields_records_outside_the_scope() {
    let store = seeded(vec![
        Record::new("p1")
            .with_property("Name", Property::title("Platform task"))
            .with_property("Team", Property::select("Platform")),
        Record::new("g1")
            .with_property("Name", Property::title("Growth task"))
            .with_property("Team", Property::select("Growth")),
    ]);
    let mut config = SyncConfig::new(COLLECTION);
    config.filter = Some(Filter::property(
        "Team",
        Condition::SelectEquals("Platform".into()),
    ));

    let report = sync_run(&store, &config, &[]).await;

    assert_eq!(report.archived, vec!["p1"]);
    assert_eq!(live_titles(&store), vec!["Growth task"]);
}

#[tokio::test]
async fn interrupted_archive_is_finished_by_next_run() {
    let store = seeded(vec![]);
    let config = SyncConfig::new(COLLECTION);
    let all = vec![
        Desired::new("A", "Alpha", "Todo"),
        Desired::new("B", "Beta", "Todo"),
        Desired::new("C", "Gamma", "Todo"),
    ];
    sync_run(&store, &config, &all).await;

    // Second archive attempt fails
    store.fail_nth(CallKind::UpdateRecord, 2);
    let ctx = Context::new();
    let mut synchronizer = Synchronizer::connect(as_dyn(&store), &ctx, COLLECTION, None)
        .await
        .unwrap();
    assert!(run(&mut synchronizer, &ctx, Vec::new(), true).await.is_err());
    assert_eq!(synchronizer.unmatched_pages().len(), 2);
    assert_eq!(store.records(COLLECTION).len(), 2);

    let report = sync_run(&store, &config, &[]).await;
    assert_eq!(report.archived.len(), 2);
    assert!(store.records(COLLECTION).is_empty());
}

#[tokio::test]
async fn config_file_drives_the_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pagesync.toml");
    std::fs::write(
        &path,
        format!(
            "collection = \"{}\"\narchive_unmatched = false\ntimeout_secs = 30\n",
            COLLECTION
        ),
    )
    .unwrap();
    let config = SyncConfig::load(&path).unwrap();

    let store = seeded(vec![]);
    sync_run(&store, &config, &[Desired::new("A", "Alpha", "Todo")]).await;
    let report = sync_run(&store, &config, &[Desired::new("B", "Beta", "Todo")]).await;

    assert!(report.archived.is_empty());
    assert_eq!(live_titles(&store), vec!["Alpha", "Beta"]);
}

#[tokio::test]
async fn snapshot_survives_a_json_round_trip() {
    let store = seeded(vec![]);
    let config = SyncConfig::new(COLLECTION);
    let desired = vec![
        Desired::new("A", "Alpha", "Todo").notes(&["x", "y"]),
        Desired::new("B", "Beta", "Done"),
    ];
    sync_run(&store, &config, &desired).await;

    let json = serde_json::to_string(&store.snapshot(COLLECTION)).unwrap();
    let reloaded = Arc::new(MemoryStore::from_snapshot(
        COLLECTION,
        serde_json::from_str::<Vec<pagesync_store::SnapshotEntry>>(&json).unwrap(),
    ));

    let report = sync_run(&reloaded, &config, &desired).await;
    assert!(report.is_noop());
    assert!(reloaded.mutations().is_empty());
}

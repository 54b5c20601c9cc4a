use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;

use washbook_core::storage::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PersistenceAdapter, LEDGER_KEY,
};
use washbook_core::{EntryKind, EntryUpdate, Ledger, LedgerError, LedgerStore, StoreConfig};

fn open_memory_store() -> (LedgerStore, Arc<MemoryKeyValueStore>) {
    let kv = Arc::new(MemoryKeyValueStore::new());
    let store = LedgerStore::open(PersistenceAdapter::new(kv.clone()), StoreConfig::default());
    (store, kv)
}

fn persisted(kv: &MemoryKeyValueStore) -> Ledger {
    let raw = kv
        .get(LEDGER_KEY)
        .expect("get should succeed")
        .expect("ledger should be persisted");
    serde_json::from_str(&raw).expect("persisted ledger should parse")
}

fn add_corolla_and_civic(store: &mut LedgerStore) {
    store
        .add_entry("2024-05-01T10:00:00Z", "Corolla", 200.0, "wash", EntryKind::Credit)
        .expect("add should succeed");
    store
        .add_entry("2024-05-01T11:00:00Z", "Civic", 50.0, "", EntryKind::Debit)
        .expect("add should succeed");
}

#[tokio::test(start_paused = true)]
async fn test_add_edit_delete_scenario() {
    let (mut store, _kv) = open_memory_store();
    add_corolla_and_civic(&mut store);

    let snapshot = store.snapshot();
    let day = snapshot.get("2024-05-01").expect("day should exist");
    assert_eq!(day.credit, 200.0);
    assert_eq!(day.debit, 50.0);
    let names: Vec<_> = day.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Corolla", "Civic"]);

    let current = snapshot.entry("2024-05-01", 0).expect("entry should exist");
    let update = EntryUpdate::from_entry(current)
        .amount(300.0)
        .kind(EntryKind::Credit);
    store
        .edit_entry("2024-05-01", 0, &update)
        .expect("edit should succeed");
    let day = store.snapshot().get("2024-05-01").cloned().expect("day");
    assert_eq!((day.credit, day.debit), (300.0, 50.0));

    store
        .delete_entry("2024-05-01", 1)
        .expect("delete should succeed");
    let day = store.snapshot().get("2024-05-01").cloned().expect("day");
    assert_eq!((day.credit, day.debit), (300.0, 0.0));
    assert_eq!(day.entries.len(), 1);
    assert_eq!(day.entries[0].name, "Corolla");

    store
        .delete_entry("2024-05-01", 0)
        .expect("delete should succeed");
    assert!(store.snapshot().get("2024-05-01").is_none());
}

#[tokio::test(start_paused = true)]
async fn test_snapshots_are_immutable() {
    let (mut store, _kv) = open_memory_store();
    let before = store.snapshot();
    add_corolla_and_civic(&mut store);
    assert!(before.is_empty());
    assert_eq!(store.snapshot().entry_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_mutations_coalesce_into_one_write() {
    let (mut store, kv) = open_memory_store();
    for i in 0..5 {
        store
            .add_entry(
                &format!("2024-05-0{}T09:00:00Z", i + 1),
                "car",
                10.0,
                "",
                EntryKind::Credit,
            )
            .expect("add should succeed");
    }
    assert_eq!(kv.write_count(), 0);

    sleep(Duration::from_millis(1500)).await;

    assert_eq!(kv.write_count(), 1);
    assert_eq!(persisted(&kv), *store.snapshot());
    assert_eq!(persisted(&kv).len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_each_mutation_restarts_the_window() {
    let (mut store, kv) = open_memory_store();
    store
        .add_entry("2024-05-01T10:00:00Z", "Corolla", 200.0, "", EntryKind::Credit)
        .expect("add should succeed");

    sleep(Duration::from_millis(600)).await;
    store
        .add_entry("2024-05-01T11:00:00Z", "Civic", 50.0, "", EntryKind::Debit)
        .expect("add should succeed");

    sleep(Duration::from_millis(600)).await;
    assert_eq!(kv.write_count(), 0, "window should restart on the second add");

    sleep(Duration::from_millis(600)).await;
    assert_eq!(kv.write_count(), 1);
    assert_eq!(persisted(&kv).entry_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_separate_idle_periods_write_separately() {
    let (mut store, kv) = open_memory_store();
    store
        .add_entry("2024-05-01T10:00:00Z", "Corolla", 200.0, "", EntryKind::Credit)
        .expect("add should succeed");
    sleep(Duration::from_millis(1100)).await;
    store
        .delete_entry("2024-05-01", 0)
        .expect("delete should succeed");
    sleep(Duration::from_millis(1100)).await;

    assert_eq!(kv.write_count(), 2);
    assert!(persisted(&kv).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_pending_save() {
    let (mut store, kv) = open_memory_store();
    add_corolla_and_civic(&mut store);
    store.shutdown();

    sleep(Duration::from_millis(2000)).await;
    assert_eq!(kv.write_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_flush_writes_pending_change_immediately() {
    let (mut store, kv) = open_memory_store();
    add_corolla_and_civic(&mut store);

    store.flush().await.expect("flush should succeed");
    assert_eq!(kv.write_count(), 1);
    assert_eq!(persisted(&kv), *store.snapshot());

    sleep(Duration::from_millis(2000)).await;
    assert_eq!(kv.write_count(), 1, "flushed save must not fire again");
}

#[tokio::test(start_paused = true)]
async fn test_flush_without_changes_is_a_no_op() {
    let (store, kv) = open_memory_store();
    store.flush().await.expect("flush should succeed");
    assert_eq!(kv.write_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_not_found_leaves_state_and_storage_alone() {
    let (mut store, kv) = open_memory_store();
    add_corolla_and_civic(&mut store);
    store.flush().await.expect("flush should succeed");
    let before = store.snapshot();

    let update = EntryUpdate::from_entry(before.entry("2024-05-01", 0).expect("entry"));
    let err = store.edit_entry("2024-05-01", 9, &update).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
    let err = store.delete_entry("1999-01-01", 0).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    sleep(Duration::from_millis(2000)).await;
    assert_eq!(*store.snapshot(), *before);
    assert_eq!(kv.write_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_each_published_snapshot() {
    let (mut store, _kv) = open_memory_store();
    let mut changes = store.subscribe();
    assert!(!changes.has_changed().expect("sender alive"));

    store
        .add_entry("2024-05-01T10:00:00Z", "Corolla", 200.0, "", EntryKind::Credit)
        .expect("add should succeed");
    assert!(changes.has_changed().expect("sender alive"));
    let seen = changes.borrow_and_update().clone();
    assert_eq!(*seen, *store.snapshot());

    store
        .delete_entry("2024-05-01", 0)
        .expect("delete should succeed");
    changes.changed().await.expect("sender alive");
    assert!(changes.borrow().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_replace_all_round_trip_persists_immediately() {
    let (mut store, kv) = open_memory_store();
    let imported = json!({
        "2024-06-02": {
            "credit": 120.0,
            "debit": 0.0,
            "entries": [
                {"time": "2024-06-02T08:00:00Z", "name": "Swift", "amount": 120.0, "desc": "polish", "type": "credit"}
            ]
        },
        "2024-06-03": {
            "credit": 0.0,
            "debit": 30.0,
            "entries": [
                {"time": "2024-06-03T08:00:00Z", "name": "Soap", "amount": 30.0, "desc": "", "type": "debit"}
            ]
        }
    });

    store
        .replace_all(&imported)
        .await
        .expect("replace should succeed");

    assert_eq!(kv.write_count(), 1);
    assert_eq!(
        serde_json::to_value(&*store.snapshot()).expect("serialize"),
        imported
    );
    assert_eq!(persisted(&kv), *store.snapshot());
}

#[tokio::test(start_paused = true)]
async fn test_replace_all_rejects_malformed_input() {
    let (mut store, kv) = open_memory_store();
    add_corolla_and_civic(&mut store);
    let before = store.snapshot();

    let malformed = json!({"2024-05-01": {"credit": "lots", "debit": 0, "entries": []}});
    let err = store.replace_all(&malformed).await.unwrap_err();
    assert!(matches!(err, LedgerError::Import(_)));
    assert_eq!(*store.snapshot(), *before);

    let err = store.replace_all(&json!("just a string")).await.unwrap_err();
    assert!(matches!(err, LedgerError::Import(_)));
    assert_eq!(kv.write_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_replace_all_supersedes_pending_debounced_save() {
    let (mut store, kv) = open_memory_store();
    add_corolla_and_civic(&mut store);

    store
        .replace_all(&json!({}))
        .await
        .expect("replace should succeed");
    sleep(Duration::from_millis(2000)).await;

    assert_eq!(kv.write_count(), 1);
    assert!(persisted(&kv).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_save_failure_keeps_in_memory_state() {
    let (mut store, kv) = open_memory_store();
    kv.set_fail_writes(true);
    add_corolla_and_civic(&mut store);

    let err = store.flush().await.unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));
    assert_eq!(store.snapshot().entry_count(), 2);

    kv.set_fail_writes(false);
    store
        .add_entry("2024-05-02T09:00:00Z", "Alto", 80.0, "", EntryKind::Credit)
        .expect("add should succeed");
    store.flush().await.expect("flush should succeed");
    assert_eq!(persisted(&kv).entry_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_flush_retries_a_failed_debounced_save() {
    let (mut store, kv) = open_memory_store();
    kv.set_fail_writes(true);
    add_corolla_and_civic(&mut store);

    sleep(Duration::from_millis(1500)).await;
    assert_eq!(kv.write_count(), 0);
    assert!(kv.get(LEDGER_KEY).expect("get should succeed").is_none());

    let err = store.flush().await.unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));

    kv.set_fail_writes(false);
    store.flush().await.expect("flush should succeed");
    assert_eq!(kv.write_count(), 1);
    assert_eq!(persisted(&kv), *store.snapshot());

    store.flush().await.expect("flush should succeed");
    assert_eq!(kv.write_count(), 1, "saved snapshot must not be written again");
}

#[tokio::test(start_paused = true)]
async fn test_failed_replace_all_is_retried_by_flush() {
    let (mut store, kv) = open_memory_store();
    kv.set_fail_writes(true);

    let imported = json!({
        "2024-05-01": {"credit": 200, "debit": 0, "entries": [
            {"time": "2024-05-01T10:00:00.000Z", "name": "Corolla", "amount": 200, "desc": "", "type": "credit"}
        ]}
    });
    let err = store.replace_all(&imported).await.unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));
    assert_eq!(store.snapshot().entry_count(), 1);

    kv.set_fail_writes(false);
    store.flush().await.expect("flush should succeed");
    assert_eq!(persisted(&kv), *store.snapshot());
}

/// Holds every write until the test releases it.
struct GatedStore {
    inner: MemoryKeyValueStore,
    started: tokio::sync::mpsc::UnboundedSender<()>,
    release: Mutex<std::sync::mpsc::Receiver<()>>,
}

impl KeyValueStore for GatedStore {
    fn get(&self, key: &str) -> washbook_core::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> washbook_core::Result<()> {
        let _ = self.started.send(());
        if let Ok(release) = self.release.lock() {
            let _ = release.recv();
        }
        self.inner.set(key, value)
    }
}

#[tokio::test]
async fn test_slow_write_does_not_block_the_runtime() {
    let (started_tx, mut started_rx) = tokio::sync::mpsc::unbounded_channel();
    let (release_tx, release_rx) = std::sync::mpsc::channel();
    let kv = Arc::new(GatedStore {
        inner: MemoryKeyValueStore::new(),
        started: started_tx,
        release: Mutex::new(release_rx),
    });
    let mut store = LedgerStore::open(PersistenceAdapter::new(kv.clone()), StoreConfig::default());
    store
        .add_entry("2024-05-01T10:00:00Z", "Corolla", 200.0, "wash", EntryKind::Credit)
        .expect("add should succeed");

    let (flushed, ()) = tokio::join!(store.flush(), async {
        started_rx.recv().await.expect("write should start");
        assert_eq!(store.snapshot().entry_count(), 1);
        release_tx.send(()).expect("writer should be waiting");
    });

    flushed.expect("flush should succeed");
    assert_eq!(kv.inner.write_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_open_hydrates_from_storage() {
    let raw = r#"{"2024-05-01":{"credit":200,"debit":0,"entries":[{"time":"2024-05-01T10:00:00.000Z","name":"Corolla","amount":200,"desc":"wash","type":"credit"}]}}"#;
    let kv = Arc::new(MemoryKeyValueStore::new().with_value(LEDGER_KEY, raw));
    let store = LedgerStore::open(PersistenceAdapter::new(kv.clone()), StoreConfig::default());

    assert!(store.load_warning().is_none());
    let snapshot = store.snapshot();
    let entry = snapshot.entry("2024-05-01", 0).expect("entry should load");
    assert_eq!(entry.name, "Corolla");
    assert_eq!(kv.write_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_open_with_unreadable_data_starts_empty() {
    let kv = Arc::new(MemoryKeyValueStore::new().with_value(LEDGER_KEY, "[[["));
    let store = LedgerStore::open(PersistenceAdapter::new(kv), StoreConfig::default());
    assert!(store.snapshot().is_empty());
    assert!(store.load_warning().is_some());
}

#[tokio::test]
async fn test_file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let adapter = || PersistenceAdapter::new(Arc::new(FileKeyValueStore::new(dir.path())));

    let mut store = LedgerStore::open(adapter(), StoreConfig::with_debounce_ms(50));
    add_corolla_and_civic(&mut store);
    store.flush().await.expect("flush should succeed");
    let expected = store.snapshot();
    store.shutdown();

    let reopened = LedgerStore::open(adapter(), StoreConfig::default());
    assert_eq!(*reopened.snapshot(), *expected);
    assert!(dir.path().join("Year.json").exists());
}

//! Observation recording tests

use super::{program, scope};
use crate::history::engine::{DiffEngine, Observation};
use crate::history::error::{HistoryError, HistoryResult};
use crate::history::record::{ChangeKind, HistoryRecord, ProgramKey};
use crate::history::store::{MemoryStore, ScopeStore};
use crate::model::Scope;
use crate::notify::error::{NotifyError, NotifyResult};
use crate::notify::traits::{Notifier, NullNotifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn engine_with(store: Arc<MemoryStore>) -> DiffEngine {
    DiffEngine::new(store, Arc::new(NullNotifier))
}

#[tokio::test]
async fn test_first_observation_is_all_added_and_persisted() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone());

    let p = program(
        "acme",
        vec![scope("b.acme.com", "url", true), scope("a.acme.com", "url", true)],
    );
    let observation = engine.record_observation(&p).await.unwrap();

    let record = match observation {
        Observation::Changed(record) => record,
        Observation::NoChange => panic!("first observation must produce a record"),
    };
    assert_eq!(record.delta.len(), 2);
    assert!(record
        .delta
        .iter()
        .all(|e| e.change_kind == ChangeKind::Added));
    assert_eq!(record.delta[0].scope_key.value, "a.acme.com");
    assert_eq!(store.history_len(), 1);
}

#[tokio::test]
async fn test_record_observation_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone());

    let p = program("acme", vec![scope("a.acme.com", "url", true)]);

    assert!(engine.record_observation(&p).await.unwrap().changed());
    let second = engine.record_observation(&p).await.unwrap();

    assert!(!second.changed());
    assert_eq!(store.history_len(), 1);
}

#[tokio::test]
async fn test_changed_program_produces_second_record() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone());

    let before = program("acme", vec![scope("a.acme.com", "url", true)]);
    engine.record_observation(&before).await.unwrap();

    let after = program(
        "acme",
        vec![scope("a.acme.com", "url", false), scope("new.acme.com", "url", true)],
    );
    let observation = engine.record_observation(&after).await.unwrap();

    let record = match observation {
        Observation::Changed(record) => record,
        Observation::NoChange => panic!("expected a change record"),
    };
    assert_eq!(record.delta.len(), 2);
    assert_eq!(record.delta[0].change_kind, ChangeKind::Added);
    assert_eq!(record.delta[1].change_kind, ChangeKind::StatusChanged);
    assert_eq!(store.history_len(), 2);
}

#[tokio::test]
async fn test_extra_data_carried_into_record() {
    let store = Arc::new(MemoryStore::new());
    let engine = engine_with(store.clone());

    let p = program("acme", vec![scope("a.acme.com", "url", true)]).with_extra_data("raw-fragment");
    let observation = engine.record_observation(&p).await.unwrap();

    match observation {
        Observation::Changed(record) => {
            assert_eq!(record.extra_data.as_deref(), Some("raw-fragment"))
        }
        Observation::NoChange => panic!("expected a change record"),
    }
}

struct FailingStore;

#[async_trait::async_trait]
impl ScopeStore for FailingStore {
    async fn load_snapshot(&self, _key: &ProgramKey) -> HistoryResult<Option<Vec<Scope>>> {
        Ok(None)
    }

    async fn save_snapshot(&self, _key: &ProgramKey, _scopes: &[Scope]) -> HistoryResult<()> {
        Err(HistoryError::Persistence {
            message: "disk full".to_string(),
        })
    }

    async fn append_history(&self, _record: &HistoryRecord) -> HistoryResult<()> {
        Err(HistoryError::Persistence {
            message: "disk full".to_string(),
        })
    }
}

/// Appends succeed, snapshot saves fail: the default commit path of the
/// store trait, interrupted between its two halves
struct SaveFailsStore {
    inner: MemoryStore,
}

#[async_trait::async_trait]
impl ScopeStore for SaveFailsStore {
    async fn load_snapshot(&self, key: &ProgramKey) -> HistoryResult<Option<Vec<Scope>>> {
        self.inner.load_snapshot(key).await
    }

    async fn save_snapshot(&self, _key: &ProgramKey, _scopes: &[Scope]) -> HistoryResult<()> {
        Err(HistoryError::Persistence {
            message: "disk full".to_string(),
        })
    }

    async fn append_history(&self, record: &HistoryRecord) -> HistoryResult<()> {
        self.inner.append_history(record).await
    }
}

#[tokio::test]
async fn test_interrupted_default_commit_re_emits_delta_next_run() {
    let store = Arc::new(SaveFailsStore {
        inner: MemoryStore::new(),
    });
    let engine = DiffEngine::new(store.clone(), Arc::new(NullNotifier));

    let p = program("acme", vec![scope("a.acme.com", "url", true)]);

    // First run: append lands, snapshot save fails, error surfaces
    let err = engine.record_observation(&p).await.unwrap_err();
    assert!(matches!(err, HistoryError::Persistence { .. }));
    assert_eq!(store.inner.history_len(), 1);

    // Snapshot never advanced, so the next run re-emits the same delta
    // rather than losing the change
    let err = engine.record_observation(&p).await.unwrap_err();
    assert!(matches!(err, HistoryError::Persistence { .. }));
    assert_eq!(store.inner.history_len(), 2);
    assert_eq!(store.inner.history()[0].delta, store.inner.history()[1].delta);
}

#[tokio::test]
async fn test_persistence_failure_surfaces_as_error() {
    let engine = DiffEngine::new(Arc::new(FailingStore), Arc::new(NullNotifier));
    let p = program("acme", vec![scope("a.acme.com", "url", true)]);

    let err = engine.record_observation(&p).await.unwrap_err();
    assert!(matches!(err, HistoryError::Persistence { .. }));
}

struct FailingNotifier {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _record: &HistoryRecord) -> NotifyResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(NotifyError::Delivery {
            message: "webhook down".to_string(),
        })
    }
}

#[tokio::test]
async fn test_notifier_failure_does_not_fail_observation() {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(FailingNotifier {
        calls: AtomicUsize::new(0),
    });
    let engine = DiffEngine::new(store.clone(), notifier.clone());

    let p = program("acme", vec![scope("a.acme.com", "url", true)]);
    let observation = engine.record_observation(&p).await.unwrap();

    assert!(observation.changed());
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.history_len(), 1);
}

#[tokio::test]
async fn test_no_change_does_not_notify() {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(FailingNotifier {
        calls: AtomicUsize::new(0),
    });
    let engine = DiffEngine::new(store.clone(), notifier.clone());

    let p = program("acme", vec![scope("a.acme.com", "url", true)]);
    engine.record_observation(&p).await.unwrap();
    engine.record_observation(&p).await.unwrap();

    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_observations_of_same_program_serialize() {
    let store = Arc::new(MemoryStore::new());
    let engine = Arc::new(engine_with(store.clone()));

    let p = program("acme", vec![scope("a.acme.com", "url", true)]);

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let engine = engine.clone();
        let p = p.clone();
        tasks.spawn(async move { engine.record_observation(&p).await });
    }

    let mut changed = 0;
    while let Some(result) = tasks.join_next().await {
        if result.unwrap().unwrap().changed() {
            changed += 1;
        }
    }

    // Exactly one run observes the change; the rest see the snapshot it wrote
    assert_eq!(changed, 1);
    assert_eq!(store.history_len(), 1);
}

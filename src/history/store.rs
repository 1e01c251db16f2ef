//! Storage collaborator contract and implementations
//!
//! The engine depends on this narrow contract only; schema and retention
//! are the store's concern. `persist_observation` commits the new snapshot
//! and the history record as a unit; implementations that can do better
//! than append-then-save override it.

use crate::core::sync::handle_mutex_poison;
use crate::history::error::{HistoryError, HistoryResult};
use crate::history::record::{HistoryRecord, ProgramKey};
use crate::model::Scope;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

#[async_trait::async_trait]
pub trait ScopeStore: Send + Sync {
    /// Last persisted scope set for a program, None on first observation
    async fn load_snapshot(&self, key: &ProgramKey) -> HistoryResult<Option<Vec<Scope>>>;

    /// Replace the stored snapshot for a program
    async fn save_snapshot(&self, key: &ProgramKey, scopes: &[Scope]) -> HistoryResult<()>;

    /// Append one history record; records are never mutated or deleted
    async fn append_history(&self, record: &HistoryRecord) -> HistoryResult<()>;

    /// Commit snapshot replacement and history append as a unit
    ///
    /// Default implementation appends first so a failure leaves the prior
    /// snapshot intact; stores with real transactional writes override this.
    /// The append-first order trades atomicity for safety: if the snapshot
    /// save fails after the append succeeded, the next run re-diffs against
    /// the old snapshot and appends the same delta a second time. A
    /// duplicated record is recoverable; a silently lost change is not.
    async fn persist_observation(
        &self,
        key: &ProgramKey,
        scopes: &[Scope],
        record: &HistoryRecord,
    ) -> HistoryResult<()> {
        self.append_history(record).await?;
        self.save_snapshot(key, scopes).await
    }
}

/// In-memory store for tests and dry runs
#[derive(Default)]
pub struct MemoryStore {
    snapshots: Mutex<HashMap<ProgramKey, Vec<Scope>>>,
    history: Mutex<Vec<HistoryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All appended records, in append order
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn history_len(&self) -> usize {
        self.history.lock().map(|h| h.len()).unwrap_or(0)
    }
}

fn internal_error(message: String) -> HistoryError {
    HistoryError::Internal { message }
}

#[async_trait::async_trait]
impl ScopeStore for MemoryStore {
    async fn load_snapshot(&self, key: &ProgramKey) -> HistoryResult<Option<Vec<Scope>>> {
        let snapshots = handle_mutex_poison(self.snapshots.lock(), internal_error)?;
        Ok(snapshots.get(key).cloned())
    }

    async fn save_snapshot(&self, key: &ProgramKey, scopes: &[Scope]) -> HistoryResult<()> {
        let mut snapshots = handle_mutex_poison(self.snapshots.lock(), internal_error)?;
        snapshots.insert(key.clone(), scopes.to_vec());
        Ok(())
    }

    async fn append_history(&self, record: &HistoryRecord) -> HistoryResult<()> {
        let mut history = handle_mutex_poison(self.history.lock(), internal_error)?;
        history.push(record.clone());
        Ok(())
    }
}

/// Document persisted per program: current snapshot plus full history
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProgramDocument {
    snapshot: Vec<Scope>,
    history: Vec<HistoryRecord>,
}

/// File-backed store: one JSON document per program under a data directory
///
/// Snapshot and history live in the same document, so the unit commit is a
/// single atomic replace (write to a temp sibling, then rename).
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn persistence_error(message: impl std::fmt::Display) -> HistoryError {
        HistoryError::Persistence {
            message: message.to_string(),
        }
    }

    /// Filename for a program's document. Sanitization alone is lossy
    /// ("acme corp" and "acme-corp" both sanitize to "acme_corp"), so a
    /// truncated SHA256 of the raw key keeps the mapping injective.
    fn document_path(&self, key: &ProgramKey) -> PathBuf {
        use sha2::{Digest, Sha256};

        let sanitize = |s: &str| -> String {
            s.chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect()
        };

        let digest = Sha256::digest(format!("{}\n{}", key.platform, key.name));
        let hash = format!("{:x}", digest);

        self.data_dir.join(format!(
            "{}__{}_{}.json",
            sanitize(&key.platform),
            sanitize(&key.name),
            &hash[..16]
        ))
    }

    async fn load_document(&self, key: &ProgramKey) -> HistoryResult<Option<ProgramDocument>> {
        let path = self.document_path(key);
        match tokio::fs::read(&path).await {
            Ok(raw) => {
                let doc = serde_json::from_slice(&raw).map_err(Self::persistence_error)?;
                Ok(Some(doc))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::persistence_error(e)),
        }
    }

    /// Atomic replace: serialize to a temp sibling, then rename over the
    /// document. A failure at any point leaves the prior document intact.
    async fn store_document(&self, key: &ProgramKey, doc: &ProgramDocument) -> HistoryResult<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(Self::persistence_error)?;

        let path = self.document_path(key);
        let tmp_path = path.with_extension("json.tmp");

        let raw = serde_json::to_vec_pretty(doc).map_err(Self::persistence_error)?;
        tokio::fs::write(&tmp_path, raw)
            .await
            .map_err(Self::persistence_error)?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(Self::persistence_error)?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl ScopeStore for JsonStore {
    async fn load_snapshot(&self, key: &ProgramKey) -> HistoryResult<Option<Vec<Scope>>> {
        Ok(self.load_document(key).await?.map(|doc| doc.snapshot))
    }

    async fn save_snapshot(&self, key: &ProgramKey, scopes: &[Scope]) -> HistoryResult<()> {
        let mut doc = self.load_document(key).await?.unwrap_or_default();
        doc.snapshot = scopes.to_vec();
        self.store_document(key, &doc).await
    }

    async fn append_history(&self, record: &HistoryRecord) -> HistoryResult<()> {
        let mut doc = self
            .load_document(&record.program_key)
            .await?
            .unwrap_or_default();
        doc.history.push(record.clone());
        self.store_document(&record.program_key, &doc).await
    }

    async fn persist_observation(
        &self,
        key: &ProgramKey,
        scopes: &[Scope],
        record: &HistoryRecord,
    ) -> HistoryResult<()> {
        let mut doc = self.load_document(key).await?.unwrap_or_default();
        doc.snapshot = scopes.to_vec();
        doc.history.push(record.clone());
        self.store_document(key, &doc).await
    }
}

//! Observation recording
//!
//! `record_observation` implements the diff cycle for one program: load the
//! prior snapshot, compute the delta, and on change persist record plus
//! snapshot as a unit. A per-(platform, name) mutex makes the whole cycle
//! exclusive for one program so concurrent runs cannot lose updates;
//! distinct programs proceed fully in parallel.

use crate::core::sync::handle_mutex_poison;
use crate::history::diff::compute_delta;
use crate::history::error::{HistoryError, HistoryResult};
use crate::history::record::{HistoryRecord, ProgramKey};
use crate::history::store::ScopeStore;
use crate::model::{Program, Scope};
use crate::notify::Notifier;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Result of observing one program
#[derive(Debug)]
pub enum Observation {
    /// At least one scope changed; the record was persisted
    Changed(HistoryRecord),
    /// Scope set identical to the snapshot; nothing was persisted
    NoChange,
}

impl Observation {
    pub fn changed(&self) -> bool {
        matches!(self, Observation::Changed(_))
    }
}

pub struct DiffEngine {
    store: Arc<dyn ScopeStore>,
    notifier: Arc<dyn Notifier>,
    program_locks: Mutex<HashMap<ProgramKey, Arc<tokio::sync::Mutex<()>>>>,
}

impl DiffEngine {
    pub fn new(store: Arc<dyn ScopeStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            program_locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, key: &ProgramKey) -> HistoryResult<Arc<tokio::sync::Mutex<()>>> {
        let mut locks = handle_mutex_poison(self.program_locks.lock(), |message| {
            HistoryError::Internal { message }
        })?;
        Ok(locks.entry(key.clone()).or_default().clone())
    }

    /// Diff `program` against its stored snapshot and record the outcome
    ///
    /// Idempotent: observing an unchanged program returns
    /// [`Observation::NoChange`] and grows no history.
    pub async fn record_observation(&self, program: &Program) -> HistoryResult<Observation> {
        let key = ProgramKey::new(program.platform(), program.name());

        let lock = self.lock_for(&key)?;
        let _guard = lock.lock().await;

        let prior = self.store.load_snapshot(&key).await?.unwrap_or_default();
        let delta = compute_delta(&prior, program.scopes());

        if delta.is_empty() {
            log::trace!("{}: no scope changes", key);
            return Ok(Observation::NoChange);
        }

        let record = HistoryRecord {
            program_key: key.clone(),
            observed_at: Utc::now(),
            delta,
            extra_data: program.extra_data().map(str::to_string),
        };

        let snapshot: Vec<Scope> = program.scopes().cloned().collect();
        self.store
            .persist_observation(&key, &snapshot, &record)
            .await?;

        log::info!("{}: recorded {} scope change(s)", key, record.delta.len());

        // Fire-and-forget: a notification failure never fails the run
        if let Err(e) = self.notifier.notify(&record).await {
            log::warn!("{}: notification failed: {}", key, e);
        }

        Ok(Observation::Changed(record))
    }
}

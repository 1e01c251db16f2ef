//! History record types
//!
//! One record per extraction run per program that actually changed.
//! Records are append-only: never mutated after creation, never deleted by
//! this crate (retention is the storage collaborator's policy).

use crate::model::ScopeKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a program across runs: `(platform, name)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramKey {
    pub platform: String,
    pub name: String,
}

impl ProgramKey {
    pub fn new(platform: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ProgramKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.name)
    }
}

/// What happened to one scope identity between two observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Removed,
    StatusChanged,
}

/// One entry of a delta
///
/// `previous_state`/`new_state` carry the in/out-of-scope flag where it
/// exists: Added has no previous state, Removed has no new state,
/// StatusChanged has both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub scope_key: ScopeKey,
    pub change_kind: ChangeKind,
    pub previous_state: Option<bool>,
    pub new_state: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub program_key: ProgramKey,
    pub observed_at: DateTime<Utc>,
    pub delta: Vec<ChangeEntry>,
    /// Adapter-specific metadata, persisted verbatim and never interpreted
    pub extra_data: Option<String>,
}

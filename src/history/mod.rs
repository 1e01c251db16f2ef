//! Diff/history engine
//!
//! Compares a freshly fetched program against its last stored snapshot,
//! records an append-only history entry when anything changed, and replaces
//! the snapshot. Writes for the same `(platform, name)` key are serialized;
//! different programs diff in parallel.

pub mod diff;
pub mod engine;
pub mod error;
pub mod record;
pub mod store;

pub use diff::compute_delta;
pub use engine::{DiffEngine, Observation};
pub use error::{HistoryError, HistoryResult};
pub use record::{ChangeEntry, ChangeKind, HistoryRecord, ProgramKey};
pub use store::{JsonStore, MemoryStore, ScopeStore};

#[cfg(test)]
mod tests;

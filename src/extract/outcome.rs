//! Per-platform outcomes and the aggregate run summary

use std::collections::BTreeMap;

/// How one platform's extraction ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Fetch and diffing ran; `failed` counts programs whose persistence
    /// step errored (their prior snapshots are untouched)
    Completed {
        programs: usize,
        changed: usize,
        failed: usize,
    },
    /// Deliberate no-op, e.g. failed access pre-check
    Skipped { reason: String },
    /// Fetch or auth failure; `kind` is the error taxonomy label
    Failed { kind: &'static str, message: String },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Aggregate result of one extraction run
///
/// Enumerates every enabled platform with its outcome so a partial run is
/// fully diagnosable from this value alone.
#[derive(Debug, Default)]
pub struct ExtractionSummary {
    pub per_platform: BTreeMap<String, Outcome>,
    pub total_programs_processed: usize,
}

impl ExtractionSummary {
    pub fn outcome(&self, platform: &str) -> Option<&Outcome> {
        self.per_platform.get(platform)
    }

    pub fn failure_count(&self) -> usize {
        self.per_platform.values().filter(|o| o.is_failure()).count()
    }
}

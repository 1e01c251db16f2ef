//! Delta computation between two scope sets
//!
//! Pure set-diffing over identity keys. An identity present on both sides
//! with a flipped in/out flag is a status change, never a removal plus an
//! addition. Identities present on both sides with identical state produce
//! no entry at all.

use crate::history::record::{ChangeEntry, ChangeKind};
use crate::model::{Scope, ScopeKey};
use std::collections::HashMap;

/// Compute the ordered delta from `prior` to `current`
///
/// Ordering is deterministic and human-scannable: all additions sorted by
/// value, then all removals sorted by value, then all status changes sorted
/// by value. An empty prior set (first observation) yields one addition per
/// current scope.
pub fn compute_delta<'a>(
    prior: &[Scope],
    current: impl Iterator<Item = &'a Scope>,
) -> Vec<ChangeEntry> {
    let prior_states: HashMap<ScopeKey, bool> =
        prior.iter().map(|s| (s.key(), s.in_scope())).collect();
    let current_states: HashMap<ScopeKey, bool> =
        current.map(|s| (s.key(), s.in_scope())).collect();

    let mut added = Vec::new();
    let mut removed = Vec::new();
    let mut status_changed = Vec::new();

    for (key, &state) in &current_states {
        match prior_states.get(key) {
            None => added.push(ChangeEntry {
                scope_key: key.clone(),
                change_kind: ChangeKind::Added,
                previous_state: None,
                new_state: Some(state),
            }),
            Some(&prior_state) if prior_state != state => status_changed.push(ChangeEntry {
                scope_key: key.clone(),
                change_kind: ChangeKind::StatusChanged,
                previous_state: Some(prior_state),
                new_state: Some(state),
            }),
            Some(_) => {}
        }
    }

    for (key, &state) in &prior_states {
        if !current_states.contains_key(key) {
            removed.push(ChangeEntry {
                scope_key: key.clone(),
                change_kind: ChangeKind::Removed,
                previous_state: Some(state),
                new_state: None,
            });
        }
    }

    // ScopeKey orders by value first, kind as tiebreak
    let by_value = |a: &ChangeEntry, b: &ChangeEntry| a.scope_key.cmp(&b.scope_key);
    added.sort_by(by_value);
    removed.sort_by(by_value);
    status_changed.sort_by(by_value);

    let mut delta = added;
    delta.extend(removed);
    delta.extend(status_changed);
    delta
}

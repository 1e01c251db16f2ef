//! Delta computation tests

use super::scope;
use crate::history::diff::compute_delta;
use crate::history::record::ChangeKind;

#[test]
fn test_empty_prior_yields_all_added_sorted_by_value() {
    let current = vec![
        scope("zeta.example.com", "url", true),
        scope("alpha.example.com", "url", true),
        scope("mid.example.com", "url", false),
    ];

    let delta = compute_delta(&[], current.iter());

    assert_eq!(delta.len(), 3);
    assert!(delta.iter().all(|e| e.change_kind == ChangeKind::Added));
    let values: Vec<&str> = delta.iter().map(|e| e.scope_key.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["alpha.example.com", "mid.example.com", "zeta.example.com"]
    );
    // Added entries have no previous state
    assert!(delta.iter().all(|e| e.previous_state.is_none()));
    assert_eq!(delta[1].new_state, Some(false));
}

#[test]
fn test_identical_sets_yield_empty_delta() {
    let scopes = vec![scope("a.example.com", "url", true), scope("b.example.com", "url", false)];
    let delta = compute_delta(&scopes, scopes.iter());
    assert!(delta.is_empty());
}

#[test]
fn test_status_flip_is_status_changed_not_add_remove() {
    let prior = vec![scope("a.example.com", "url", true)];
    let current = vec![scope("a.example.com", "url", false)];

    let delta = compute_delta(&prior, current.iter());

    assert_eq!(delta.len(), 1);
    assert_eq!(delta[0].change_kind, ChangeKind::StatusChanged);
    assert_eq!(delta[0].previous_state, Some(true));
    assert_eq!(delta[0].new_state, Some(false));
}

#[test]
fn test_kind_grouped_value_sorted_ordering() {
    // prior {a:true, b:true}, current {a:false, c:true}
    let prior = vec![scope("a", "url", true), scope("b", "url", true)];
    let current = vec![scope("a", "url", false), scope("c", "url", true)];

    let delta = compute_delta(&prior, current.iter());

    assert_eq!(delta.len(), 3);
    assert_eq!(delta[0].change_kind, ChangeKind::Added);
    assert_eq!(delta[0].scope_key.value, "c");
    assert_eq!(delta[1].change_kind, ChangeKind::Removed);
    assert_eq!(delta[1].scope_key.value, "b");
    assert_eq!(delta[1].previous_state, Some(true));
    assert_eq!(delta[1].new_state, None);
    assert_eq!(delta[2].change_kind, ChangeKind::StatusChanged);
    assert_eq!(delta[2].scope_key.value, "a");
    assert_eq!(delta[2].previous_state, Some(true));
    assert_eq!(delta[2].new_state, Some(false));
}

#[test]
fn test_same_value_different_kind_are_distinct_identities() {
    let prior = vec![scope("example.com", "url", true)];
    let current = vec![scope("example.com", "mobile", true)];

    let delta = compute_delta(&prior, current.iter());

    assert_eq!(delta.len(), 2);
    assert_eq!(delta[0].change_kind, ChangeKind::Added);
    assert_eq!(delta[0].scope_key.kind, "mobile");
    assert_eq!(delta[1].change_kind, ChangeKind::Removed);
    assert_eq!(delta[1].scope_key.kind, "url");
}

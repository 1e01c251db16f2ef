//! Synchronization utilities for robust mutex handling
//!
//! Converts mutex poisoning into application errors instead of panicking,
//! so a panic in one extraction task cannot cascade through shared state.

use std::sync::LockResult;

/// Handle poisoned mutex cases with consistent error handling
///
/// Converts a poison error from a lock operation into an application error
/// built by the provided constructor.
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). A panic occurred while holding a lock. PoisonError: {:?}",
            poison_err
        ))
    })
}

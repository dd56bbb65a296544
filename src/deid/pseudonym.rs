//! Session-scoped pseudonym cache
//!
//! Maps `(category, original value)` to a generated replacement value with
//! atomic get-or-insert semantics. The cache is the only mutable state in
//! the engine; it is owned by a [`crate::deid::session::DeidSession`] and
//! shared by reference across however many workers transform records
//! concurrently. Two records carrying the same original value converge on
//! the same replacement regardless of processing order.

use crate::deid::category::PseudonymCategory;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Deterministic map from (category, original value) to replacement value
///
/// # Thread Safety
///
/// `resolve` takes `&self` and may be called from any number of threads.
/// A single mutex guards the map; the critical section covers lookup and
/// generation together, so concurrent first-calls for one key can never
/// store two different values. Generation is cheap relative to the I/O
/// surrounding any real workload, so a coarse lock is sufficient here.
#[derive(Debug, Default)]
pub struct PseudonymCache {
    entries: Mutex<HashMap<(PseudonymCategory, String), String>>,
}

impl PseudonymCache {
    /// Create an empty cache for a new processing session
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the replacement for an original value
    ///
    /// Returns `None` for empty input without creating an entry - nothing
    /// is never pseudonymized. The first call for a key generates and
    /// stores the replacement; every later call returns the stored value
    /// unchanged. Entries are never evicted during a session.
    pub fn resolve(&self, category: PseudonymCategory, original: &str) -> Option<String> {
        if original.is_empty() {
            return None;
        }

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let replacement = entries
            .entry((category, original.to_string()))
            .or_insert_with(|| category.generate(original));
        Some(replacement.clone())
    }

    /// Number of distinct (category, original) keys resolved so far
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if no pseudonym has been generated yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

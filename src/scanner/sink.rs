//! Shared deduplicating result set

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Set of matches shared by every worker in a run
///
/// One lock guards every read and write. Nothing is ever removed, and no
/// record is kept of which URL produced a match.
#[derive(Debug, Default)]
pub struct ResultSink {
    matches: Mutex<HashSet<String>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds each match to the set, returning how many were new
    pub fn merge<I>(&self, matches: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut set = self.lock();
        let mut added = 0;
        for m in matches {
            if set.insert(m) {
                added += 1;
            }
        }
        added
    }

    /// Copy of everything accumulated so far
    ///
    /// Only final once every producer has finished.
    pub fn snapshot(&self) -> HashSet<String> {
        self.lock().clone()
    }

    // A worker that panicked mid-merge cannot leave the set half-updated,
    // so a poisoned lock is still safe to use
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.matches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

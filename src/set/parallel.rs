//! Parallel traversal and insertion, enabled by the `rayon` feature.

use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

use log::trace;
use rayon::prelude::*;

use super::Set;
use crate::lock::LockPolicy;

impl<T, P, S> Set<T, P, S>
where
    T: Hash + Eq + Send + Sync,
    P: LockPolicy,
    S: BuildHasher + Default + Send + Sync,
{
    /// Visits elements on the rayon pool while one read lock covers the walk.
    ///
    /// Once any call to `visit` returns `false`, no further elements are
    /// started, but calls already running on other workers still finish. The
    /// number of visited elements after an early stop is therefore at least
    /// one and otherwise unspecified.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// let set: SyncSet<u64> = (0..1000).collect();
    /// let evens = AtomicUsize::new(0);
    /// set.par_iterator(|element| {
    ///     if element % 2 == 0 {
    ///         evens.fetch_add(1, Ordering::Relaxed);
    ///     }
    ///     true
    /// });
    /// assert_eq!(evens.into_inner(), 500);
    /// ```
    pub fn par_iterator<F>(&self, visit: F) -> &Self
    where
        F: Fn(&T) -> bool + Send + Sync,
    {
        let guard = P::read(&self.elements);
        let elements: &HashSet<T, S> = &guard;
        let completed = elements.par_iter().all(|element| visit(element));
        trace!("par_iterator over {} elements completed: {completed}", elements.len());
        drop(guard);
        self
    }

    /// Deduplicates `items` on the rayon pool, then inserts the result under
    /// a single write lock.
    ///
    /// The write lock is only held for the final merge, so readers are not
    /// blocked while the batch is being produced.
    pub fn par_batch_add<I>(&self, items: I) -> &Self
    where
        I: IntoParallelIterator<Item = T>,
    {
        let staged: HashSet<T, S> = items.into_par_iter().collect();
        let mut guard = P::write(&self.elements);
        let before = guard.len();
        guard.extend(staged);
        trace!("par_batch_add inserted {} new elements", guard.len() - before);
        drop(guard);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

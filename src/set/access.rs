//! Whole-call critical sections: traversal, snapshots and raw storage access.

use std::collections::HashSet;

use super::Set;
use crate::lock::LockPolicy;

impl<T, P: LockPolicy, S> Set<T, P, S> {
    /// Visits every element while holding the read lock for the whole walk.
    ///
    /// Traversal stops the first time `visit` returns `false`. Order is
    /// unspecified.
    ///
    /// `visit` must not mutate this set: with [`Synchronized`] that deadlocks,
    /// with [`Unsynchronized`] it panics with a borrow error.
    ///
    /// [`Synchronized`]: crate::lock::Synchronized
    /// [`Unsynchronized`]: crate::lock::Unsynchronized
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = (0..10).collect();
    ///
    /// let mut visited = 0;
    /// set.iterator(|_| {
    ///     visited += 1;
    ///     visited < 3
    /// });
    /// assert_eq!(visited, 3);
    /// ```
    pub fn iterator<F>(&self, mut visit: F) -> &Self
    where
        F: FnMut(&T) -> bool,
    {
        let guard = P::read(&self.elements);
        for element in guard.iter() {
            if !visit(element) {
                break;
            }
        }
        drop(guard);
        self
    }

    /// Runs `function` with exclusive access to the storage.
    ///
    /// The write lock spans the whole call, which makes compound updates the
    /// set's own API does not offer atomic. `function` must not call back
    /// into this set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = [1, 2, 3, 4].into_iter().collect();
    ///
    /// // Drop every even element, atomically.
    /// let removed = set.lock_func(|elements| {
    ///     let before = elements.len();
    ///     elements.retain(|element| element % 2 == 1);
    ///     before - elements.len()
    /// });
    ///
    /// assert_eq!(removed, 2);
    /// assert_eq!(set.size(), 2);
    /// ```
    pub fn lock_func<R, F>(&self, function: F) -> R
    where
        F: FnOnce(&mut HashSet<T, S>) -> R,
    {
        let mut guard = P::write(&self.elements);
        function(&mut *guard)
    }

    /// Runs `function` with shared, read-only access to the storage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// let total: i32 = set.rlock_func(|elements| elements.iter().sum());
    /// assert_eq!(total, 6);
    /// ```
    pub fn rlock_func<R, F>(&self, function: F) -> R
    where
        F: FnOnce(&HashSet<T, S>) -> R,
    {
        let guard = P::read(&self.elements);
        function(&*guard)
    }

    /// Fallible form of [`Set::lock_func`].
    ///
    /// The error returned by `function` is handed back unchanged. The lock is
    /// released before this method returns on every path, including a panic
    /// unwinding out of `function`.
    ///
    /// # Errors
    ///
    /// Returns whatever error `function` returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = [1, 2].into_iter().collect();
    ///
    /// let outcome: Result<(), String> = set.try_lock_func(|elements| {
    ///     if elements.contains(&2) {
    ///         return Err("two is reserved".to_string());
    ///     }
    ///     elements.insert(3);
    ///     Ok(())
    /// });
    ///
    /// assert!(outcome.is_err());
    /// // The lock was released: the set is usable again.
    /// set.add(5);
    /// assert_eq!(set.size(), 3);
    /// ```
    pub fn try_lock_func<R, E, F>(&self, function: F) -> Result<R, E>
    where
        F: FnOnce(&mut HashSet<T, S>) -> Result<R, E>,
    {
        let mut guard = P::write(&self.elements);
        function(&mut *guard)
    }

    /// Fallible form of [`Set::rlock_func`].
    ///
    /// # Errors
    ///
    /// Returns whatever error `function` returns.
    pub fn try_rlock_func<R, E, F>(&self, function: F) -> Result<R, E>
    where
        F: FnOnce(&HashSet<T, S>) -> Result<R, E>,
    {
        let guard = P::read(&self.elements);
        function(&*guard)
    }
}

impl<T: Clone, P: LockPolicy, S> Set<T, P, S> {
    /// Copies the current elements into a vector sized to the cardinality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = [3, 1, 2].into_iter().collect();
    /// let mut elements = set.slice();
    /// elements.sort_unstable();
    /// assert_eq!(elements, vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn slice(&self) -> Vec<T> {
        let guard = P::read(&self.elements);
        let mut snapshot = Vec::with_capacity(guard.len());
        snapshot.extend(guard.iter().cloned());
        snapshot
    }
}

// =============================================================================
// Tests
// =============================================================================

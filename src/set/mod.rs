//! Lockable hash set.
//!
//! This module provides [`Set`], a hash set whose storage is guarded by a
//! [`LockPolicy`] chosen at construction.
//!
//! # Overview
//!
//! Every method takes `&self`, so a [`SyncSet`] can sit behind an `Arc` and be
//! mutated from many threads at once. Each call is one critical section:
//!
//! - `add`, `batch_add`, `add_if_absent`, `remove`, `clear` take the write lock
//! - `contains`, `size`, `is_empty`, `slice` take the read lock
//! - `iterator`, `lock_func`, `rlock_func` hold a lock across a caller closure
//! - `union`, `diff`, `inter`, `complement`, `equal`, `is_subset` read-lock
//!   both operands (receiver first) and never lock the same instance twice
//!
//! # Examples
//!
//! ```rust
//! use guarded_set::set::SyncSet;
//!
//! let set = SyncSet::new();
//! set.add(1).add(2).add(3);
//!
//! assert!(set.contains(&1));
//! assert_eq!(set.size(), 3);
//!
//! set.remove(&1);
//! assert!(!set.contains(&1));
//! ```
//!
//! # Choosing a Policy
//!
//! ```rust
//! use guarded_set::set::{LocalSet, SyncSet};
//! use std::sync::Arc;
//! use std::thread;
//!
//! // Shared between threads: real reader/writer locking.
//! let shared: Arc<SyncSet<u32>> = Arc::new(SyncSet::new());
//! let handles: Vec<_> = (0..4)
//!     .map(|worker| {
//!         let shared = Arc::clone(&shared);
//!         thread::spawn(move || {
//!             shared.batch_add(worker * 100..worker * 100 + 100);
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(shared.size(), 400);
//!
//! // Private to one thread: no locking overhead.
//! let local: LocalSet<&str> = LocalSet::new();
//! local.add("only").add("here");
//! assert_eq!(local.size(), 2);
//! ```

mod access;
mod algebra;
#[cfg(feature = "rayon")]
mod parallel;
mod traits;

use std::borrow::Borrow;
use std::collections::HashSet;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use log::{debug, trace};

use crate::lock::{LockPolicy, Synchronized, Unsynchronized};

// =============================================================================
// Set Definition
// =============================================================================

/// A hash set guarded by a per-instance lock policy.
///
/// # Type Parameters
///
/// * `T` - The element type (`Hash + Eq` for every operation)
/// * `P` - The [`LockPolicy`], [`Synchronized`] unless stated otherwise
/// * `S` - The hasher builder, [`RandomState`] unless stated otherwise
///
/// # Ordering
///
/// No method guarantees an element order. [`Set::slice`], [`Set::iterator`]
/// and the `Display` output may list elements differently between calls.
///
/// # Examples
///
/// ```rust
/// use guarded_set::set::Set;
///
/// let set: Set<i32> = Set::new();
/// set.batch_add([3, 1, 2]);
/// assert_eq!(set.size(), 3);
/// ```
pub struct Set<T, P: LockPolicy = Synchronized, S = RandomState> {
    elements: P::Cell<HashSet<T, S>>,
}

/// A [`Set`] with real reader/writer locking, safe to share across threads.
pub type SyncSet<T, S = RandomState> = Set<T, Synchronized, S>;

/// A [`Set`] without synchronization, confined to one thread at a time.
///
/// Every algebra operation returns this type.
pub type LocalSet<T, S = RandomState> = Set<T, Unsynchronized, S>;

/// A set of machine integers.
pub type IntSet<P = Synchronized> = Set<i64, P>;

/// A set of owned strings.
pub type StrSet<P = Synchronized> = Set<String, P>;

static_assertions::assert_impl_all!(SyncSet<i32>: Send, Sync);
static_assertions::assert_impl_all!(SyncSet<String>: Send, Sync);
static_assertions::assert_impl_all!(LocalSet<i32>: Send);
static_assertions::assert_not_impl_any!(LocalSet<i32>: Sync);
static_assertions::assert_not_impl_any!(LocalSet<String>: Sync);

// =============================================================================
// Construction
// =============================================================================

impl<T, P: LockPolicy> Set<T, P, RandomState> {
    /// Creates an empty set with the policy named by the type.
    ///
    /// The policy is part of the type, so there is no runtime flag. Code that
    /// only learns at runtime whether a set will be shared can build a
    /// [`LocalSet`] and convert it with [`Set::into_policy`] once the answer
    /// is known.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::{LocalSet, SyncSet};
    ///
    /// let shared: SyncSet<i32> = SyncSet::new();
    /// let local: LocalSet<i32> = LocalSet::new();
    /// assert!(shared.is_empty());
    /// assert!(local.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_storage(HashSet::new())
    }

    /// Creates an empty set with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_storage(HashSet::with_capacity(capacity))
    }
}

impl<T, P: LockPolicy, S> Set<T, P, S> {
    /// Creates an empty set that hashes with `hasher`.
    #[inline]
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_storage(HashSet::with_hasher(hasher))
    }

    /// Creates an empty set with room for `capacity` elements that hashes
    /// with `hasher`.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::from_storage(HashSet::with_capacity_and_hasher(capacity, hasher))
    }

    #[inline]
    fn from_storage(storage: HashSet<T, S>) -> Self {
        Self {
            elements: P::new_cell(storage),
        }
    }

    /// Returns the name of this set's lock policy.
    #[inline]
    #[must_use]
    pub fn policy_name(&self) -> &'static str {
        P::NAME
    }

    /// Consumes the set and returns its storage.
    #[must_use]
    pub fn into_inner(self) -> HashSet<T, S> {
        P::into_inner(self.elements)
    }

    /// Moves the storage into a set with another lock policy.
    ///
    /// Nothing is copied. This is how a result of the algebra operations
    /// (always [`LocalSet`]) becomes shareable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::lock::Synchronized;
    /// use guarded_set::set::SyncSet;
    ///
    /// let left: SyncSet<i32> = [1, 2].into_iter().collect();
    /// let right: SyncSet<i32> = [2, 3].into_iter().collect();
    ///
    /// let shared: SyncSet<i32> = left.union(&right).into_policy::<Synchronized>();
    /// assert_eq!(shared.size(), 3);
    /// ```
    #[must_use]
    pub fn into_policy<R: LockPolicy>(self) -> Set<T, R, S> {
        debug!("converting set from {} to {} policy", P::NAME, R::NAME);
        Set::from_storage(self.into_inner())
    }

    /// Borrows the storage mutably without locking.
    ///
    /// Holding `&mut self` already excludes every other access.
    #[inline]
    pub fn get_mut(&mut self) -> &mut HashSet<T, S> {
        P::get_mut(&mut self.elements)
    }

    /// Returns `true` when `self` and `other` are the same instance.
    #[inline]
    fn is_same<O: LockPolicy>(&self, other: &Set<T, O, S>) -> bool {
        std::ptr::addr_eq(self, other)
    }
}

// =============================================================================
// Mutators and Queries
// =============================================================================

impl<T: Hash + Eq, P: LockPolicy, S: BuildHasher> Set<T, P, S> {
    /// Inserts `item`. Does nothing if it is already present.
    ///
    /// Returns the receiver so calls can be chained.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let set = SyncSet::new();
    /// set.add("a").add("b").add("a");
    /// assert_eq!(set.size(), 2);
    /// ```
    #[inline]
    pub fn add(&self, item: T) -> &Self {
        P::write(&self.elements).insert(item);
        self
    }

    /// Inserts `item` and reports whether it was absent before.
    ///
    /// The check and the insertion happen in one critical section, so two
    /// threads racing on the same item see exactly one `true`.
    #[inline]
    pub fn add_if_absent(&self, item: T) -> bool {
        P::write(&self.elements).insert(item)
    }

    /// Inserts every item under a single write lock.
    ///
    /// Readers either see none of the batch or all of it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let set = SyncSet::new();
    /// set.batch_add([1, 2, 3, 2]);
    /// assert_eq!(set.size(), 3);
    /// ```
    pub fn batch_add<I: IntoIterator<Item = T>>(&self, items: I) -> &Self {
        let mut guard = P::write(&self.elements);
        let before = guard.len();
        guard.extend(items);
        trace!(
            "batch_add inserted {} new elements ({} policy)",
            guard.len() - before,
            P::NAME
        );
        drop(guard);
        self
    }

    /// Removes `item` if present. Absent items are ignored.
    #[inline]
    pub fn remove<Q>(&self, item: &Q) -> &Self
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        P::write(&self.elements).remove(item);
        self
    }

    /// Empties the set, keeping its identity, policy and hasher.
    pub fn clear(&self) -> &Self {
        let mut guard = P::write(&self.elements);
        trace!("clearing {} elements ({} policy)", guard.len(), P::NAME);
        guard.clear();
        drop(guard);
        self
    }

    /// Returns `true` if the set contains `item`.
    ///
    /// The element may be any borrowed form of the set's element type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::StrSet;
    ///
    /// let set: StrSet = StrSet::new();
    /// set.add("hello".to_string());
    /// assert!(set.contains("hello"));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        P::read(&self.elements).contains(item)
    }
}

impl<T, P: LockPolicy, S> Set<T, P, S> {
    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        P::read(&self.elements).len()
    }

    /// Returns `true` if the set has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        P::read(&self.elements).is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_is_empty_for_both_policies() {
        let shared: SyncSet<i32> = SyncSet::new();
        let local: LocalSet<i32> = LocalSet::new();
        assert!(shared.is_empty());
        assert!(local.is_empty());
        assert_eq!(shared.policy_name(), "synchronized");
        assert_eq!(local.policy_name(), "unsynchronized");
    }

    #[rstest]
    fn test_add_is_idempotent() {
        let set: SyncSet<i32> = SyncSet::new();
        set.add(7).add(7).add(7);
        assert_eq!(set.size(), 1);
    }

    #[rstest]
    fn test_add_if_absent_reports_insertion() {
        let set: LocalSet<i32> = LocalSet::new();
        assert!(set.add_if_absent(1));
        assert!(!set.add_if_absent(1));
        assert_eq!(set.size(), 1);
    }

    #[rstest]
    fn test_remove_absent_is_noop() {
        let set: SyncSet<i32> = SyncSet::new();
        set.add(1).remove(&2);
        assert_eq!(set.size(), 1);
        assert!(set.contains(&1));
    }

    #[rstest]
    fn test_clear_keeps_set_usable() {
        let set: SyncSet<i32> = SyncSet::new();
        set.batch_add(0..10).clear();
        assert!(set.is_empty());
        set.add(3);
        assert!(set.contains(&3));
    }

    #[rstest]
    fn test_with_capacity_starts_empty() {
        let set: LocalSet<u8> = LocalSet::with_capacity(64);
        assert_eq!(set.size(), 0);
        assert!(set.into_inner().capacity() >= 64);
    }

    #[rstest]
    fn test_into_policy_moves_elements() {
        let local: LocalSet<i32> = LocalSet::new();
        local.batch_add([1, 2, 3]);
        let shared: SyncSet<i32> = local.into_policy();
        assert_eq!(shared.size(), 3);
        assert!(shared.contains(&2));
    }

    #[rstest]
    #[case(true, "synchronized")]
    #[case(false, "unsynchronized")]
    fn test_runtime_policy_choice_via_into_policy(
        #[case] shared: bool,
        #[case] expected: &str,
    ) {
        let local: LocalSet<i32> = [1, 2].into_iter().collect();
        let name = if shared {
            local.into_policy::<Synchronized>().policy_name()
        } else {
            local.policy_name()
        };
        assert_eq!(name, expected);
    }

    #[rstest]
    fn test_get_mut_edits_without_locking() {
        let mut set: SyncSet<i32> = SyncSet::new();
        set.get_mut().insert(10);
        assert!(set.contains(&10));
    }

    #[rstest]
    fn test_is_same_detects_identity() {
        let first: SyncSet<i32> = SyncSet::new();
        let second: SyncSet<i32> = SyncSet::new();
        assert!(first.is_same(&first));
        assert!(!first.is_same(&second));
    }
}

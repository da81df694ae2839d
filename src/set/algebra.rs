//! Set algebra and comparison predicates.
//!
//! Every binary operation read-locks the receiver first and the argument
//! second. When both operands are the same instance the second lock is
//! skipped and the receiver's storage stands in for both, so no lock is ever
//! taken twice within one call.
//!
//! `a.union(&b)` and `b.union(&a)` take the two locks in opposite orders.
//! The argument is therefore locked with [`LockPolicy::read_recursive`],
//! which only waits for a writer that holds the lock, never for one that is
//! queued. A thread blocks on a queued writer only while it holds nothing,
//! so readers holding one set each cannot form a cycle through writers.
//!
//! Results are fresh [`LocalSet`]s filled while the operand guards are held.

use std::collections::HashSet;
use std::hash::{BuildHasher, Hash};

use log::trace;

use super::{LocalSet, Set};
use crate::lock::LockPolicy;

/// Read guards over both operands of a binary operation.
///
/// `argument` is `None` when the operands alias.
struct OperandGuards<'a, T: 'a, P: LockPolicy, O: LockPolicy, S: 'a> {
    receiver: P::ReadGuard<'a, HashSet<T, S>>,
    argument: Option<O::ReadGuard<'a, HashSet<T, S>>>,
}

impl<'a, T: 'a, P: LockPolicy, O: LockPolicy, S: 'a> OperandGuards<'a, T, P, O, S> {
    fn receiver(&self) -> &HashSet<T, S> {
        &self.receiver
    }

    fn argument(&self) -> &HashSet<T, S> {
        self.argument.as_deref().unwrap_or(&*self.receiver)
    }

    fn aliased(&self) -> bool {
        self.argument.is_none()
    }
}

impl<T, P: LockPolicy, S> Set<T, P, S> {
    fn lock_operands<'a, O: LockPolicy>(
        &'a self,
        other: &'a Set<T, O, S>,
    ) -> OperandGuards<'a, T, P, O, S>
    where
        T: 'a,
        S: 'a,
    {
        let receiver = P::read(&self.elements);
        let argument = if self.is_same(other) {
            None
        } else {
            Some(O::read_recursive(&other.elements))
        };
        OperandGuards { receiver, argument }
    }
}

impl<T, P, S> Set<T, P, S>
where
    T: Hash + Eq + Clone,
    P: LockPolicy,
    S: BuildHasher + Default,
{
    /// Returns `true` if both sets hold exactly the same elements.
    ///
    /// Comparing a set with itself answers `true` without locking.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::{LocalSet, SyncSet};
    ///
    /// let shared: SyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// let local: LocalSet<i32> = [3, 2, 1].into_iter().collect();
    ///
    /// assert!(shared.equal(&local));
    /// assert!(shared.equal(&shared));
    /// ```
    #[must_use]
    pub fn equal<O: LockPolicy>(&self, other: &Set<T, O, S>) -> bool {
        if self.is_same(other) {
            return true;
        }
        let guards = self.lock_operands(other);
        let (mine, theirs) = (guards.receiver(), guards.argument());
        mine.len() == theirs.len() && mine.iter().all(|element| theirs.contains(element))
    }

    /// Returns `true` if every element of `other` is in `self` and both sets
    /// have the same cardinality.
    ///
    /// The cardinality check runs first, so an `other` that is strictly
    /// smaller than `self` is rejected even when all of its elements are
    /// present. For equal-sized operands this is set equality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let set: SyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// let same: SyncSet<i32> = [3, 1, 2].into_iter().collect();
    /// let bigger: SyncSet<i32> = [1, 2, 3, 4].into_iter().collect();
    ///
    /// assert!(set.is_subset(&same));
    /// assert!(!set.is_subset(&bigger));
    /// ```
    #[must_use]
    pub fn is_subset<O: LockPolicy>(&self, other: &Set<T, O, S>) -> bool {
        if self.is_same(other) {
            return true;
        }
        let guards = self.lock_operands(other);
        let (mine, theirs) = (guards.receiver(), guards.argument());
        mine.len() == theirs.len() && theirs.iter().all(|element| mine.contains(element))
    }

    /// Returns a new set of the elements in `self`, `other`, or both.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let left: SyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// let right: SyncSet<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// let union = left.union(&right);
    /// assert_eq!(union.size(), 4);
    /// ```
    #[must_use]
    pub fn union<O: LockPolicy>(&self, other: &Set<T, O, S>) -> LocalSet<T, S> {
        let guards = self.lock_operands(other);
        let mine = guards.receiver();
        let mut result = HashSet::with_capacity_and_hasher(mine.len(), S::default());
        result.extend(mine.iter().cloned());
        if !guards.aliased() {
            result.extend(guards.argument().iter().cloned());
        }
        trace!(
            "union of {} and {} elements produced {} (aliased: {})",
            mine.len(),
            guards.argument().len(),
            result.len(),
            guards.aliased()
        );
        Set::from_storage(result)
    }

    /// Returns a new set of the elements in `self` but not in `other`.
    ///
    /// The difference of a set with itself is empty and takes no lock.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let left: SyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// let right: SyncSet<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// assert_eq!(left.diff(&right).slice(), vec![1]);
    /// assert_eq!(right.diff(&left).slice(), vec![4]);
    /// assert!(left.diff(&left).is_empty());
    /// ```
    #[must_use]
    pub fn diff<O: LockPolicy>(&self, other: &Set<T, O, S>) -> LocalSet<T, S> {
        if self.is_same(other) {
            trace!("diff of a set with itself short-circuited to empty");
            return Set::with_hasher(S::default());
        }
        let guards = self.lock_operands(other);
        let (mine, theirs) = (guards.receiver(), guards.argument());
        let result: HashSet<T, S> = mine
            .iter()
            .filter(|element| !theirs.contains(*element))
            .cloned()
            .collect();
        trace!(
            "diff of {} minus {} elements produced {}",
            mine.len(),
            theirs.len(),
            result.len()
        );
        Set::from_storage(result)
    }

    /// Returns a new set of the elements in both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let left: SyncSet<i32> = [1, 2, 3].into_iter().collect();
    /// let right: SyncSet<i32> = [2, 3, 4].into_iter().collect();
    ///
    /// let mut common = left.inter(&right).slice();
    /// common.sort_unstable();
    /// assert_eq!(common, vec![2, 3]);
    /// ```
    #[must_use]
    pub fn inter<O: LockPolicy>(&self, other: &Set<T, O, S>) -> LocalSet<T, S> {
        let guards = self.lock_operands(other);
        let (mine, theirs) = (guards.receiver(), guards.argument());
        let result: HashSet<T, S> = if guards.aliased() {
            mine.iter().cloned().collect()
        } else {
            mine.iter()
                .filter(|element| theirs.contains(*element))
                .cloned()
                .collect()
        };
        trace!(
            "inter of {} and {} elements produced {} (aliased: {})",
            mine.len(),
            theirs.len(),
            result.len(),
            guards.aliased()
        );
        Set::from_storage(result)
    }

    /// Returns a new set of the elements in `full` that are not in `self`.
    ///
    /// `self` is expected to be a subset of `full`; this is not checked.
    /// When it is not, the result is still `full` minus `self`, which is not a
    /// complement in the strict sense. Passing `self` as its own universe
    /// yields an empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use guarded_set::set::SyncSet;
    ///
    /// let part: SyncSet<i32> = [1, 2].into_iter().collect();
    /// let full: SyncSet<i32> = [1, 2, 3, 4].into_iter().collect();
    ///
    /// let mut rest = part.complement(&full).slice();
    /// rest.sort_unstable();
    /// assert_eq!(rest, vec![3, 4]);
    /// ```
    #[must_use]
    pub fn complement<O: LockPolicy>(&self, full: &Set<T, O, S>) -> LocalSet<T, S> {
        let guards = self.lock_operands(full);
        let (mine, universe) = (guards.receiver(), guards.argument());
        let result: HashSet<T, S> = universe
            .iter()
            .filter(|element| !mine.contains(*element))
            .cloned()
            .collect();
        trace!(
            "complement of {} within {} elements produced {}",
            mine.len(),
            universe.len(),
            result.len()
        );
        Set::from_storage(result)
    }
}

// =============================================================================
// Tests
// =============================================================================

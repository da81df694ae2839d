//! Standard trait implementations for [`Set`].

use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use super::Set;
use crate::lock::LockPolicy;

// =============================================================================
// Construction Traits
// =============================================================================

impl<T, P: LockPolicy, S: Default> Default for Set<T, P, S> {
    #[inline]
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, P: LockPolicy, S> From<HashSet<T, S>> for Set<T, P, S> {
    #[inline]
    fn from(storage: HashSet<T, S>) -> Self {
        Self::from_storage(storage)
    }
}

impl<T, P, S> FromIterator<T> for Set<T, P, S>
where
    T: Hash + Eq,
    P: LockPolicy,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_storage(iter.into_iter().collect())
    }
}

impl<T, P, S> Extend<T> for Set<T, P, S>
where
    T: Hash + Eq,
    P: LockPolicy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.get_mut().extend(iter);
    }
}

impl<T, P, S> Clone for Set<T, P, S>
where
    T: Clone,
    P: LockPolicy,
    S: Clone,
{
    /// Copies the current elements into a new set with the same policy.
    fn clone(&self) -> Self {
        Self::from_storage(self.rlock_func(HashSet::clone))
    }
}

// =============================================================================
// Comparison
// =============================================================================

impl<T, P, O, S> PartialEq<Set<T, O, S>> for Set<T, P, S>
where
    T: Hash + Eq + Clone,
    P: LockPolicy,
    O: LockPolicy,
    S: BuildHasher + Default,
{
    fn eq(&self, other: &Set<T, O, S>) -> bool {
        self.equal(other)
    }
}

impl<T, P, S> Eq for Set<T, P, S>
where
    T: Hash + Eq + Clone,
    P: LockPolicy,
    S: BuildHasher + Default,
{
}

// =============================================================================
// Formatting
// =============================================================================

impl<T: fmt::Debug, P: LockPolicy, S> fmt::Debug for Set<T, P, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rlock_func(|elements| formatter.debug_set().entries(elements.iter()).finish())
    }
}

impl<T: fmt::Display, P: LockPolicy, S> fmt::Display for Set<T, P, S> {
    /// Renders the elements as `{a, b, c}` in unspecified order.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rlock_func(|elements| {
            write!(formatter, "{{")?;
            let mut first = true;
            for element in elements {
                if first {
                    first = false;
                } else {
                    write!(formatter, ", ")?;
                }
                write!(formatter, "{element}")?;
            }
            write!(formatter, "}}")
        })
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, P, S> serde::Serialize for Set<T, P, S>
where
    T: serde::Serialize,
    P: LockPolicy,
{
    /// Serializes a snapshot taken under one read lock as a sequence.
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        self.rlock_func(|elements| {
            let mut seq = serializer.serialize_seq(Some(elements.len()))?;
            for element in elements {
                seq.serialize_element(element)?;
            }
            seq.end()
        })
    }
}

#[cfg(feature = "serde")]
struct SetVisitor<T, P, S> {
    marker: std::marker::PhantomData<fn() -> (T, P, S)>,
}

#[cfg(feature = "serde")]
impl<T, P, S> SetVisitor<T, P, S> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, P, S> serde::de::Visitor<'de> for SetVisitor<T, P, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    P: LockPolicy,
    S: BuildHasher + Default,
{
    type Value = Set<T, P, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        // Cap the preallocation so a hostile length hint cannot exhaust memory.
        let capacity = seq.size_hint().unwrap_or(0).min(4096);
        let mut storage = HashSet::with_capacity_and_hasher(capacity, S::default());
        while let Some(element) = seq.next_element()? {
            storage.insert(element);
        }
        Ok(Set::from_storage(storage))
    }
}

#[cfg(feature = "serde")]
impl<'de, T, P, S> serde::Deserialize<'de> for Set<T, P, S>
where
    T: serde::Deserialize<'de> + Hash + Eq,
    P: LockPolicy,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(SetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::set::{LocalSet, SyncSet};
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn test_display_empty_set() {
        let set: SyncSet<i32> = SyncSet::new();
        assert_eq!(format!("{set}"), "{}");
    }

    #[rstest]
    fn test_display_single_element_set() {
        let set: SyncSet<i32> = [42].into_iter().collect();
        assert_eq!(format!("{set}"), "{42}");
    }

    #[rstest]
    fn test_display_multiple_elements_set() {
        let set: LocalSet<i32> = [1, 2, 3].into_iter().collect();
        let display = format!("{set}");
        assert!(display.starts_with('{'));
        assert!(display.ends_with('}'));
        assert!(display.contains('1'));
        assert!(display.contains('2'));
        assert!(display.contains('3'));
        assert_eq!(display.matches(", ").count(), 2);
    }

    #[rstest]
    fn test_debug_lists_elements() {
        let set: SyncSet<&str> = ["only"].into_iter().collect();
        assert_eq!(format!("{set:?}"), "{\"only\"}");
    }

    #[rstest]
    fn test_clone_is_independent() {
        let original: SyncSet<i32> = [1, 2].into_iter().collect();
        let copy = original.clone();
        copy.add(3);
        assert_eq!(original.size(), 2);
        assert_eq!(copy.size(), 3);
    }

    #[rstest]
    fn test_eq_across_policies() {
        let shared: SyncSet<i32> = [1, 2].into_iter().collect();
        let local: LocalSet<i32> = [2, 1].into_iter().collect();
        assert!(shared == local);
        assert_eq!(shared, shared.clone());
    }

    #[rstest]
    fn test_extend_and_from_hash_set() {
        let mut set: SyncSet<i32> = SyncSet::from(HashSet::from([1]));
        set.extend([2, 3]);
        assert_eq!(set.size(), 3);
    }

    #[rstest]
    fn test_default_is_empty() {
        let set: LocalSet<i32> = LocalSet::default();
        assert!(set.is_empty());
    }
}

//! Lock policies for [`Set`](crate::set::Set).
//!
//! A lock policy decides how a set guards its storage. The policy is a type
//! parameter of the set, so it is chosen once at construction and can never
//! change afterwards:
//!
//! - [`Synchronized`]: reader/writer mutual exclusion backed by
//!   [`parking_lot::RwLock`]. Readers run concurrently, writers are exclusive.
//! - [`Unsynchronized`]: no cross-thread synchronization at all, backed by
//!   [`RefCell`](std::cell::RefCell). A set using this policy is `!Sync`, so
//!   the compiler refuses to share it between threads.
//!
//! Both policies expose the same capability: a read guard (`RLock`/`RUnlock`)
//! and a write guard (`Lock`/`Unlock`). Unlocking is the guard's `Drop`, so a
//! critical section ends on every exit path, including `?` and unwinding.
//!
//! # Examples
//!
//! ```rust
//! use guarded_set::lock::{LockPolicy, Synchronized, Unsynchronized};
//!
//! let shared = Synchronized::new_cell(vec![1, 2, 3]);
//! Synchronized::write(&shared).push(4);
//! assert_eq!(Synchronized::read(&shared).len(), 4);
//!
//! let local = Unsynchronized::new_cell(vec![1]);
//! Unsynchronized::write(&local).clear();
//! assert!(Unsynchronized::read(&local).is_empty());
//! ```
//!
//! # Reentrancy
//!
//! Neither policy is reentrant. Requesting a write guard while any guard on
//! the same cell is alive deadlocks under [`Synchronized`] and panics with a
//! borrow error under [`Unsynchronized`].

mod synchronized;
mod unsynchronized;

pub use synchronized::Synchronized;
pub use unsynchronized::Unsynchronized;

use std::ops::{Deref, DerefMut};

/// A strategy for guarding a value behind read and write critical sections.
///
/// Implementors are zero-sized marker types. The guarded value lives in
/// [`LockPolicy::Cell`], and every access goes through a guard whose lifetime
/// is the critical section.
pub trait LockPolicy: 'static {
    /// Human readable policy name, used in log output.
    const NAME: &'static str;

    /// Storage wrapper holding the guarded value.
    type Cell<M>;

    /// Shared access guard. Dropping it ends the read critical section.
    type ReadGuard<'a, M: 'a>: Deref<Target = M>
    where
        Self: 'a;

    /// Exclusive access guard. Dropping it ends the write critical section.
    type WriteGuard<'a, M: 'a>: DerefMut<Target = M>
    where
        Self: 'a;

    /// Wraps `value` in this policy's cell.
    fn new_cell<M>(value: M) -> Self::Cell<M>;

    /// Enters a read critical section.
    fn read<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::ReadGuard<'a, M>;

    /// Enters a read critical section without queueing behind writers.
    ///
    /// A writer that is only waiting does not block this call; a writer that
    /// holds the lock still does. Used for a second read lock taken while
    /// another guard is already held, so two readers holding one set each
    /// cannot wait on each other through queued writers.
    fn read_recursive<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::ReadGuard<'a, M>;

    /// Enters a write critical section.
    fn write<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::WriteGuard<'a, M>;

    /// Borrows the value mutably without locking.
    ///
    /// The exclusive borrow of the cell already proves no guard is alive.
    fn get_mut<M>(cell: &mut Self::Cell<M>) -> &mut M;

    /// Consumes the cell and returns the guarded value.
    fn into_inner<M>(cell: Self::Cell<M>) -> M;
}

// =============================================================================
// Tests
// =============================================================================

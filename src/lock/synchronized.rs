use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::LockPolicy;

/// Reader/writer mutual exclusion.
///
/// Backed by [`parking_lot::RwLock`], which never poisons: a panic inside a
/// critical section releases the lock and later callers proceed normally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Synchronized;

impl LockPolicy for Synchronized {
    const NAME: &'static str = "synchronized";

    type Cell<M> = RwLock<M>;
    type ReadGuard<'a, M: 'a> = RwLockReadGuard<'a, M>;
    type WriteGuard<'a, M: 'a> = RwLockWriteGuard<'a, M>;

    #[inline]
    fn new_cell<M>(value: M) -> Self::Cell<M> {
        RwLock::new(value)
    }

    #[inline]
    fn read<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::ReadGuard<'a, M> {
        cell.read()
    }

    #[inline]
    fn read_recursive<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::ReadGuard<'a, M> {
        cell.read_recursive()
    }

    #[inline]
    fn write<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::WriteGuard<'a, M> {
        cell.write()
    }

    #[inline]
    fn get_mut<M>(cell: &mut Self::Cell<M>) -> &mut M {
        cell.get_mut()
    }

    #[inline]
    fn into_inner<M>(cell: Self::Cell<M>) -> M {
        cell.into_inner()
    }
}

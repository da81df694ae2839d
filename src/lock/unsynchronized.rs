use std::cell::{Ref, RefCell, RefMut};

use super::LockPolicy;

/// No synchronization.
///
/// Backed by [`RefCell`], so the only cost of a critical section is a
/// non-atomic borrow flag. Cells of this policy are `!Sync`; a set built on
/// it can move to another thread but never be shared by two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Unsynchronized;

impl LockPolicy for Unsynchronized {
    const NAME: &'static str = "unsynchronized";

    type Cell<M> = RefCell<M>;
    type ReadGuard<'a, M: 'a> = Ref<'a, M>;
    type WriteGuard<'a, M: 'a> = RefMut<'a, M>;

    #[inline]
    fn new_cell<M>(value: M) -> Self::Cell<M> {
        RefCell::new(value)
    }

    #[inline]
    fn read<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::ReadGuard<'a, M> {
        cell.borrow()
    }

    #[inline]
    fn read_recursive<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::ReadGuard<'a, M> {
        cell.borrow()
    }

    #[inline]
    fn write<'a, M: 'a>(cell: &'a Self::Cell<M>) -> Self::WriteGuard<'a, M> {
        cell.borrow_mut()
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

use std::fmt::{self, Debug, Formatter};
use std::hash::BuildHasher;
use std::iter::FusedIterator;

use super::{HashTable, Keyed, Link, Slot};

impl<'t, 'a, R: Keyed, B: BuildHasher> IntoIterator for &'t HashTable<'a, R, B> {
    type Item = &'a R;

    type IntoIter = Iter<'t, 'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            slots: &self.slots,
            front: self.head,
            back: self.tail,
            len: self.len,
        }
    }
}

/// A type for borrowed iteration over a [`HashTable`] in insertion order. Produces the stored
/// references, of type `&'a R`, which remain valid after the iterator and table are gone.
///
/// See [`HashTable::iter`].
pub struct Iter<'t, 'a, R: Keyed> {
    pub(crate) slots: &'t [Slot<'a, R>],
    pub(crate) front: Link,
    pub(crate) back: Link,
    pub(crate) len: usize,
}

impl<'t, 'a, R: Keyed> Iterator for Iter<'t, 'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let entry = self.slots[self.front?].entry();
        self.front = entry.next;
        self.len -= 1;
        Some(entry.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'t, 'a, R: Keyed> DoubleEndedIterator for Iter<'t, 'a, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let entry = self.slots[self.back?].entry();
        self.back = entry.prev;
        self.len -= 1;
        Some(entry.record)
    }
}

impl<'t, 'a, R: Keyed> ExactSizeIterator for Iter<'t, 'a, R> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'t, 'a, R: Keyed> FusedIterator for Iter<'t, 'a, R> {}

impl<'t, 'a, R: Keyed> Clone for Iter<'t, 'a, R> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'t, 'a, R: Keyed + Debug> Debug for Iter<'t, 'a, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator which unlinks every record from a [`HashTable`] in insertion order, yielding each
/// one. Dropping it unlinks whatever remains.
///
/// See [`HashTable::drain`].
pub struct Drain<'t, 'a, R: Keyed, B: BuildHasher> {
    pub(crate) table: &'t mut HashTable<'a, R, B>,
}

impl<'t, 'a, R: Keyed, B: BuildHasher> Iterator for Drain<'t, 'a, R, B> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.table.head?;
        Some(self.table.unlink(head))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.table.len, Some(self.table.len))
    }
}

impl<'t, 'a, R: Keyed, B: BuildHasher> ExactSizeIterator for Drain<'t, 'a, R, B> {}

impl<'t, 'a, R: Keyed, B: BuildHasher> FusedIterator for Drain<'t, 'a, R, B> {}

impl<'t, 'a, R: Keyed, B: BuildHasher> Drop for Drain<'t, 'a, R, B> {
    fn drop(&mut self) {
        self.table.clear();
    }
}

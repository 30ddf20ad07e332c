use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use super::{DoublyLinked, SinglyLinked};

/// An iterator over the nodes of an intrusive list, from front to back. Produces values of type
/// `&'a N`.
///
/// The iterator doesn't borrow the list. It moves past each node before yielding it, so the yielded
/// node may be deleted from the list without disturbing iteration.
///
/// See [`IntrusiveList::iter`](super::IntrusiveList::iter).
pub struct Iter<'a, N> {
    pub(crate) next: Option<&'a N>,
}

impl<'a, N: SinglyLinked<'a>> Iterator for Iter<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next();
        Some(node)
    }
}

impl<'a, N: SinglyLinked<'a>> FusedIterator for Iter<'a, N> {}

impl<'a, N> Clone for Iter<'a, N> {
    fn clone(&self) -> Self {
        Iter { next: self.next }
    }
}

impl<'a, N: SinglyLinked<'a> + Debug> Debug for Iter<'a, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the nodes of a [`DoublyLinkedList`](super::DoublyLinkedList), from back to
/// front. Like [`Iter`], it moves past each node before yielding it.
///
/// See [`DoublyLinkedList::iter_rev`](super::DoublyLinkedList::iter_rev).
pub struct IterRev<'a, N> {
    pub(crate) next: Option<&'a N>,
}

impl<'a, N: DoublyLinked<'a>> Iterator for IterRev<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.prev();
        Some(node)
    }
}

impl<'a, N: DoublyLinked<'a>> FusedIterator for IterRev<'a, N> {}

impl<'a, N> Clone for IterRev<'a, N> {
    fn clone(&self) -> Self {
        IterRev { next: self.next }
    }
}

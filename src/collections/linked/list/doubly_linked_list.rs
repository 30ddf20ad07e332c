use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::ptr;

use super::{merge_sort, DoublyLinked, IntrusiveList, IterRev};

/// An intrusive list threaded through the `next` and `prev` links of caller-owned nodes, keeping
/// both ends so that every linking operation is `O(1)`.
///
/// Operations are provided by the [`IntrusiveList`] trait. Passing a node that is linked into a
/// different list as a position (`existing` or `old`) is a logic error: the `O(1)` membership
/// check can't tell the lists apart.
///
/// # Examples
/// ```
/// # use generic_containers::collections::linked::*;
/// struct El<'a> {
///     id: u32,
///     next: Link<'a, El<'a>>,
///     prev: Link<'a, El<'a>>,
/// }
///
/// impl<'a> SinglyLinked<'a> for El<'a> {
///     fn next_link(&self) -> &Link<'a, Self> {
///         &self.next
///     }
/// }
///
/// impl<'a> DoublyLinked<'a> for El<'a> {
///     fn prev_link(&self) -> &Link<'a, Self> {
///         &self.prev
///     }
/// }
///
/// let nodes = [1, 2, 3].map(|id| El { id, next: Link::default(), prev: Link::default() });
/// let mut list = DoublyLinkedList::new();
/// for node in &nodes {
///     list.prepend(node);
/// }
///
/// assert_eq!(list.iter().map(|n| n.id).collect::<Vec<_>>(), [3, 2, 1]);
/// assert_eq!(list.iter_rev().map(|n| n.id).collect::<Vec<_>>(), [1, 2, 3]);
/// ```
pub struct DoublyLinkedList<'a, N: DoublyLinked<'a>> {
    pub(crate) head: Option<&'a N>,
    pub(crate) tail: Option<&'a N>,
    pub(crate) len: usize,
}

impl<'a, N: DoublyLinked<'a>> DoublyLinkedList<'a, N> {
    /// Creates an empty list.
    pub const fn new() -> DoublyLinkedList<'a, N> {
        DoublyLinkedList {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns an iterator over the nodes from back to front.
    pub fn iter_rev(&self) -> IterRev<'a, N> {
        IterRev { next: self.tail }
    }

    /// Checks whether `node` is linked in, by looking only at its `prev` neighbour. This can't
    /// detect a node linked into some other list.
    pub(crate) fn is_linked(&self, node: &N) -> bool {
        match node.prev() {
            Some(prev) => prev.next().is_some_and(|next| ptr::eq(next, node)),
            None => self.head.is_some_and(|head| ptr::eq(head, node)),
        }
    }

    /// Checks whether `node` can be linked in: it has no links set and isn't the sole node of this
    /// list.
    pub(crate) fn is_free(&self, node: &N) -> bool {
        node.next().is_none()
            && node.prev().is_none()
            && !self.head.is_some_and(|head| ptr::eq(head, node))
    }

    /// Points the neighbours on either side of a position at `node`, or updates the ends of the
    /// list where there is no neighbour.
    fn link_between(&mut self, prev: Option<&'a N>, node: &'a N, next: Option<&'a N>) {
        node.set_prev(prev);
        node.set_next(next);
        match prev {
            Some(prev) => prev.set_next(Some(node)),
            None => self.head = Some(node),
        }
        match next {
            Some(next) => next.set_prev(Some(node)),
            None => self.tail = Some(node),
        }
    }

    fn unlink_node(node: &N) {
        node.set_prev(None);
        node.set_next(None);
    }
}

impl<'a, N: DoublyLinked<'a>> IntrusiveList<'a, N> for DoublyLinkedList<'a, N> {
    fn count(&self) -> usize {
        self.len
    }

    fn front(&self) -> Option<&'a N> {
        self.head
    }

    fn back(&self) -> Option<&'a N> {
        self.tail
    }

    fn prepend(&mut self, node: &'a N) -> bool {
        if !self.is_free(node) {
            return false;
        }

        self.link_between(None, node, self.head);
        self.len += 1;
        true
    }

    fn append(&mut self, node: &'a N) -> bool {
        if !self.is_free(node) {
            return false;
        }

        self.link_between(self.tail, node, None);
        self.len += 1;
        true
    }

    fn insert_before(&mut self, existing: &'a N, node: &'a N) -> bool {
        if !self.is_linked(existing) || !self.is_free(node) {
            return false;
        }

        self.link_between(existing.prev(), node, Some(existing));
        self.len += 1;
        true
    }

    fn insert_after(&mut self, existing: &'a N, node: &'a N) -> bool {
        if !self.is_linked(existing) || !self.is_free(node) {
            return false;
        }

        self.link_between(Some(existing), node, existing.next());
        self.len += 1;
        true
    }

    fn delete(&mut self, node: &N) -> bool {
        if !self.is_linked(node) {
            return false;
        }

        let (prev, next) = (node.prev(), node.next());
        match prev {
            Some(prev) => prev.set_next(next),
            None => self.head = next,
        }
        match next {
            Some(next) => next.set_prev(prev),
            None => self.tail = prev,
        }

        Self::unlink_node(node);
        self.len -= 1;
        true
    }

    fn replace(&mut self, old: &N, new: &'a N) -> bool {
        if !self.is_linked(old) {
            return false;
        }
        if ptr::eq(old, new) {
            return true;
        }
        if !self.is_free(new) {
            return false;
        }

        let (prev, next) = (old.prev(), old.next());
        Self::unlink_node(old);
        self.link_between(prev, new, next);
        true
    }

    fn concat(&mut self, other: &mut Self) {
        let (Some(other_head), Some(other_tail)) = (other.head.take(), other.tail.take()) else {
            return;
        };

        match self.tail {
            Some(tail) => {
                tail.set_next(Some(other_head));
                other_head.set_prev(Some(tail));
            },
            None => self.head = Some(other_head),
        }
        self.tail = Some(other_tail);
        self.len += other.len;
        other.len = 0;
    }

    fn sort<F: FnMut(&N, &N) -> Ordering>(&mut self, cmp: F) {
        self.head = merge_sort(self.head, cmp);

        // Sorting only relinks next, so rebuild prev and find the new tail.
        let mut prev = None;
        for node in self.iter() {
            node.set_prev(prev);
            prev = Some(node);
        }
        self.tail = prev;
    }

    fn clear(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            current = node.next();
            Self::unlink_node(node);
        }
        self.tail = None;
        self.len = 0;
    }
}

impl<'a, N: DoublyLinked<'a>> Default for DoublyLinkedList<'a, N> {
    fn default() -> Self {
        DoublyLinkedList::new()
    }
}

impl<'a, N: DoublyLinked<'a> + Debug> Debug for DoublyLinkedList<'a, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoublyLinkedList")
            .field("nodes", &self.iter())
            .field("len", &self.len)
            .finish()
    }
}

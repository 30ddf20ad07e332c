use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::ptr;

use super::{merge_sort, IntrusiveList, SinglyLinked};

/// An intrusive list threaded through the `next` link of caller-owned nodes. Only the head is
/// stored, so operations at the back and any operation that needs a node's predecessor walk the
/// list.
///
/// Operations are provided by the [`IntrusiveList`] trait.
///
/// # Examples
/// ```
/// # use generic_containers::collections::linked::*;
/// struct El<'a> {
///     name: char,
///     next: Link<'a, El<'a>>,
/// }
///
/// impl<'a> SinglyLinked<'a> for El<'a> {
///     fn next_link(&self) -> &Link<'a, Self> {
///         &self.next
///     }
/// }
///
/// let nodes = ['b', 'c', 'a'].map(|name| El { name, next: Link::default() });
/// let mut list = SinglyLinkedList::new();
/// for node in &nodes {
///     list.append(node);
/// }
///
/// list.sort(|a, b| a.name.cmp(&b.name));
/// assert_eq!(list.iter().map(|n| n.name).collect::<String>(), "abc");
///
/// assert!(list.delete(&nodes[1]));
/// assert_eq!(list.iter().map(|n| n.name).collect::<String>(), "ab");
/// assert!(nodes[1].next().is_none());
/// ```
pub struct SinglyLinkedList<'a, N: SinglyLinked<'a>> {
    pub(crate) head: Option<&'a N>,
    pub(crate) len: usize,
}

impl<'a, N: SinglyLinked<'a>> SinglyLinkedList<'a, N> {
    /// Creates an empty list.
    pub const fn new() -> SinglyLinkedList<'a, N> {
        SinglyLinkedList {
            head: None,
            len: 0,
        }
    }

    /// Finds the node whose `next` link points at `node`.
    pub(crate) fn predecessor(&self, node: &N) -> Option<&'a N> {
        self.iter().find(|p| p.next().is_some_and(|next| ptr::eq(next, node)))
    }

    pub(crate) fn is_head(&self, node: &N) -> bool {
        self.head.is_some_and(|head| ptr::eq(head, node))
    }

    /// Checks whether `node` is in this list, or has a `next` link set by some other list.
    pub(crate) fn is_linked(&self, node: &N) -> bool {
        node.next().is_some() || self.contains(node)
    }
}

impl<'a, N: SinglyLinked<'a>> IntrusiveList<'a, N> for SinglyLinkedList<'a, N> {
    fn count(&self) -> usize {
        self.len
    }

    fn front(&self) -> Option<&'a N> {
        self.head
    }

    fn back(&self) -> Option<&'a N> {
        self.iter().last()
    }

    fn prepend(&mut self, node: &'a N) -> bool {
        // Only the tail of this list escapes the O(1) check.
        if node.next().is_some() || self.is_head(node) {
            return false;
        }
        debug_assert!(!self.contains(node), "node is already the tail of this list");

        node.set_next(self.head);
        self.head = Some(node);
        self.len += 1;
        true
    }

    fn append(&mut self, node: &'a N) -> bool {
        if self.is_linked(node) {
            return false;
        }

        match self.back() {
            Some(last) => last.set_next(Some(node)),
            None => self.head = Some(node),
        }
        self.len += 1;
        true
    }

    fn insert_before(&mut self, existing: &'a N, node: &'a N) -> bool {
        if self.is_linked(node) {
            return false;
        }
        if self.is_head(existing) {
            return self.prepend(node);
        }

        match self.predecessor(existing) {
            Some(prev) => {
                node.set_next(Some(existing));
                prev.set_next(Some(node));
                self.len += 1;
                true
            },
            None => false,
        }
    }

    fn insert_after(&mut self, existing: &'a N, node: &'a N) -> bool {
        if !self.contains(existing) || self.is_linked(node) {
            return false;
        }

        node.set_next(existing.next());
        existing.set_next(Some(node));
        self.len += 1;
        true
    }

    fn delete(&mut self, node: &N) -> bool {
        if self.is_head(node) {
            self.head = node.next();
        } else {
            match self.predecessor(node) {
                Some(prev) => prev.set_next(node.next()),
                None => return false,
            }
        }

        node.set_next(None);
        self.len -= 1;
        true
    }

    fn replace(&mut self, old: &N, new: &'a N) -> bool {
        if ptr::eq(old, new) {
            return self.contains(old);
        }
        if self.is_linked(new) {
            return false;
        }

        if self.is_head(old) {
            self.head = Some(new);
        } else {
            match self.predecessor(old) {
                Some(prev) => prev.set_next(Some(new)),
                None => return false,
            }
        }

        new.set_next(old.next());
        old.set_next(None);
        true
    }

    fn concat(&mut self, other: &mut Self) {
        let Some(other_head) = other.head.take() else {
            return;
        };

        match self.back() {
            Some(last) => last.set_next(Some(other_head)),
            None => self.head = Some(other_head),
        }
        self.len += other.len;
        other.len = 0;
    }

    fn sort<F: FnMut(&N, &N) -> Ordering>(&mut self, cmp: F) {
        self.head = merge_sort(self.head, cmp);
    }

    fn clear(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            current = node.next();
            node.set_next(None);
        }
        self.len = 0;
    }
}

impl<'a, N: SinglyLinked<'a>> Default for SinglyLinkedList<'a, N> {
    fn default() -> Self {
        SinglyLinkedList::new()
    }
}

impl<'a, N: SinglyLinked<'a> + Debug> Debug for SinglyLinkedList<'a, N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinglyLinkedList")
            .field("nodes", &self.iter())
            .field("len", &self.len)
            .finish()
    }
}

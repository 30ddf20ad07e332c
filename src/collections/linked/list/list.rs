use std::cmp::Ordering;
use std::ptr;

use super::{Iter, SinglyLinked};

/// Operations shared by [`SinglyLinkedList`](super::SinglyLinkedList) and
/// [`DoublyLinkedList`](super::DoublyLinkedList).
///
/// Intrusive lists never allocate, move or free nodes. They only rewrite the links embedded in
/// nodes owned by the caller, which must outlive the list (enforced through `'a`). Nodes are
/// identified by address, so two nodes with equal contents are still distinct.
///
/// A node can be linked into at most one position at a time. Every method that links a node in
/// returns false, leaving the list unchanged, when that node is already linked. A node counts as
/// linked until it is deleted, replaced or cleared, so nodes of a list that was dropped without
/// [`clear`](IntrusiveList::clear) can't be reused. The only case that can't be checked cheaply
/// is prepending the last node of a [`SinglyLinkedList`](super::SinglyLinkedList); doing so is a
/// logic error, caught by a debug assertion.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of nodes in the list.
///
/// | Method | Singly | Doubly |
/// |-|-|-|
/// | `prepend` | `O(1)` | `O(1)` |
/// | `append` | `O(n)` | `O(1)` |
/// | `insert_before` | `O(n)` | `O(1)` |
/// | `insert_after` | `O(n)` | `O(1)` |
/// | `delete` | `O(n)` | `O(1)` |
/// | `replace` | `O(n)` | `O(1)` |
/// | `concat` | `O(n)` | `O(1)` |
/// | `insert_sorted` | `O(n)` | `O(n)` |
/// | `search` | `O(n)` | `O(n)` |
/// | `sort` | `O(n log n)` | `O(n log n)` |
/// | `count` | `O(1)` | `O(1)` |
pub trait IntrusiveList<'a, N: SinglyLinked<'a>> {
    /// Returns the number of nodes in the list.
    fn count(&self) -> usize;

    /// Returns true if the list contains no nodes.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the first node.
    fn front(&self) -> Option<&'a N>;

    /// Returns the last node.
    fn back(&self) -> Option<&'a N>;

    /// Links `node` in as the new front. Returns false if `node` is already linked.
    fn prepend(&mut self, node: &'a N) -> bool;

    /// Links `node` in as the new back. Returns false if `node` is already linked.
    fn append(&mut self, node: &'a N) -> bool;

    /// Links `node` in directly before `existing`. Returns false, leaving the list unchanged, if
    /// `existing` isn't in the list or `node` is already linked.
    fn insert_before(&mut self, existing: &'a N, node: &'a N) -> bool;

    /// Links `node` in directly after `existing`. Returns false, leaving the list unchanged, if
    /// `existing` isn't in the list or `node` is already linked.
    fn insert_after(&mut self, existing: &'a N, node: &'a N) -> bool;

    /// Unlinks `node` and clears its links. Returns false if `node` isn't in the list.
    fn delete(&mut self, node: &N) -> bool;

    /// Links `new` into the position held by `old`, then clears the links of `old`. Returns false
    /// if `old` isn't in the list or `new` is linked somewhere else.
    fn replace(&mut self, old: &N, new: &'a N) -> bool;

    /// Moves every node of `other` onto the back of this list, leaving `other` empty.
    fn concat(&mut self, other: &mut Self);

    /// Sorts the list in place according to `cmp`, by relinking rather than moving nodes. The sort
    /// is stable.
    fn sort<F: FnMut(&N, &N) -> Ordering>(&mut self, cmp: F);

    /// Unlinks every node, clearing all of their links.
    fn clear(&mut self);

    /// Returns an iterator over the nodes from front to back.
    fn iter(&self) -> Iter<'a, N> {
        Iter { next: self.front() }
    }

    /// Links `node` in before the first node that compares greater than it, so a list that was
    /// sorted by `cmp` stays sorted. Equal nodes keep their insertion order. Returns false if
    /// `node` is already linked.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::linked::*;
    /// # struct El<'a> { id: u32, next: Link<'a, El<'a>> }
    /// # impl<'a> SinglyLinked<'a> for El<'a> {
    /// #     fn next_link(&self) -> &Link<'a, Self> { &self.next }
    /// # }
    /// let nodes = [5, 1, 3].map(|id| El { id, next: Link::default() });
    /// let mut list = SinglyLinkedList::new();
    /// for node in &nodes {
    ///     list.insert_sorted(node, |a, b| a.id.cmp(&b.id));
    /// }
    /// assert_eq!(list.iter().map(|n| n.id).collect::<Vec<_>>(), [1, 3, 5]);
    /// ```
    fn insert_sorted<F: FnMut(&N, &N) -> Ordering>(&mut self, node: &'a N, mut cmp: F) -> bool {
        match self.iter().find(|existing| cmp(existing, node) == Ordering::Greater) {
            Some(existing) => self.insert_before(existing, node),
            None => self.append(node),
        }
    }

    /// Returns the first node that satisfies `pred`.
    fn search<P: FnMut(&N) -> bool>(&self, mut pred: P) -> Option<&'a N> {
        self.iter().find(|node| pred(node))
    }

    /// Returns the first node whose key, as extracted by `key_fn`, equals `key`.
    fn search_by_key<K, F>(&self, key: &K, mut key_fn: F) -> Option<&'a N>
    where
        K: PartialEq,
        F: FnMut(&N) -> K,
    {
        self.iter().find(|node| key_fn(node) == *key)
    }

    /// Returns true if `node` itself is in the list.
    fn contains(&self, node: &N) -> bool {
        self.iter().any(|existing| ptr::eq(existing, node))
    }
}

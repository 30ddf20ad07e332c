use std::cell::Cell;

/// A link embedded in a caller-owned node, pointing at another node or nothing.
///
/// Links are [`Cell`]s so that nodes can be relinked through shared references, which is what
/// allows every node in a list to refer to its neighbours at once.
pub type Link<'a, N> = Cell<Option<&'a N>>;

/// A node type with an embedded `next` link, which can be threaded into a
/// [`SinglyLinkedList`](super::SinglyLinkedList).
///
/// Only [`next_link`](SinglyLinked::next_link) needs implementing. A node can be linked into at most
/// one list through a given link at a time.
///
/// # Examples
/// ```
/// # use generic_containers::collections::linked::{Link, SinglyLinked};
/// struct El<'a> {
///     id: u32,
///     next: Link<'a, El<'a>>,
/// }
///
/// impl<'a> SinglyLinked<'a> for El<'a> {
///     fn next_link(&self) -> &Link<'a, Self> {
///         &self.next
///     }
/// }
/// ```
pub trait SinglyLinked<'a>: Sized + 'a {
    fn next_link(&self) -> &Link<'a, Self>;

    /// Returns the node following this one.
    fn next(&self) -> Option<&'a Self> {
        self.next_link().get()
    }

    fn set_next(&self, next: Option<&'a Self>) {
        self.next_link().set(next);
    }
}

/// A node type with embedded `next` and `prev` links, which can be threaded into a
/// [`DoublyLinkedList`](super::DoublyLinkedList).
///
/// While linked, a node's neighbours always point back at it: `n.next.prev` and `n.prev.next` are
/// both `n`.
pub trait DoublyLinked<'a>: SinglyLinked<'a> {
    fn prev_link(&self) -> &Link<'a, Self>;

    /// Returns the node preceding this one.
    fn prev(&self) -> Option<&'a Self> {
        self.prev_link().get()
    }

    fn set_prev(&self, prev: Option<&'a Self>) {
        self.prev_link().set(prev);
    }
}

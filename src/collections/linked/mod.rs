//! Intrusive linked collection types. [`SinglyLinkedList`] and [`DoublyLinkedList`] link nodes
//! that stay owned by the caller, through the [`SinglyLinked`] and [`DoublyLinked`] traits. Their
//! shared operations live on [`IntrusiveList`].

pub mod list;

#[doc(inline)]
pub use list::{
    DoublyLinked, DoublyLinkedList, IntrusiveList, Iter, IterRev, Link, SinglyLinked,
    SinglyLinkedList,
};

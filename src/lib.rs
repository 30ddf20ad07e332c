//! A small library of generic containers: a growable array and a ring buffer that manage their
//! elements through descriptors, plus a hash table and intrusive linked lists that only ever link
//! data owned by the caller.
//!
//! # Purpose
//! Each container covers one classic shape of storage, written to be predictable about where
//! memory comes from and who owns it:
//! - [`DynamicArray`](collections::contiguous::DynamicArray): contiguous, growable, owning.
//! - [`RingBuffer`](collections::contiguous::RingBuffer): contiguous, fixed capacity, overwriting
//!   its oldest element once full.
//! - [`HashTable`](collections::hash::HashTable): keyed lookup over borrowed records, iterating in
//!   insertion order.
//! - [`SinglyLinkedList`](collections::linked::SinglyLinkedList) and
//!   [`DoublyLinkedList`](collections::linked::DoublyLinkedList): intrusive lists threaded through
//!   links embedded in borrowed nodes.
//!
//! # Descriptors
//! The owning containers never move a caller's value in. They take a reference and ask their
//! [`Descriptor`](collections::descriptor::Descriptor) for a copy, and hand every element back to
//! the descriptor's destructor before it is dropped. The default descriptor,
//! [`Plain`](collections::descriptor::Plain), just uses [`Clone`] and [`Default`].
//!
//! # Error Handling
//! Functions that can fail in ordinary use return a [`Result`] with a strongly typed error from
//! [`error`]: small structs implementing [`Error`](std::error::Error), combined into enums for
//! static dispatch rather than boxed trait objects. Failing to find something is not an error and
//! is reported with [`Option`].
//!
//! Capacity overflow while growing implicitly (such as during `push_back`) panics instead, in the
//! same way as the standard library. `try_reserve` is available where recovering matters.
//!
//! # Features
//! Every container sits behind a Cargo feature (`array`, `hash`, `linked` and `ring`), all enabled
//! by the default `collections-all` feature.
//!
//! # Dependencies
//! This crate uses `std` and depends only on some derive macros, because they remove the need for
//! some very repetitive error definitions.

// #![warn(missing_docs)]
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod collections;

pub(crate) mod util;

#[doc(inline)]
pub use util::error;

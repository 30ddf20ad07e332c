//! Various general-purpose collection types, plus the [`descriptor`] machinery that the owning
//! collections use to produce, copy and destroy their elements.
//!
//! # Ownership
//! The contiguous collections own their elements, creating them through a
//! [`Descriptor`](descriptor::Descriptor). The hash and linked collections never own anything:
//! they link records and nodes that belong to the caller, and the borrow checker makes sure those
//! outlive the collection.
//!
//! # Method
//! Applicable types here implement [`Deref<Target = [T]>`](std::ops::Deref) (and DerefMut), which
//! saves rewriting the functionality of slices.

pub mod descriptor;

#[cfg(feature = "contiguous")]
pub mod contiguous;
#[cfg(feature = "hash")]
pub mod hash;
#[cfg(feature = "linked")]
pub mod linked;

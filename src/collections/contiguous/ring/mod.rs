//! A module containing [`RingBuffer`] and its iterators, [`Iter`] and [`IterMut`], both of which
//! are double-ended for backward traversal.
//!
//! [`RingBuffer`] is also re-exported under the parent module.

mod iter;
mod ring_buffer;

pub use iter::*;
pub use ring_buffer::*;

//! A module containing [`HashTable`], the [`Keyed`] trait for records stored in one, and the
//! associated types for iteration and in-place removal.
//!
//! Records can't be unlinked while an [`Iter`] borrows the table. Use a [`Cursor`],
//! [`HashTable::retain`] or [`HashTable::drain`] to remove records during traversal.
//!
//! [`HashTable`] is also re-exported under the parent module.

mod cursor;
mod hash_table;
mod iter;
mod tests;

pub use cursor::*;
pub use hash_table::*;
pub use iter::*;

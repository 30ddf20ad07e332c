//! Hash-based collection types. Currently just [`HashTable`], which links records that remain owned
//! by the caller.

pub mod table;

#[doc(inline)]
pub use table::{HashTable, Keyed};

#![warn(missing_docs)]

#[cfg(test)]
pub mod alloc;
pub mod error;
pub mod fmt;
#[cfg(all(test, feature = "hash"))]
pub mod hash;
pub mod option;
#[cfg(test)]
pub mod panic;
pub mod result;

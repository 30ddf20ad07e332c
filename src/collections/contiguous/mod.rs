//! Contiguous collection types. Namely [`DynamicArray`] for a collection that varies in size at
//! runtime and [`RingBuffer`] for a fixed-capacity window over the most recent elements.
#![warn(missing_docs)]

pub(crate) mod raw;

#[cfg(feature = "array")]
pub mod array;
#[cfg(feature = "ring")]
pub mod ring;

#[cfg(feature = "array")]
#[doc(inline)]
pub use array::DynamicArray;
#[cfg(feature = "ring")]
#[doc(inline)]
pub use ring::RingBuffer;

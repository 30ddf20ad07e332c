//! A module containing [`DynamicArray`] and its borrowed iteration impls.
//!
//! There is no owned iterator: values only ever leave a DynamicArray through its descriptor's
//! destructor. [`Iter`](std::slice::Iter) and [`IterMut`](std::slice::IterMut) from
//! [`std::slice`] are used for borrowed iteration.
//!
//! [`DynamicArray`] is also re-exported under the parent module.

mod dynamic_array;
mod iter;
mod tests;

pub use dynamic_array::*;

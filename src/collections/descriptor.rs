//! Element descriptors, which tell a contiguous collection how to produce, copy and release the
//! values it stores.
//!
//! A [`DynamicArray`](crate::collections::contiguous::DynamicArray) or
//! [`RingBuffer`](crate::collections::contiguous::RingBuffer) never copies a value with anything
//! other than its descriptor. Every stored value is produced by exactly one call to
//! [`Descriptor::init`] or [`Descriptor::copy`] and is passed to [`Descriptor::dtor`] exactly once,
//! right before it is dropped, when its slot is vacated.

use std::fmt::{self, Debug, Formatter};

/// Describes the lifecycle of a single element of type `T`.
///
/// Most types don't need anything special and can use [`Plain`]. A custom descriptor is useful
/// when a value owns something outside of Rust's ownership model (a handle, a counter, a pooled
/// buffer) that should be released when the collection lets go of it.
///
/// # Examples
/// ```
/// # use generic_containers::collections::contiguous::DynamicArray;
/// # use generic_containers::collections::descriptor::Descriptor;
/// struct Upper;
///
/// impl Descriptor<String> for Upper {
///     fn init(&self) -> String {
///         String::from("EMPTY")
///     }
///
///     fn copy(&self, src: &String) -> String {
///         src.to_uppercase()
///     }
/// }
///
/// let mut arr = DynamicArray::<String, _>::with_descriptor(Upper);
/// arr.push_back(&String::from("hello"));
/// arr.extend_back();
/// assert_eq!(&*arr, &["HELLO", "EMPTY"]);
/// ```
pub trait Descriptor<T> {
    /// The number of bytes occupied by one stored element.
    fn element_size(&self) -> usize {
        size_of::<T>()
    }

    /// Produces the value for a freshly reserved slot.
    fn init(&self) -> T;

    /// Duplicates `src` into a new value to be stored in the collection.
    fn copy(&self, src: &T) -> T;

    /// Releases anything owned by `value` before it is dropped. The default does nothing.
    fn dtor(&self, value: &mut T) {
        let _ = value;
    }
}

/// The no-op descriptor, using [`Default`] to initialize, [`Clone`] to copy and plain [`Drop`] to
/// destroy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Plain;

impl<T: Default + Clone> Descriptor<T> for Plain {
    fn init(&self) -> T {
        T::default()
    }

    fn copy(&self, src: &T) -> T {
        src.clone()
    }
}

/// A descriptor built from optional function pointers. Any hook left as [`None`] behaves like
/// [`Plain`].
///
/// # Examples
/// ```
/// # use generic_containers::collections::contiguous::DynamicArray;
/// # use generic_containers::collections::descriptor::Icd;
/// fn seven() -> u32 {
///     7
/// }
///
/// let icd = Icd::<u32> {
///     init: Some(seven),
///     ..Icd::default()
/// };
///
/// let mut arr = DynamicArray::<u32, _>::with_descriptor(icd);
/// arr.push_back(&1);
/// arr.extend_back();
/// assert_eq!(&*arr, &[1, 7]);
/// ```
pub struct Icd<T> {
    pub init: Option<fn() -> T>,
    pub copy: Option<fn(&T) -> T>,
    pub dtor: Option<fn(&mut T)>,
}

impl<T: Default + Clone> Descriptor<T> for Icd<T> {
    fn init(&self) -> T {
        match self.init {
            Some(init) => init(),
            None => T::default(),
        }
    }

    fn copy(&self, src: &T) -> T {
        match self.copy {
            Some(copy) => copy(src),
            None => src.clone(),
        }
    }

    fn dtor(&self, value: &mut T) {
        if let Some(dtor) = self.dtor {
            dtor(value);
        }
    }
}

impl<T> Default for Icd<T> {
    fn default() -> Self {
        Icd {
            init: None,
            copy: None,
            dtor: None,
        }
    }
}

impl<T> Clone for Icd<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Icd<T> {}

impl<T> Debug for Icd<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icd")
            .field("init", &self.init.is_some())
            .field("copy", &self.copy.is_some())
            .field("dtor", &self.dtor.is_some())
            .finish()
    }
}

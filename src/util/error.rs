//! Strongly typed errors for every fallible operation in this crate. Each error is a small struct
//! implementing [`Error`], and enums such as [`ContainerError`] combine them for static dispatch.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was not less than the length of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The index that was requested.
    pub index: usize,
    /// The length of the collection at the time.
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// A range of `count` elements starting at `start` extends past the end of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOutOfBounds {
    /// The first index of the range.
    pub start: usize,
    /// The number of elements in the range.
    pub count: usize,
    /// The length of the collection at the time.
    pub len: usize,
}

impl Display for RangeOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Range of {} elements starting at {} out of bounds for collection with {} elements!",
            self.count, self.start, self.len,
        )
    }
}

impl Error for RangeOutOfBounds {}

/// An operation needed an element, but the collection was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCollection;

impl Display for EmptyCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Operation requires at least one element, but the collection is empty!")
    }
}

impl Error for EmptyCollection {}

/// A record with an equal key is already in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateKey;

impl Display for DuplicateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "An entry with an equal key already exists!")
    }
}

impl Error for DuplicateKey {}

/// The requested capacity can't be represented, or its layout would exceed [`isize::MAX`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The allocator couldn't provide `size` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailed {
    /// The size of the failed allocation, in bytes.
    pub size: usize,
}

impl Display for AllocFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to allocate {} bytes!", self.size)
    }
}

impl Error for AllocFailed {}

/// The ways growing a contiguous collection can fail. In either case the collection is left as it
/// was before the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum ReserveError {
    /// See [`CapacityOverflow`].
    CapacityOverflow(CapacityOverflow),
    /// See [`AllocFailed`].
    AllocFailed(AllocFailed),
}

/// Every error produced by this crate, for callers that want to use `?` across several
/// collections at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum ContainerError {
    /// See [`IndexOutOfBounds`].
    IndexOutOfBounds(IndexOutOfBounds),
    /// See [`RangeOutOfBounds`].
    RangeOutOfBounds(RangeOutOfBounds),
    /// See [`EmptyCollection`].
    EmptyCollection(EmptyCollection),
    /// See [`DuplicateKey`].
    DuplicateKey(DuplicateKey),
    /// See [`CapacityOverflow`].
    CapacityOverflow(CapacityOverflow),
    /// See [`AllocFailed`].
    AllocFailed(AllocFailed),
}

impl From<ReserveError> for ContainerError {
    fn from(value: ReserveError) -> Self {
        match value {
            ReserveError::CapacityOverflow(err) => err.into(),
            ReserveError::AllocFailed(err) => err.into(),
        }
    }
}

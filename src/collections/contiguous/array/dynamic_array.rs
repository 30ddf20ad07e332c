use std::borrow::{Borrow, BorrowMut};
use std::cmp::{self, Ordering};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice;

use crate::collections::contiguous::raw::RawArray;
use crate::collections::descriptor::{Descriptor, Plain};
use crate::util::error::{
    CapacityOverflow, EmptyCollection, IndexOutOfBounds, RangeOutOfBounds, ReserveError,
};
use crate::util::result::ResultExtension;

const MIN_CAP: usize = 2;

const GROWTH_FACTOR: usize = 2;

/// A variable size contiguous collection whose elements are produced, copied and destroyed through
/// a [`Descriptor`].
///
/// Values are never moved into a DynamicArray directly. [`push_back`](DynamicArray::push_back) and
/// the other insertion methods take a reference and store a copy made by the descriptor, and every
/// removal passes the stored value to the descriptor's destructor before dropping it.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the DynamicArray.
/// - `i`: The index of the item in question.
/// - `m`: The number of items being inserted or erased.
///
/// | Method | Complexity |
/// |-|-|
/// | `element_at` | `O(1)` |
/// | `len` | `O(1)` |
/// | `push_back` | `O(1)`*, `O(n)` |
/// | `pop_back` | `O(1)` |
/// | `insert` | `O(n-i)` |
/// | `insert_all` | `O(n-i+m)` |
/// | `erase` | `O(n-i)` |
/// | `sort` | `O(n log n)` |
/// | `find` | `O(log n)` |
/// | `index_of` | `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* If the DynamicArray doesn't have enough capacity for the new element, `push_back` will take
/// `O(n)`.
pub struct DynamicArray<T, D: Descriptor<T> = Plain> {
    pub(crate) arr: RawArray<T>,
    pub(crate) len: usize,
    pub(crate) desc: D,
}

impl<T, D: Descriptor<T> + Default> DynamicArray<T, D> {
    /// Creates a new DynamicArray with length and capacity 0, using the default descriptor.
    /// Memory will be allocated when the capacity changes.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let arr: DynamicArray<u8> = DynamicArray::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.cap(), 0);
    /// ```
    pub fn new() -> DynamicArray<T, D> {
        DynamicArray::with_descriptor(D::default())
    }

    /// Creates a new DynamicArray with capacity exactly equal to `cap`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_cap(cap: usize) -> DynamicArray<T, D> {
        DynamicArray::with_cap_and_descriptor(cap, D::default())
    }

    /// Creates a new DynamicArray holding a copy of every value in `values`.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let arr: DynamicArray<u8> = DynamicArray::from_slice(&[1, 2, 3]);
    /// assert_eq!(&*arr, &[1, 2, 3]);
    /// assert_eq!(arr.cap(), 3);
    /// ```
    pub fn from_slice(values: &[T]) -> DynamicArray<T, D> {
        let mut arr = DynamicArray::with_cap(values.len());
        arr.concat(values);
        arr
    }
}

impl<T, D: Descriptor<T>> DynamicArray<T, D> {
    /// Creates a new, empty DynamicArray that manages its elements with `desc`.
    pub const fn with_descriptor(desc: D) -> DynamicArray<T, D> {
        DynamicArray {
            arr: RawArray::new(),
            len: 0,
            desc,
        }
    }

    /// Creates a new DynamicArray with capacity exactly equal to `cap`, managing its elements with
    /// `desc`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_cap_and_descriptor(cap: usize, desc: D) -> DynamicArray<T, D> {
        DynamicArray {
            arr: RawArray::with_size(cap),
            len: 0,
            desc,
        }
    }

    /// Returns the length of the DynamicArray.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the DynamicArray contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity of the DynamicArray.
    pub const fn cap(&self) -> usize {
        self.arr.size()
    }

    /// Returns the descriptor used to manage this DynamicArray's elements.
    pub const fn descriptor(&self) -> &D {
        &self.desc
    }

    /// Returns the number of bytes one element occupies, as reported by the descriptor.
    pub fn element_size(&self) -> usize {
        self.desc.element_size()
    }

    /// Appends a copy of `value` to the end of the DynamicArray, increasing the capacity if
    /// required.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<u8>::new();
    /// for i in 0..=5 {
    ///     arr.push_back(&i);
    /// }
    /// assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn push_back(&mut self, value: &T) {
        let value = self.desc.copy(value);
        self.push_owned(value);
    }

    /// Appends a freshly initialized element to the end of the DynamicArray and returns a mutable
    /// reference to it.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub fn extend_back(&mut self) -> &mut T {
        let value = self.desc.init();
        self.push_owned(value);
        // SAFETY: The element at len - 1 has just been written.
        unsafe { &mut *self.arr.slot(self.len - 1) }
    }

    /// Removes the last element of the DynamicArray, passing it to the descriptor's destructor.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if there are no elements to remove.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<u8>::from_slice(&[1, 2]);
    /// assert!(arr.pop_back().is_ok());
    /// assert!(arr.pop_back().is_ok());
    /// assert!(arr.pop_back().is_err());
    /// ```
    pub fn pop_back(&mut self) -> Result<(), EmptyCollection> {
        if self.len == 0 {
            return Err(EmptyCollection);
        }

        self.len -= 1;
        // SAFETY: The element at the old last index is initialized, and len has already been
        // decremented so it won't be destroyed twice.
        let value = unsafe { self.arr.slot(self.len).read() };
        self.destroy(value);
        Ok(())
    }

    /// Inserts a copy of `value` at `index`, moving all following elements one position to the
    /// right. An `index` equal to the length appends.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` is greater than the length of the DynamicArray.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<u32>::from_slice(&[0, 1, 2]);
    /// arr.insert(&100, 1).unwrap();
    /// arr.insert(&200, 4).unwrap();
    /// assert_eq!(&*arr, &[0, 100, 1, 2, 200]);
    /// assert!(arr.insert(&300, 6).is_err());
    /// ```
    pub fn insert(&mut self, value: &T, index: usize) -> Result<(), IndexOutOfBounds> {
        self.check_insert_index(index)?;

        let value = self.desc.copy(value);
        if self.len == self.cap() {
            self.grow();
        }

        // SAFETY: There is capacity for len + 1 elements, so shifting the elements from index to
        // len one to the right stays in bounds. The slot at index is then overwritten without
        // dropping the (moved) value that was there.
        unsafe {
            ptr::copy(self.arr.slot(index), self.arr.slot(index + 1), self.len - index);
            self.arr.slot(index).write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts a copy of every element of `values` at `index`, keeping their order.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` is greater than the length of the DynamicArray.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<u32>::from_slice(&[0, 1]);
    /// arr.insert_all(&[7, 8, 9], 1).unwrap();
    /// assert_eq!(&*arr, &[0, 7, 8, 9, 1]);
    /// ```
    pub fn insert_all(&mut self, values: &[T], index: usize) -> Result<(), IndexOutOfBounds> {
        self.check_insert_index(index)?;

        let count = values.len();
        if count == 0 {
            return Ok(());
        }
        self.reserve(count);

        let old_len = self.len;
        // SAFETY: Capacity is at least old_len + count, so the shifted tail fits. The gap is filled
        // before len is restored. If a copy panics midway, len still excludes the gap and the
        // shifted tail, which leaks them rather than dropping uninitialized memory.
        unsafe {
            ptr::copy(self.arr.slot(index), self.arr.slot(index + count), old_len - index);
            self.len = index;

            for (offset, value) in values.iter().enumerate() {
                self.arr.slot(index + offset).write(self.desc.copy(value));
            }
        }
        self.len = old_len + count;
        Ok(())
    }

    /// Appends a copy of every element of `values` to the end of the DynamicArray.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub fn concat(&mut self, values: &[T]) {
        self.reserve(values.len());
        for value in values {
            self.push_back(value);
        }
    }

    /// Destroys the `count` elements starting at `index` and moves the following elements left to
    /// fill the gap.
    ///
    /// # Errors
    /// Returns [`RangeOutOfBounds`] if any part of the range lies past the end of the
    /// DynamicArray.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<u32>::from_slice(&[0, 1, 2, 3, 4, 5]);
    /// arr.erase(1, 3).unwrap();
    /// assert_eq!(&*arr, &[0, 4, 5]);
    /// assert!(arr.erase(2, 2).is_err());
    /// ```
    pub fn erase(&mut self, index: usize, count: usize) -> Result<(), RangeOutOfBounds> {
        let end = match index.checked_add(count) {
            Some(end) if end <= self.len => end,
            _ => return Err(RangeOutOfBounds { start: index, count, len: self.len }),
        };

        let old_len = self.len;
        // Anything past index is forgotten while destructors run.
        self.len = index;
        for i in index..end {
            // SAFETY: i < old_len, so the element is initialized, and it is read exactly once.
            let value = unsafe { self.arr.slot(i).read() };
            self.destroy(value);
        }

        // SAFETY: The range end..old_len is initialized and lies within the allocation, and the
        // destination range starts at the now vacated index.
        unsafe { ptr::copy(self.arr.slot(end), self.arr.slot(index), old_len - end) }
        self.len = old_len - count;
        Ok(())
    }

    /// Sets the length of the DynamicArray to `new_len`, destroying elements from the end or
    /// appending initialized elements as required.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub fn resize(&mut self, new_len: usize) {
        match new_len.cmp(&self.len) {
            Ordering::Less => self.truncate(new_len),
            Ordering::Equal => {},
            Ordering::Greater => {
                self.reserve(new_len - self.len);
                while self.len < new_len {
                    self.extend_back();
                }
            },
        }
    }

    /// Destroys every element, leaving the capacity unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Ensures that the DynamicArray has capacity to hold an additional `extra` elements.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub fn reserve(&mut self, extra: usize) {
        match self.len.checked_add(extra) {
            Some(new_cap) if new_cap <= self.cap() => {},
            Some(new_cap) => self.arr.realloc(new_cap),
            None => Err::<(), _>(CapacityOverflow).throw(),
        }
    }

    /// Ensures that the DynamicArray has capacity to hold an additional `extra` elements, reporting
    /// failure instead of panicking.
    ///
    /// # Errors
    /// Returns a [`ReserveError`] if the new capacity can't be represented or allocated. The
    /// DynamicArray is unchanged in that case.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<u64>::from_slice(&[1, 2]);
    /// assert!(arr.try_reserve(usize::MAX).is_err());
    /// assert_eq!(arr.cap(), 2);
    /// assert!(arr.try_reserve(8).is_ok());
    /// assert!(arr.cap() >= 10);
    /// ```
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), ReserveError> {
        let new_cap = self.len.checked_add(extra).ok_or(CapacityOverflow)?;
        if new_cap <= self.cap() {
            return Ok(());
        }

        self.arr.try_realloc(new_cap)
    }

    /// Sorts the DynamicArray in place according to `cmp`. The sort is stable.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<i32>::from_slice(&[3, -1, 2]);
    /// arr.sort(|a, b| b.cmp(a));
    /// assert_eq!(&*arr, &[3, 2, -1]);
    /// ```
    pub fn sort<F: FnMut(&T, &T) -> Ordering>(&mut self, cmp: F) {
        self.deref_mut().sort_by(cmp);
    }

    /// Returns the index of an element equal to `value` under `cmp`, or [`None`] if there isn't
    /// one. The DynamicArray must already be sorted by the same comparator; if it isn't, the
    /// result is unspecified. When several elements match, any one of them may be returned.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let mut arr = DynamicArray::<i32>::from_slice(&[9, 4, 100, 1]);
    /// arr.sort(i32::cmp);
    /// assert_eq!(arr.find(&100, i32::cmp), Some(3));
    /// assert_eq!(arr.find(&1000, i32::cmp), None);
    /// ```
    pub fn find<F: FnMut(&T, &T) -> Ordering>(&self, value: &T, mut cmp: F) -> Option<usize> {
        self.binary_search_by(|probe| cmp(probe, value)).ok()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` is not less than the length.
    pub fn element_at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.get(index).ok_or(IndexOutOfBounds { index, len: self.len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` is not less than the length.
    pub fn element_at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        let len = self.len;
        self.get_mut(index).ok_or(IndexOutOfBounds { index, len })
    }

    /// Returns the index of the element that `element` refers to. This compares addresses, not
    /// values: `element` has to be a reference obtained from this DynamicArray, otherwise [`None`]
    /// is returned.
    ///
    /// All zero-sized elements share one address, so for a zero-sized `T` any element maps to
    /// index 0.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::DynamicArray;
    /// let arr = DynamicArray::<u8>::from_slice(&[5, 5, 5]);
    /// assert_eq!(arr.index_of(&arr[2]), Some(2));
    /// assert_eq!(arr.index_of(&5), None);
    /// ```
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.arr.index_of_ptr(element).filter(|index| *index < self.len)
    }

    /// Returns a reference to the first element, if there is one.
    pub fn front(&self) -> Option<&T> {
        self.first()
    }

    /// Returns a reference to the last element, if there is one.
    pub fn back(&self) -> Option<&T> {
        self.last()
    }
}

impl<T, D: Descriptor<T>> DynamicArray<T, D> {
    /// Moves an already produced value onto the end, growing first if required.
    fn push_owned(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.arr.slot(self.len).write(value) }
        self.len += 1;
    }

    /// Destroys the elements from `new_len` onwards.
    fn truncate(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;
            // SAFETY: The element at the old last index is initialized and is no longer counted.
            let value = unsafe { self.arr.slot(self.len).read() };
            self.destroy(value);
        }
    }

    /// Passes a value that has left the DynamicArray to the descriptor's destructor, then drops
    /// it.
    pub(crate) fn destroy(&self, mut value: T) {
        self.desc.dtor(&mut value);
    }

    /// Grows the internal storage so that at least one more element fits.
    ///
    /// # Panics
    /// Panics if the memory layout of the DynamicArray would have a size that exceeds
    /// [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        let new_cap = match self.cap().checked_mul(GROWTH_FACTOR) {
            Some(doubled) => cmp::max(doubled, MIN_CAP),
            None => Err::<usize, _>(CapacityOverflow).throw(),
        };

        self.arr.realloc(new_cap);
    }

    pub(crate) fn check_insert_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index > self.len {
            Err(IndexOutOfBounds { index, len: self.len })
        } else {
            Ok(())
        }
    }
}

impl<T, D: Descriptor<T> + Default> Default for DynamicArray<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D: Descriptor<T>> Drop for DynamicArray<T, D> {
    fn drop(&mut self) {
        self.truncate(0);
        // Implicitly drop self.arr, which deallocates without touching the (now empty) slots.
    }
}

impl<T, D: Descriptor<T>> Deref for DynamicArray<T, D> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The first len slots are initialized, properly aligned and entirely contained
        // within the allocation, whose size is < isize::MAX.
        unsafe { slice::from_raw_parts(self.arr.ptr.as_ptr(), self.len) }
    }
}

impl<T, D: Descriptor<T>> DerefMut for DynamicArray<T, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: As with deref, and the mutable borrow of self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.arr.ptr.as_ptr(), self.len) }
    }
}

impl<T, D: Descriptor<T>> AsRef<[T]> for DynamicArray<T, D> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T, D: Descriptor<T>> AsMut<[T]> for DynamicArray<T, D> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T, D: Descriptor<T>> Borrow<[T]> for DynamicArray<T, D> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T, D: Descriptor<T>> BorrowMut<[T]> for DynamicArray<T, D> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

impl<T, D: Descriptor<T>> Index<usize> for DynamicArray<T, D> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.element_at(index).throw()
    }
}

impl<T, D: Descriptor<T>> IndexMut<usize> for DynamicArray<T, D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.element_at_mut(index).throw()
    }
}

impl<'a, T: 'a, D: Descriptor<T>> Extend<&'a T> for DynamicArray<T, D> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

// SAFETY: DynamicArray uniquely owns its elements, so it is Send when its elements and descriptor
// are.
unsafe impl<T: Send, D: Descriptor<T> + Send> Send for DynamicArray<T, D> {}
// SAFETY: DynamicArray's safe API obeys all rules of the borrow checker, so no interior mutability
// occurs.
unsafe impl<T: Sync, D: Descriptor<T> + Sync> Sync for DynamicArray<T, D> {}

impl<T, D: Descriptor<T> + Clone> Clone for DynamicArray<T, D> {
    fn clone(&self) -> Self {
        let mut arr = Self::with_cap_and_descriptor(self.len, self.desc.clone());
        arr.concat(self);
        arr
    }
}

impl<T: PartialEq, D: Descriptor<T>> PartialEq for DynamicArray<T, D> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq, D: Descriptor<T>> Eq for DynamicArray<T, D> {}

impl<T: Hash, D: Descriptor<T>> Hash for DynamicArray<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: Debug, D: Descriptor<T>> Debug for DynamicArray<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug, D: Descriptor<T>> Display for DynamicArray<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

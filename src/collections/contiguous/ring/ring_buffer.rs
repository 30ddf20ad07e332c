use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use super::{Iter, IterMut};
use crate::collections::contiguous::raw::RawArray;
use crate::collections::descriptor::{Descriptor, Plain};
use crate::util::error::{EmptyCollection, IndexOutOfBounds};
use crate::util::result::ResultExtension;

/// A fixed-capacity circular buffer. Once full, every [`push_back`](RingBuffer::push_back)
/// destroys the oldest element to make room for the new one.
///
/// Elements are managed through a [`Descriptor`] exactly as in
/// [`DynamicArray`](crate::collections::contiguous::DynamicArray). All indices accepted or returned
/// by a RingBuffer are logical: index 0 is always the oldest element, regardless of where it is
/// physically stored.
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `push_back` | `O(1)` |
/// | `pop_front/back` | `O(1)` |
/// | `element_at` | `O(1)` |
/// | `index_of` | `O(1)` |
/// | `len` | `O(1)` |
/// | `clear` | `O(n)` |
///
/// # Examples
/// ```
/// # use generic_containers::collections::contiguous::RingBuffer;
/// let mut ring = RingBuffer::<char>::new(3);
/// for c in ['a', 'b', 'c', 'd'] {
///     ring.push_back(&c);
/// }
/// assert!(ring.is_full());
/// assert_eq!(ring.iter().collect::<String>(), "bcd");
/// assert_eq!(ring.iter().rev().collect::<String>(), "dcb");
/// ```
pub struct RingBuffer<T, D: Descriptor<T> = Plain> {
    pub(crate) arr: RawArray<T>,
    pub(crate) front: usize,
    pub(crate) len: usize,
    pub(crate) desc: D,
}

impl<T, D: Descriptor<T> + Default> RingBuffer<T, D> {
    /// Creates an empty RingBuffer holding at most `cap` elements, using the default descriptor.
    /// All `cap` slots are allocated up front.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn new(cap: usize) -> RingBuffer<T, D> {
        RingBuffer::with_descriptor(cap, D::default())
    }
}

impl<T, D: Descriptor<T>> RingBuffer<T, D> {
    /// Creates an empty RingBuffer holding at most `cap` elements, managed with `desc`.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub fn with_descriptor(cap: usize, desc: D) -> RingBuffer<T, D> {
        RingBuffer {
            arr: RawArray::with_size(cap),
            front: 0,
            len: 0,
            desc,
        }
    }

    /// Returns the number of elements currently held.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the maximum number of elements the RingBuffer can hold.
    pub const fn cap(&self) -> usize {
        self.arr.size()
    }

    /// Returns true if the RingBuffer holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next push will evict the oldest element.
    pub const fn is_full(&self) -> bool {
        self.len == self.cap()
    }

    /// Returns the descriptor used to manage this RingBuffer's elements.
    pub const fn descriptor(&self) -> &D {
        &self.desc
    }

    /// Returns the number of bytes one element occupies, as reported by the descriptor.
    pub fn element_size(&self) -> usize {
        self.desc.element_size()
    }

    /// Appends a copy of `value`. If the RingBuffer is full, the oldest element is destroyed and
    /// its slot reused, so the length stays at capacity. A RingBuffer with capacity 0 ignores
    /// pushes entirely.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::RingBuffer;
    /// let mut ring = RingBuffer::<u8>::new(2);
    /// ring.push_back(&1);
    /// ring.push_back(&2);
    /// ring.push_back(&3);
    /// assert_eq!(ring.len(), 2);
    /// assert_eq!(ring.front(), Some(&2));
    /// ```
    pub fn push_back(&mut self, value: &T) {
        if self.cap() == 0 {
            return;
        }

        let value = self.desc.copy(value);

        if self.len < self.cap() {
            let slot = self.physical(self.len);
            // SAFETY: slot < cap and isn't one of the len initialized slots.
            unsafe { self.arr.slot(slot).write(value) }
            self.len += 1;
        } else {
            let slot = self.front;
            // SAFETY: The buffer is full, so the front slot is initialized. The old value is moved
            // out and the new one moved in before anything can panic.
            let evicted = unsafe {
                let evicted = self.arr.slot(slot).read();
                self.arr.slot(slot).write(value);
                evicted
            };
            self.front = self.physical(1);
            self.destroy(evicted);
        }
    }

    /// Destroys the oldest element.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if there is nothing to remove.
    pub fn pop_front(&mut self) -> Result<(), EmptyCollection> {
        if self.len == 0 {
            return Err(EmptyCollection);
        }

        // SAFETY: len > 0, so the front slot is initialized. It is forgotten by the adjustment of
        // front and len below before being destroyed.
        let value = unsafe { self.arr.slot(self.front).read() };
        self.front = self.physical(1);
        self.len -= 1;
        self.destroy(value);
        Ok(())
    }

    /// Destroys the newest element.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if there is nothing to remove.
    pub fn pop_back(&mut self) -> Result<(), EmptyCollection> {
        if self.len == 0 {
            return Err(EmptyCollection);
        }

        self.len -= 1;
        // SAFETY: The slot of the old last element is initialized and no longer counted.
        let value = unsafe { self.arr.slot(self.physical(self.len)).read() };
        self.destroy(value);
        Ok(())
    }

    /// Returns a reference to the element at logical `index`, where 0 is the oldest element.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` is not less than the length.
    pub fn element_at(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the physical slot is initialized.
        Ok(unsafe { &*self.arr.slot(self.physical(index)) })
    }

    /// Returns a mutable reference to the element at logical `index`.
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` is not less than the length.
    pub fn element_at_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfBounds> {
        self.check_index(index)?;
        // SAFETY: index < len, so the physical slot is initialized, and self is borrowed mutably.
        Ok(unsafe { &mut *self.arr.slot(self.physical(index)) })
    }

    /// Returns the logical index of the element that `element` refers to, comparing addresses
    /// rather than values. Returns [`None`] if `element` isn't currently held by this RingBuffer.
    ///
    /// All zero-sized elements share one address, so for a zero-sized `T` any element maps to the
    /// front, index 0.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::contiguous::RingBuffer;
    /// let mut ring = RingBuffer::<u8>::new(3);
    /// for i in 0..5 {
    ///     ring.push_back(&i);
    /// }
    /// let last = ring.back().unwrap();
    /// assert_eq!(ring.index_of(last), Some(2));
    /// assert_eq!(ring.index_of(&4), None);
    /// ```
    pub fn index_of(&self, element: &T) -> Option<usize> {
        let slot = self.arr.index_of_ptr(element)?;
        if size_of::<T>() == 0 {
            return (!self.is_empty()).then_some(0);
        }

        let index = (slot + self.cap() - self.front) % self.cap();
        (index < self.len).then_some(index)
    }

    /// Returns a reference to the oldest element, if there is one.
    pub fn front(&self) -> Option<&T> {
        self.element_at(0).ok()
    }

    /// Returns a reference to the newest element, if there is one.
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.element_at(last).ok())
    }

    /// Destroys every element. The front is reset and all slots remain allocated.
    pub fn clear(&mut self) {
        while self.len > 0 {
            self.len -= 1;
            // SAFETY: As in pop_back, the slot is initialized and no longer counted.
            let value = unsafe { self.arr.slot(self.physical(self.len)).read() };
            self.destroy(value);
        }
        self.front = 0;
    }

    /// Returns an iterator over the elements from oldest to newest. Use
    /// [`rev`](Iterator::rev) to iterate from newest to oldest.
    pub fn iter(&self) -> Iter<'_, T, D> {
        self.into_iter()
    }

    /// Returns an iterator over mutable references to the elements from oldest to newest.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, D> {
        self.into_iter()
    }
}

impl<T, D: Descriptor<T>> RingBuffer<T, D> {
    /// Maps a logical offset from the front to a physical slot.
    pub(crate) const fn physical(&self, index: usize) -> usize {
        let slot = self.front + index;
        if slot >= self.cap() { slot - self.cap() } else { slot }
    }

    pub(crate) const fn check_index(&self, index: usize) -> Result<(), IndexOutOfBounds> {
        if index < self.len {
            Ok(())
        } else {
            Err(IndexOutOfBounds { index, len: self.len })
        }
    }

    fn destroy(&self, mut value: T) {
        self.desc.dtor(&mut value);
    }
}

impl<T, D: Descriptor<T>> Drop for RingBuffer<T, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, D: Descriptor<T>> Index<usize> for RingBuffer<T, D> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.element_at(index).throw()
    }
}

impl<T, D: Descriptor<T>> IndexMut<usize> for RingBuffer<T, D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.element_at_mut(index).throw()
    }
}

// SAFETY: RingBuffer uniquely owns its elements, so it is Send when its elements and descriptor
// are.
unsafe impl<T: Send, D: Descriptor<T> + Send> Send for RingBuffer<T, D> {}
// SAFETY: RingBuffer's safe API obeys all rules of the borrow checker.
unsafe impl<T: Sync, D: Descriptor<T> + Sync> Sync for RingBuffer<T, D> {}

impl<T, D: Descriptor<T> + Clone> Clone for RingBuffer<T, D> {
    fn clone(&self) -> Self {
        let mut ring = RingBuffer::with_descriptor(self.cap(), self.desc.clone());
        for value in self.iter() {
            ring.push_back(value);
        }
        ring
    }
}

impl<T: PartialEq, D: Descriptor<T>> PartialEq for RingBuffer<T, D> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, D: Descriptor<T>> Eq for RingBuffer<T, D> {}

impl<T: Debug, D: Descriptor<T>> Debug for RingBuffer<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("contents", &self.iter())
            .field("front", &self.front)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug, D: Descriptor<T>> Display for RingBuffer<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

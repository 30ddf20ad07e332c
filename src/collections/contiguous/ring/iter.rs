use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use super::RingBuffer;
use crate::collections::descriptor::Descriptor;

impl<'a, T, D: Descriptor<T>> IntoIterator for &'a RingBuffer<T, D> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T, D>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            ring: self,
            head: 0,
            tail: self.len,
        }
    }
}

/// A type for borrowed iteration over a [`RingBuffer`], from oldest to newest. Produces values of
/// type `&T`.
///
/// See [`RingBuffer::iter`].
pub struct Iter<'a, T, D: Descriptor<T>> {
    pub(crate) ring: &'a RingBuffer<T, D>,
    // Logical bounds of the elements left to yield: head..tail.
    pub(crate) head: usize,
    pub(crate) tail: usize,
}

impl<'a, T, D: Descriptor<T>> Iterator for Iter<'a, T, D> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }

        let value = self.ring.element_at(self.head).ok();
        self.head += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a, T, D: Descriptor<T>> DoubleEndedIterator for Iter<'a, T, D> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }

        self.tail -= 1;
        self.ring.element_at(self.tail).ok()
    }
}

impl<'a, T, D: Descriptor<T>> ExactSizeIterator for Iter<'a, T, D> {
    fn len(&self) -> usize {
        self.tail - self.head
    }
}

impl<'a, T, D: Descriptor<T>> FusedIterator for Iter<'a, T, D> {}

impl<'a, T, D: Descriptor<T>> Clone for Iter<'a, T, D> {
    fn clone(&self) -> Self {
        Iter {
            ring: self.ring,
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<'a, T: Debug, D: Descriptor<T>> Debug for Iter<'a, T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T, D: Descriptor<T>> IntoIterator for &'a mut RingBuffer<T, D> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T, D>;

    fn into_iter(self) -> Self::IntoIter {
        IterMut {
            ptr: self.arr.ptr,
            cap: self.cap(),
            front: self.front,
            head: 0,
            tail: self.len,
            _phantom: PhantomData,
        }
    }
}

/// A type for mutable iteration over a [`RingBuffer`], from oldest to newest. Produces values of
/// type `&mut T`.
///
/// See [`RingBuffer::iter_mut`].
pub struct IterMut<'a, T, D: Descriptor<T>> {
    // The ring itself can't be held here without aliasing the references already yielded, so the
    // fields needed to locate slots are copied out instead.
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    pub(crate) front: usize,
    pub(crate) head: usize,
    pub(crate) tail: usize,
    pub(crate) _phantom: PhantomData<&'a mut RingBuffer<T, D>>,
}

impl<'a, T, D: Descriptor<T>> IterMut<'a, T, D> {
    /// Returns a mutable reference to the element at logical `index`.
    ///
    /// # Safety
    /// `index` must be less than the ring's length and must not have been yielded before.
    unsafe fn element(&mut self, index: usize) -> &'a mut T {
        let slot = (self.front + index) % self.cap;
        // SAFETY: The caller guarantees that the slot is initialized and not aliased, and the
        // ring is mutably borrowed for 'a.
        unsafe { &mut *self.ptr.as_ptr().add(slot) }
    }
}

impl<'a, T, D: Descriptor<T>> Iterator for IterMut<'a, T, D> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }

        let index = self.head;
        self.head += 1;
        // SAFETY: index < tail <= len, and head only moves forward past it.
        Some(unsafe { self.element(index) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a, T, D: Descriptor<T>> DoubleEndedIterator for IterMut<'a, T, D> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail {
            return None;
        }

        self.tail -= 1;
        let index = self.tail;
        // SAFETY: head <= index < len, and tail only moves backward past it.
        Some(unsafe { self.element(index) })
    }
}

impl<'a, T, D: Descriptor<T>> ExactSizeIterator for IterMut<'a, T, D> {
    fn len(&self) -> usize {
        self.tail - self.head
    }
}

impl<'a, T, D: Descriptor<T>> FusedIterator for IterMut<'a, T, D> {}

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::util::error::{AllocFailed, CapacityOverflow, ReserveError};

/// A fixed number of heap slots for values of type `T`, none of which are assumed to be
/// initialized. This is the storage underneath both
/// [`DynamicArray`](super::DynamicArray) and [`RingBuffer`](super::RingBuffer).
///
/// RawArray only manages the allocation itself. Dropping it deallocates without dropping any
/// values; the owning collection is responsible for tracking which slots are initialized and
/// destroying them first.
pub(crate) struct RawArray<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) size: usize,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T> RawArray<T> {
    /// Creates a RawArray with no slots. Nothing is allocated.
    pub(crate) const fn new() -> RawArray<T> {
        RawArray {
            ptr: NonNull::dangling(),
            size: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates a RawArray with exactly `size` uninitialized slots.
    ///
    /// # Panics
    /// Panics if memory layout size exceeds [`isize::MAX`].
    pub(crate) fn with_size(size: usize) -> RawArray<T> {
        let mut arr = RawArray::new();
        arr.realloc(size);
        arr
    }

    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Returns a raw pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must be no greater than the size of the RawArray.
    pub(crate) const unsafe fn slot(&self, index: usize) -> *mut T {
        // SAFETY: The caller guarantees that index is within (or one past the end of) the
        // allocation, which never exceeds isize::MAX bytes.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Maps a pointer back to the index of the slot it points at, if it points at the start of one
    /// of this RawArray's slots.
    pub(crate) fn index_of_ptr(&self, element: *const T) -> Option<usize> {
        if self.size == 0 {
            return None;
        }

        let start = self.ptr.as_ptr() as usize;
        let offset = (element as usize).checked_sub(start)?;

        // Every zero-sized value lives at the same address.
        if size_of::<T>() == 0 {
            return (offset == 0).then_some(0);
        }

        if offset % size_of::<T>() != 0 {
            return None;
        }

        let index = offset / size_of::<T>();
        (index < self.size).then_some(index)
    }

    /// Reallocates with exactly `new_size` slots, keeping the contents of the first
    /// `min(size, new_size)` slots. Slots past `new_size` are discarded without being dropped.
    ///
    /// On failure, the RawArray is left exactly as it was.
    pub(crate) fn try_realloc(&mut self, new_size: usize) -> Result<(), ReserveError> {
        if new_size == self.size {
            return Ok(());
        }

        let new_layout = Self::make_layout(new_size)?;

        let new_ptr = match (self.size, new_size) {
            _ if size_of::<T>() == 0 => {
                // Zero-sized types never need an allocation, only the dangling pointer.
                self.ptr
            },
            (0, _) => Self::make_ptr(new_layout)?,
            (_, 0) => {
                // SAFETY: self.size is non-zero and T isn't zero-sized, so ptr was allocated in
                // the global allocator with this exact layout.
                unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), self.current_layout()) }
                NonNull::dangling()
            },
            (_, _) => {
                // SAFETY: The same layout and allocator are used for the allocation, and the new
                // layout size is > 0 and <= isize::MAX.
                let raw_ptr: *mut T = unsafe {
                    alloc::realloc(
                        self.ptr.as_ptr().cast(),
                        self.current_layout(),
                        new_layout.size(),
                    ).cast()
                };

                // A failed realloc leaves the old allocation untouched.
                NonNull::new(raw_ptr).ok_or(AllocFailed { size: new_layout.size() })?
            },
        };

        self.ptr = new_ptr;
        self.size = new_size;
        Ok(())
    }

    /// Reallocates with exactly `new_size` slots, see [`RawArray::try_realloc`].
    ///
    /// # Panics
    /// Panics if the memory layout of the new allocation would have a size that exceeds
    /// [`isize::MAX`]. Allocation failure is reported through [`alloc::handle_alloc_error`].
    pub(crate) fn realloc(&mut self, new_size: usize) {
        match self.try_realloc(new_size) {
            Ok(()) => {},
            Err(ReserveError::CapacityOverflow(err)) => panic!("{}", err),
            Err(ReserveError::AllocFailed(err)) => match Self::make_layout(new_size) {
                Ok(layout) => alloc::handle_alloc_error(layout),
                Err(_) => panic!("{}", err),
            },
        }
    }

    /// A helper function to create a [`Layout`] for `size` elements of type `T`.
    pub(crate) fn make_layout(size: usize) -> Result<Layout, CapacityOverflow> {
        Layout::array::<T>(size).map_err(|_| CapacityOverflow)
    }

    /// A helper function to allocate a [`NonNull`] for the provided non-zero-sized [`Layout`].
    fn make_ptr(layout: Layout) -> Result<NonNull<T>, AllocFailed> {
        NonNull::new(
            // SAFETY: Zero-sized layouts are guarded against by the caller.
            unsafe { alloc::alloc(layout).cast() }
        ).ok_or(AllocFailed { size: layout.size() })
    }

    fn current_layout(&self) -> Layout {
        // SAFETY: The current size was validated by make_layout when it was allocated.
        unsafe {
            Layout::from_size_align_unchecked(size_of::<T>() * self.size, align_of::<T>())
        }
    }
}

impl<T> Default for RawArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawArray<T> {
    fn drop(&mut self) {
        let layout = self.current_layout();

        if layout.size() != 0 {
            // SAFETY: ptr is always allocated in the global allocator and layout is the same as
            // when allocated. Zero-sized layouts aren't allocated and are guarded against
            // deallocation.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

// SAFETY: RawArray uniquely owns its allocation, so it is Send when T is.
unsafe impl<T: Send> Send for RawArray<T> {}
// SAFETY: RawArray exposes no interior mutability through shared references.
unsafe impl<T: Sync> Sync for RawArray<T> {}

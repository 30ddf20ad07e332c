use std::hint;

pub(crate) trait OptionExtension<T> {
    /// Unwraps a value whose absence would mean a broken internal invariant, such as a link in a
    /// chain pointing at a vacant slot.
    ///
    /// Debug builds panic with [`unreachable!`] in the none branch, release builds use
    /// [`unreachable_unchecked`](hint::unreachable_unchecked).
    ///
    /// # Safety
    /// The caller must guarantee that `self` is [`Some`].
    unsafe fn unreachable(self) -> T;
}

impl<T> OptionExtension<T> for Option<T> {
    unsafe fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None if cfg!(debug_assertions) => unreachable!(),
            // SAFETY: The caller guarantees that None is impossible.
            None => unsafe { hint::unreachable_unchecked() },
        }
    }
}

use std::slice::{Iter, IterMut};

use super::DynamicArray;
use crate::collections::descriptor::Descriptor;

impl<'a, T, D: Descriptor<T>> IntoIterator for &'a DynamicArray<T, D> {
    type Item = &'a T;

    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, D: Descriptor<T>> IntoIterator for &'a mut DynamicArray<T, D> {
    type Item = &'a mut T;

    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

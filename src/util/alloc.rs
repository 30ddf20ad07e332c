use std::cell::RefCell;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::collections::descriptor::Descriptor;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

#[derive(Debug, Clone)]
pub struct CountedDrop(pub Rc<RefCell<usize>>);

impl CountedDrop {
    pub fn new(value: usize) -> CountedDrop {
        CountedDrop(Rc::new(RefCell::new(value)))
    }
}

impl Default for CountedDrop {
    fn default() -> Self {
        CountedDrop::new(0)
    }
}

impl Deref for CountedDrop {
    type Target = Rc<RefCell<usize>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CountedDrop {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Drop for CountedDrop {
    fn drop(&mut self) {
        self.0.replace_with(|v| *v + 1);
    }
}

/// A descriptor that counts every hook invocation, shared between all of its clones.
#[derive(Debug, Clone, Default)]
pub struct CountingDescriptor {
    pub inits: Rc<RefCell<usize>>,
    pub copies: Rc<RefCell<usize>>,
    pub dtors: Rc<RefCell<usize>>,
}

impl CountingDescriptor {
    pub fn inits(&self) -> usize {
        *self.inits.borrow()
    }

    pub fn copies(&self) -> usize {
        *self.copies.borrow()
    }

    pub fn dtors(&self) -> usize {
        *self.dtors.borrow()
    }

    /// The number of values produced by this descriptor which haven't been destroyed yet.
    pub fn live(&self) -> usize {
        self.inits() + self.copies() - self.dtors()
    }
}

impl<T: Default + Clone> Descriptor<T> for CountingDescriptor {
    fn init(&self) -> T {
        self.inits.replace_with(|v| *v + 1);
        T::default()
    }

    fn copy(&self, src: &T) -> T {
        self.copies.replace_with(|v| *v + 1);
        src.clone()
    }

    fn dtor(&self, _value: &mut T) {
        self.dtors.replace_with(|v| *v + 1);
    }
}

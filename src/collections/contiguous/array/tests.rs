#![cfg(test)]

use std::hash::{BuildHasher, RandomState};

use proptest::prelude::*;

use super::*;
use crate::collections::descriptor::{Descriptor, Icd};
use crate::util::alloc::{CountedDrop, CountingDescriptor, ZeroSizedType};
use crate::util::error::{EmptyCollection, IndexOutOfBounds, RangeOutOfBounds};
use crate::util::panic::assert_panics;

fn int_cmp(a: &i32, b: &i32) -> std::cmp::Ordering {
    a.cmp(b)
}

#[test]
fn test_push_pop_insert_erase() {
    let mut arr = DynamicArray::<i32>::new();
    for i in 0..10 {
        arr.push_back(&i);
    }
    assert_eq!(&*arr, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    for _ in 0..5 {
        arr.pop_back().unwrap();
    }
    assert_eq!(&*arr, &[0, 1, 2, 3, 4], "pop_back should remove from the end.");

    arr.insert(&100, 2).unwrap();
    assert_eq!(&*arr, &[0, 1, 100, 2, 3, 4]);

    for value in [200, 300, 400] {
        arr.insert(&value, 3).unwrap();
    }
    assert_eq!(&*arr, &[0, 1, 100, 400, 300, 200, 2, 3, 4]);

    arr.erase(3, 1).unwrap();
    assert_eq!(&*arr, &[0, 1, 100, 300, 200, 2, 3, 4]);

    arr.erase(3, 3).unwrap();
    assert_eq!(&*arr, &[0, 1, 100, 3, 4]);

    arr.sort(int_cmp);
    assert_eq!(&*arr, &[0, 1, 3, 4, 100]);

    let found = arr.find(&100, int_cmp);
    assert_eq!(found, Some(4));
    assert_eq!(arr.index_of(&arr[4]), found, "index_of should map a reference to its index.");
    assert_eq!(arr.find(&1000, int_cmp), None);

    for (i, value) in [0, 1, 3, 4, 100].into_iter().enumerate() {
        assert_eq!(arr.element_at(i), Ok(&value));
    }
}

#[test]
fn test_errors() {
    let mut arr = DynamicArray::<u8>::new();
    assert_eq!(arr.pop_back(), Err(EmptyCollection));
    assert_eq!(arr.element_at(0), Err(IndexOutOfBounds { index: 0, len: 0 }));
    assert_eq!(arr.insert(&1, 1), Err(IndexOutOfBounds { index: 1, len: 0 }));

    arr.insert(&1, 0).expect("Inserting at the length should append.");
    assert_eq!(arr.erase(0, 2), Err(RangeOutOfBounds { start: 0, count: 2, len: 1 }));
    assert_eq!(
        arr.erase(usize::MAX, 2),
        Err(RangeOutOfBounds { start: usize::MAX, count: 2, len: 1 }),
        "An overflowing range should be rejected rather than wrapping."
    );
    assert_eq!(arr.erase(1, 0), Ok(()), "An empty range at the end is valid.");
    assert_eq!(&*arr, &[1]);

    assert_panics!({
        let arr = DynamicArray::<u8>::new();
        let _value = arr[0];
    });
}

#[test]
fn test_growth() {
    let mut arr = DynamicArray::<usize>::new();
    assert_eq!(arr.cap(), 0);

    arr.push_back(&0);
    assert_eq!(arr.cap(), 2, "The first growth should allocate the minimum capacity.");

    for i in 1..9 {
        arr.push_back(&i);
    }
    assert_eq!(arr.cap(), 16, "Capacity should double each time it runs out.");

    arr.clear();
    assert!(arr.is_empty());
    assert_eq!(arr.cap(), 16, "Clearing shouldn't release capacity.");
    assert_eq!(arr.iter().count(), 0);
}

#[test]
fn test_try_reserve_failure_keeps_state() {
    let mut arr = DynamicArray::<u64>::from_slice(&[1, 2, 3]);
    let cap = arr.cap();

    assert!(arr.try_reserve(usize::MAX).unwrap_err().is_capacity_overflow());
    assert!(arr.try_reserve(isize::MAX as usize).unwrap_err().is_capacity_overflow());
    assert_eq!(arr.cap(), cap);
    assert_eq!(&*arr, &[1, 2, 3], "A failed reservation shouldn't touch the contents.");

    assert_panics!({
        let mut arr = DynamicArray::<u64>::new();
        arr.reserve(usize::MAX);
    });
}

#[test]
fn test_insert_all_and_concat() {
    let mut arr = DynamicArray::<i32>::from_slice(&[1, 2, 3]);
    let other = DynamicArray::<i32>::from_slice(&[7, 8]);

    arr.insert_all(&other, 0).unwrap();
    assert_eq!(&*arr, &[7, 8, 1, 2, 3]);

    arr.concat(&other);
    assert_eq!(&*arr, &[7, 8, 1, 2, 3, 7, 8]);

    assert!(arr.insert_all(&other, 8).is_err());
    arr.insert_all(&[], 3).unwrap();
    assert_eq!(arr.len(), 7);
}

#[test]
fn test_resize_and_extend_back() {
    let icd = Icd::<u8> {
        init: Some(|| 9),
        ..Icd::default()
    };
    let mut arr = DynamicArray::<u8, _>::with_descriptor(icd);
    arr.push_back(&1);

    *arr.extend_back() += 1;
    assert_eq!(&*arr, &[1, 10]);

    arr.resize(4);
    assert_eq!(&*arr, &[1, 10, 9, 9]);

    arr.resize(1);
    assert_eq!(&*arr, &[1]);
}

#[test]
fn test_element_size() {
    struct Packed;

    impl Descriptor<u32> for Packed {
        fn element_size(&self) -> usize {
            3
        }

        fn init(&self) -> u32 {
            0
        }

        fn copy(&self, src: &u32) -> u32 {
            *src & 0xFF_FFFF
        }
    }

    assert_eq!(DynamicArray::<u64>::new().element_size(), 8);
    assert_eq!(DynamicArray::<ZeroSizedType>::new().element_size(), 0);
    assert_eq!(DynamicArray::<u16, _>::with_descriptor(Icd::<u16>::default()).element_size(), 2);

    let mut arr = DynamicArray::<u32, _>::with_descriptor(Packed);
    arr.push_back(&0x0102_0304);
    assert_eq!(arr.element_size(), 3, "The descriptor's size should be reported.");
    assert_eq!(&*arr, &[0x02_0304]);
}

#[test]
fn test_descriptor_lifecycle() {
    let desc = CountingDescriptor::default();
    let mut arr = DynamicArray::<String, _>::with_descriptor(desc.clone());

    for word in ["a", "b", "c", "d", "e"] {
        arr.push_back(&word.to_owned());
    }
    arr.extend_back();
    assert_eq!(desc.copies(), 5);
    assert_eq!(desc.inits(), 1);

    arr.pop_back().unwrap();
    arr.erase(0, 2).unwrap();
    assert_eq!(desc.dtors(), 3);
    assert_eq!(desc.live(), arr.len());

    let copy = arr.clone();
    assert_eq!(desc.copies(), 8, "Cloning should copy through the descriptor.");

    drop(arr);
    drop(copy);
    assert_eq!(desc.live(), 0, "Every produced value should be destroyed exactly once.");
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new(0);
    let mut arr = DynamicArray::<CountedDrop>::new();
    for _ in 0..10 {
        arr.push_back(&counter);
    }

    arr.erase(2, 3).unwrap();
    assert_eq!(counter.take(), 3, "Erasing should drop the erased elements.");

    drop(arr);
    assert_eq!(counter.take(), 7, "The remaining elements should be dropped.");
}

#[test]
fn test_zst_support() {
    let mut arr = DynamicArray::<ZeroSizedType>::new();
    for _ in 0..5 {
        arr.push_back(&ZeroSizedType);
    }
    arr.insert(&ZeroSizedType, 2).unwrap();
    arr.erase(0, 3).unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.element_at(2), Ok(&ZeroSizedType));
    assert_eq!(arr.index_of(&arr[1]), Some(0), "All zero-sized elements share one address.");
}

#[test]
fn test_equality_and_hash() {
    let arr = DynamicArray::<usize>::from_slice(&[0, 1, 2]);
    let mut other = DynamicArray::<usize>::new();
    other.extend(&[0, 1, 2]);

    assert_eq!(arr, other);

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&arr),
        state.hash_one([0_usize, 1, 2].as_slice()),
        "Hashing should match the equivalent slice."
    );
}

#[test]
fn test_find_edge_cases() {
    let empty = DynamicArray::<i32>::new();
    assert_eq!(empty.find(&1, int_cmp), None);

    let single = DynamicArray::<i32>::from_slice(&[4]);
    assert_eq!(single.find(&4, int_cmp), Some(0));
    assert_eq!(single.find(&5, int_cmp), None);

    let mut dups = DynamicArray::<i32>::from_slice(&[3, 1, 3, 2, 3]);
    dups.sort(int_cmp);
    let index = dups.find(&3, int_cmp).expect("A duplicated value should be found.");
    assert_eq!(dups[index], 3);
}

proptest! {
    #[test]
    fn test_push_pop_model(ops in prop::collection::vec(prop::option::of(any::<i32>()), 0..64)) {
        let mut arr = DynamicArray::<i32>::new();
        let mut model = Vec::new();

        for op in ops {
            match op {
                Some(value) => {
                    arr.push_back(&value);
                    model.push(value);
                },
                None => {
                    prop_assert_eq!(arr.pop_back().is_ok(), model.pop().is_some());
                },
            }
        }

        prop_assert_eq!(arr.len(), model.len());
        prop_assert_eq!(&*arr, model.as_slice());
        prop_assert!(arr.cap() >= arr.len());
    }

    #[test]
    fn test_insert_then_element_at(
        values in prop::collection::vec(any::<i32>(), 0..32),
        value in any::<i32>(),
        seed in any::<usize>(),
    ) {
        let mut arr = DynamicArray::<i32>::from_slice(&values);
        let index = seed % (values.len() + 1);

        arr.insert(&value, index).unwrap();
        prop_assert_eq!(arr.element_at(index), Ok(&value));

        let next = arr.get(index + 1).copied();
        arr.erase(index, 1).unwrap();
        prop_assert_eq!(arr.element_at(index).ok().copied(), next);
        prop_assert_eq!(&*arr, values.as_slice());
    }

    #[test]
    fn test_sort_then_find(values in prop::collection::vec(-50_i32..50, 0..32), probe in -60_i32..60) {
        let mut arr = DynamicArray::<i32>::from_slice(&values);
        arr.sort(int_cmp);

        prop_assert!(arr.windows(2).all(|w| w[0] <= w[1]));
        match arr.find(&probe, int_cmp) {
            Some(index) => prop_assert_eq!(arr[index], probe),
            None => prop_assert!(!values.contains(&probe)),
        }
    }
}

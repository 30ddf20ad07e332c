#![cfg(test)]

use std::hash::BuildHasher;

use proptest::prelude::*;

use super::*;
use crate::util::error::DuplicateKey;
use crate::util::hash::{BadHasherBuilder, ManualHash};

#[derive(Debug)]
struct User {
    id: u32,
    name: String,
}

impl Keyed for User {
    type Key = u32;

    fn key(&self) -> &u32 {
        &self.id
    }
}

#[derive(Debug)]
struct Named {
    name: String,
    rank: u8,
}

impl Keyed for Named {
    type Key = String;

    fn key(&self) -> &String {
        &self.name
    }
}

#[derive(Debug, PartialEq)]
struct Num(u32);

impl Keyed for Num {
    type Key = u32;

    fn key(&self) -> &u32 {
        &self.0
    }
}

fn users(count: u32) -> Vec<User> {
    (0..count)
        .map(|id| User {
            id,
            name: format!("user {id}"),
        })
        .collect()
}

fn ids<B: BuildHasher>(table: &HashTable<'_, User, B>) -> Vec<u32> {
    table.iter().map(|u| u.id).collect()
}

#[test]
fn test_users() {
    let users = users(10);
    let mut table = HashTable::<User>::new();
    for user in &users {
        table.add(user).unwrap();
    }
    assert_eq!(table.count(), 10);

    assert_eq!(table.find(&3).map(|u| u.name.as_str()), Some("user 3"));
    assert!(table.find(&10).is_none());

    let deleted = table.delete(&users[3]).expect("A linked record should be deleted.");
    assert!(std::ptr::eq(deleted, &users[3]), "Delete should hand back the same record.");
    assert!(table.find(&3).is_none());
    assert!(table.delete(&users[3]).is_none(), "A record can only be deleted once.");
    assert_eq!(table.count(), 9);
    assert_eq!(users[3].name, "user 3", "The record itself should be untouched.");

    assert_eq!(table.remove(&7).map(|u| u.id), Some(7));
    assert_eq!(ids(&table), [0, 1, 2, 4, 5, 6, 8, 9]);

    table.sort(|a, b| b.id.cmp(&a.id));
    assert_eq!(ids(&table), [9, 8, 6, 5, 4, 2, 1, 0]);
    assert_eq!(table.find(&4).map(|u| u.id), Some(4), "Sorting shouldn't affect lookups.");

    let mut cursor = table.cursor_front();
    while let Some(user) = cursor.current() {
        if user.id % 2 == 0 {
            cursor.remove_current();
        } else {
            cursor.move_next();
        }
    }
    assert_eq!(ids(&table), [9, 5, 1]);

    let drained = table.drain().map(|u| u.id).collect::<Vec<_>>();
    assert_eq!(drained, [9, 5, 1]);
    assert!(table.is_empty());
    assert_eq!(table.iter().next().map(|u| u.id), None);
}

#[test]
fn test_duplicate_keys() {
    let first = User { id: 1, name: "first".into() };
    let second = User { id: 1, name: "second".into() };
    let other = User { id: 2, name: "other".into() };
    let third = User { id: 3, name: "third".into() };

    let mut table = HashTable::<User>::new();
    table.add(&first).unwrap();
    table.add(&other).unwrap();

    assert_eq!(table.add(&second), Err(DuplicateKey));
    assert_eq!(table.count(), 2, "A rejected add should leave the table unchanged.");
    assert_eq!(table.find(&1).map(|u| u.name.as_str()), Some("first"));

    assert!(
        table.delete(&second).is_none(),
        "Delete should compare identity, not just keys."
    );

    let replaced = table.replace(&second).expect("The old record should be returned.");
    assert!(std::ptr::eq(replaced, &first));
    assert_eq!(
        table.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        ["second", "other"],
        "A replacement should take the old record's place."
    );

    assert!(table.replace(&third).is_none());
    assert_eq!(ids(&table), [1, 2, 3]);
}

#[test]
fn test_borrowed_lookup() {
    let records = [
        Named { name: "beta".into(), rank: 2 },
        Named { name: "alpha".into(), rank: 1 },
    ];
    let mut table = HashTable::<Named>::new();
    for record in &records {
        table.add(record).unwrap();
    }

    assert_eq!(table.find("alpha").map(|r| r.rank), Some(1));
    assert!(table.contains("beta"));
    assert!(!table.contains("gamma"));
    assert_eq!(table.remove("beta").map(|r| r.rank), Some(2));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_hash_collisions() {
    let records = [
        ManualHash::new(0, "zero"),
        ManualHash::new(0, "one"),
        ManualHash::new(2, "two"),
        ManualHash::new(0, "three"),
        ManualHash::new(2, "four"),
        ManualHash::new(1, "five"),
    ];
    let mut table = HashTable::with_hasher(BadHasherBuilder);
    for record in &records {
        table.add(record).unwrap();
    }

    assert!(table.remove(&ManualHash::new(0, "zero")).is_some());
    assert!(table.remove(&ManualHash::new(2, "two")).is_some());

    assert_eq!(
        table.iter().map(|r| *r.value()).collect::<Vec<_>>(),
        ["one", "three", "four", "five"],
        "No records should be lost from a shared chain during removal."
    );
    for value in ["one", "three", "four", "five"] {
        assert!(table.iter().any(|r| *r.value() == value));
    }
    assert_eq!(table.find(&ManualHash::new(0, "three")).map(|r| *r.value()), Some("three"));
    assert!(table.find(&ManualHash::new(0, "six")).is_none());
    assert!(
        table.find(&ManualHash::new(1, "one")).is_none(),
        "Equal values with a different hash shouldn't match."
    );

    let impostor = ManualHash::new(0, "one");
    assert!(table.delete(&impostor).is_none());
    assert!(table.delete(&records[1]).is_some());
    assert!(table.find(&ManualHash::new(0, "three")).is_some());
}

#[test]
fn test_growth_preserves_order() {
    let nums = (0..1000).map(Num).collect::<Vec<_>>();
    let mut table = HashTable::<Num>::new();
    assert_eq!(table.bucket_count(), 32);

    for num in &nums[..320] {
        table.add(num).unwrap();
    }
    assert_eq!(table.bucket_count(), 32, "An average chain of 10 shouldn't cause growth.");

    table.add(&nums[320]).unwrap();
    assert_eq!(table.bucket_count(), 64);

    for num in &nums[321..] {
        table.add(num).unwrap();
    }
    assert_eq!(table.bucket_count(), 128);
    assert!(table.iter().eq(nums.iter()), "Growing should keep the insertion order.");
    for i in 0..1000_u32 {
        assert_eq!(table.find(&i), Some(&nums[i as usize]));
    }

    table.clear();
    assert!(table.is_empty());
    assert_eq!(table.bucket_count(), 128, "Clearing should keep the buckets.");
    table.add(&nums[5]).unwrap();
    assert_eq!(table.iter().collect::<Vec<_>>(), [&nums[5]]);
}

#[test]
fn test_bucket_sizes() {
    assert_eq!(HashTable::<Num>::with_buckets(5).bucket_count(), 8);
    assert_eq!(HashTable::<Num>::with_buckets(0).bucket_count(), 1);
    assert_eq!(HashTable::<Num>::with_buckets(64).bucket_count(), 64);

    let nums = (0..50).map(Num).collect::<Vec<_>>();
    let mut table = HashTable::<Num>::with_buckets(1);
    for num in &nums {
        table.add(num).unwrap();
    }
    assert_eq!(table.bucket_count(), 8);
    assert!(nums.iter().all(|n| table.contains(&n.0)));
}

#[test]
fn test_slot_reuse() {
    let nums = (0..8).map(Num).collect::<Vec<_>>();
    let mut table = HashTable::<Num>::new();
    for num in &nums[..6] {
        table.add(num).unwrap();
    }

    table.remove(&1).unwrap();
    table.remove(&4).unwrap();
    table.add(&nums[6]).unwrap();
    table.add(&nums[7]).unwrap();

    assert_eq!(table.slots.len(), 6, "Vacated slots should be reused.");
    assert_eq!(
        table.iter().map(|n| n.0).collect::<Vec<_>>(),
        [0, 2, 3, 5, 6, 7],
        "Reused slots should still follow insertion order."
    );
}

#[test]
fn test_stable_sort() {
    let records = [(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')]
        .map(|(rank, name)| Named { name: name.to_string(), rank });
    let mut table = HashTable::<Named>::new();
    for record in &records {
        table.add(record).unwrap();
    }

    table.sort(|a, b| a.rank.cmp(&b.rank));
    assert_eq!(
        table.iter().map(|r| r.name.as_str()).collect::<String>(),
        "bdace",
        "Records that compare equal should keep their relative order."
    );
    assert_eq!(
        table.iter().rev().map(|r| r.name.as_str()).collect::<String>(),
        "ecadb",
        "The reverse links should be rebuilt as well."
    );
}

#[test]
fn test_retain_and_drain() {
    let nums = (0..10).map(Num).collect::<Vec<_>>();
    let mut table = HashTable::<Num>::new();
    for num in &nums {
        table.add(num).unwrap();
    }

    table.retain(|n| n.0 % 3 != 0);
    assert_eq!(table.iter().map(|n| n.0).collect::<Vec<_>>(), [1, 2, 4, 5, 7, 8]);
    assert_eq!(table.count(), 6);

    let mut drain = table.drain();
    assert_eq!(drain.len(), 6);
    assert_eq!(drain.next(), Some(&nums[1]));
    drop(drain);
    assert!(table.is_empty(), "Dropping a drain should unlink the remaining records.");
    assert!(!table.contains(&2));
}

#[test]
fn test_iter_both_ends() {
    let nums = (0..5).map(Num).collect::<Vec<_>>();
    let mut table = HashTable::<Num>::new();
    for num in &nums {
        table.add(num).unwrap();
    }

    let mut iter = table.iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(&nums[0]));
    assert_eq!(iter.next_back(), Some(&nums[4]));
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.clone().count(), 3);
    assert_eq!(iter.rev().map(|n| n.0).collect::<Vec<_>>(), [3, 2, 1]);

    let mut cursor = table.cursor_front();
    assert_eq!(cursor.peek_next(), Some(&nums[1]));
    cursor.move_next().move_next();
    assert_eq!(cursor.current(), Some(&nums[2]));
    assert_eq!(cursor.remove_current(), Some(&nums[2]));
    assert_eq!(cursor.current(), Some(&nums[3]));
    assert_eq!(cursor.table().len(), 4);
}

#[test]
fn test_formatting() {
    let nums = [Num(1), Num(2)];
    let mut table = HashTable::<Num>::new();
    for num in &nums {
        table.add(num).unwrap();
    }

    assert_eq!(format!("{table}"), "#{Num(1), Num(2)}");
    assert!(format!("{table:?}").starts_with("HashTable { records: [Num(1), Num(2)], chains: ["));
}

proptest! {
    #[test]
    fn test_insertion_order_model(ops in prop::collection::vec((any::<bool>(), 0_u32..24), 0..96)) {
        let nums = (0..24).map(Num).collect::<Vec<_>>();
        let mut table = HashTable::<Num>::with_buckets(2);
        let mut model = Vec::<u32>::new();

        for (add, key) in ops {
            if add {
                let result = table.add(&nums[key as usize]);
                if model.contains(&key) {
                    prop_assert_eq!(result, Err(DuplicateKey));
                } else {
                    prop_assert_eq!(result, Ok(()));
                    model.push(key);
                }
            } else {
                let removed = table.remove(&key).map(|n| n.0);
                match model.iter().position(|k| *k == key) {
                    Some(position) => {
                        model.remove(position);
                        prop_assert_eq!(removed, Some(key));
                    },
                    None => prop_assert_eq!(removed, None),
                }
            }
        }

        prop_assert_eq!(table.count(), model.len());
        prop_assert_eq!(table.iter().map(|n| n.0).collect::<Vec<_>>(), model.clone());
        prop_assert!(table.iter().rev().map(|n| n.0).eq(model.iter().rev().copied()));
        for key in 0..24 {
            prop_assert_eq!(table.contains(&key), model.contains(&key));
        }
    }
}

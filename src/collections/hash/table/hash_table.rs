use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::ptr;

use super::{Cursor, Drain, Iter};
use crate::collections::contiguous::DynamicArray;
use crate::util::error::{CapacityOverflow, DuplicateKey};
use crate::util::fmt::{DebugRaw, DebugWith};
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

const INITIAL_BUCKETS: usize = 32;

const GROWTH_FACTOR: usize = 2;

/// The average chain length which, once passed, causes the bucket array to grow.
const MAX_CHAIN_LEN: usize = 10;

/// A record type which can be stored in a [`HashTable`], by exposing one of its fields (or
/// anything derived from it) as the key.
///
/// It is a logic error for a record's key to change while the record is linked into a table.
///
/// # Examples
/// ```
/// # use generic_containers::collections::hash::Keyed;
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl Keyed for User {
///     type Key = u32;
///
///     fn key(&self) -> &u32 {
///         &self.id
///     }
/// }
/// ```
pub trait Keyed {
    type Key: Hash + Eq + ?Sized;

    fn key(&self) -> &Self::Key;
}

/// An associative table over records owned by the caller, iterating in insertion order.
///
/// A HashTable never owns, copies or frees its records. It holds a shared reference to each one,
/// so the borrow checker guarantees that records outlive the table. Removing a record from the
/// table only unlinks it and hands the reference back.
///
/// Entries are chained into a power-of-two number of buckets, starting at 32. Once the average
/// chain length passes 10 the number of buckets doubles and every entry is rehashed from its cached
/// hash. Separately, every entry is linked into a chain in insertion order, which is what iteration
/// follows and what [`sort`](HashTable::sort) reorders.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of records in the HashTable.
///
/// | Method | Complexity |
/// |-|-|
/// | `add` | `O(1)`*, `O(n)` |
/// | `find` | `O(1)`* |
/// | `delete` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `count` | `O(1)` |
/// | `sort` | `O(n log n)` |
/// | `clear` | `O(n)` |
///
/// \* Collisions add time proportional to the length of the bucket's chain, which stays short on
/// average. `add` is `O(n)` when it causes the buckets to grow.
///
/// # Examples
/// ```
/// # use generic_containers::collections::hash::{HashTable, Keyed};
/// struct User {
///     id: u32,
///     name: &'static str,
/// }
///
/// impl Keyed for User {
///     type Key = u32;
///
///     fn key(&self) -> &u32 {
///         &self.id
///     }
/// }
///
/// let users = [User { id: 3, name: "Cat" }, User { id: 1, name: "Ann" }];
/// let mut table = HashTable::<User>::new();
/// for user in &users {
///     table.add(user).unwrap();
/// }
///
/// assert_eq!(table.find(&1).map(|u| u.name), Some("Ann"));
/// assert!(table.add(&users[0]).is_err());
/// assert_eq!(table.iter().map(|u| u.id).collect::<Vec<_>>(), [3, 1]);
/// ```
pub struct HashTable<'a, R: Keyed, B: BuildHasher = RandomState> {
    pub(crate) slots: DynamicArray<Slot<'a, R>>,
    pub(crate) buckets: DynamicArray<Link>,
    /// The most recently vacated slot, which is reused before the slots array grows.
    pub(crate) free: Link,
    pub(crate) head: Link,
    pub(crate) tail: Link,
    pub(crate) len: usize,
    pub(crate) hasher: B,
}

/// The index of another slot, or the end of a chain.
pub(crate) type Link = Option<usize>;

pub(crate) enum Slot<'a, R: Keyed> {
    Vacant { next_free: Link },
    Occupied(Entry<'a, R>),
}

pub(crate) struct Entry<'a, R: Keyed> {
    pub(crate) record: &'a R,
    pub(crate) hash: u64,
    pub(crate) bucket_next: Link,
    pub(crate) prev: Link,
    pub(crate) next: Link,
}

impl<'a, R: Keyed, B: BuildHasher + Default> HashTable<'a, R, B> {
    /// Creates an empty HashTable with 32 buckets and the default value for `B`.
    pub fn new() -> HashTable<'a, R, B> {
        HashTable::with_buckets_and_hasher(INITIAL_BUCKETS, B::default())
    }

    /// Creates an empty HashTable with at least `buckets` buckets, rounded up to a power of two.
    pub fn with_buckets(buckets: usize) -> HashTable<'a, R, B> {
        HashTable::with_buckets_and_hasher(buckets, B::default())
    }
}

impl<'a, R: Keyed, B: BuildHasher> HashTable<'a, R, B> {
    /// Creates an empty HashTable with 32 buckets and the provided `hasher`.
    pub fn with_hasher(hasher: B) -> HashTable<'a, R, B> {
        HashTable::with_buckets_and_hasher(INITIAL_BUCKETS, hasher)
    }

    /// Creates an empty HashTable with at least `buckets` buckets and the provided `hasher`.
    ///
    /// # Panics
    /// Panics if `buckets` can't be rounded up to a power of two.
    pub fn with_buckets_and_hasher(buckets: usize, hasher: B) -> HashTable<'a, R, B> {
        let size = buckets
            .max(1)
            .checked_next_power_of_two()
            .ok_or(CapacityOverflow)
            .throw();

        let mut bucket_arr = DynamicArray::<Link>::with_cap(size);
        bucket_arr.resize(size);

        HashTable {
            slots: DynamicArray::new(),
            buckets: bucket_arr,
            free: None,
            head: None,
            tail: None,
            len: 0,
            hasher,
        }
    }

    /// Returns the number of records in the HashTable.
    pub const fn count(&self) -> usize {
        self.len
    }

    /// Returns the number of records in the HashTable. Identical to [`count`](HashTable::count).
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashTable contains no records.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub const fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the hasher used by this HashTable.
    pub const fn hasher(&self) -> &B {
        &self.hasher
    }

    /// Links `record` into the HashTable, at the end of the insertion order.
    ///
    /// # Errors
    /// Returns [`DuplicateKey`] if a record with an equal key is already present, in which case the
    /// HashTable is left unchanged.
    pub fn add(&mut self, record: &'a R) -> Result<(), DuplicateKey> {
        let hash = self.hasher.hash_one(record.key());
        if self.find_index(record.key(), hash).is_some() {
            return Err(DuplicateKey);
        }

        self.link(record, hash);
        Ok(())
    }

    /// Links `record` into the HashTable, replacing any record with an equal key. The replaced
    /// record is returned and `record` takes its place in the insertion order. Otherwise, `record`
    /// is added at the end.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::hash::{HashTable, Keyed};
    /// struct Pair(&'static str, u32);
    ///
    /// impl Keyed for Pair {
    ///     type Key = str;
    ///
    ///     fn key(&self) -> &str {
    ///         self.0
    ///     }
    /// }
    ///
    /// let (a, b, a2) = (Pair("a", 1), Pair("b", 2), Pair("a", 3));
    /// let mut table = HashTable::<Pair>::new();
    /// table.add(&a).unwrap();
    /// table.add(&b).unwrap();
    ///
    /// assert_eq!(table.replace(&a2).map(|p| p.1), Some(1));
    /// assert_eq!(table.iter().map(|p| p.1).collect::<Vec<_>>(), [3, 2]);
    /// ```
    pub fn replace(&mut self, record: &'a R) -> Option<&'a R> {
        let hash = self.hasher.hash_one(record.key());
        match self.find_index(record.key(), hash) {
            Some(index) => {
                // The keys are equal, so the bucket and cached hash stay valid.
                let entry = self.entry_mut(index);
                Some(std::mem::replace(&mut entry.record, record))
            },
            None => {
                self.link(record, hash);
                None
            },
        }
    }

    /// Returns the record stored under `key`, or [`None`] if there isn't one.
    pub fn find<Q>(&self, key: &Q) -> Option<&'a R>
    where
        R::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key, self.hasher.hash_one(key))?;
        Some(self.entry(index).record)
    }

    /// Returns true if a record is stored under `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        R::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Unlinks `record` itself from the HashTable, comparing by address rather than key. Returns
    /// the unlinked reference, or [`None`] if `record` isn't in the HashTable.
    ///
    /// The record is never freed or modified.
    pub fn delete(&mut self, record: &R) -> Option<&'a R> {
        let hash = self.hasher.hash_one(record.key());
        let index = self.find_index_by(hash, |existing| ptr::eq(existing, record))?;
        Some(self.unlink(index))
    }

    /// Unlinks the record stored under `key` and returns it, or [`None`] if there isn't one.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<&'a R>
    where
        R::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key, self.hasher.hash_one(key))?;
        Some(self.unlink(index))
    }

    /// Reorders the insertion order of the HashTable according to `cmp`. The sort is stable, so
    /// records which compare equal keep their relative order. Buckets aren't affected.
    ///
    /// # Examples
    /// ```
    /// # use generic_containers::collections::hash::{HashTable, Keyed};
    /// # struct Id(u8);
    /// # impl Keyed for Id {
    /// #     type Key = u8;
    /// #     fn key(&self) -> &u8 { &self.0 }
    /// # }
    /// let ids = [Id(2), Id(9), Id(4)];
    /// let mut table = HashTable::<Id>::new();
    /// for id in &ids {
    ///     table.add(id).unwrap();
    /// }
    ///
    /// table.sort(|a, b| b.0.cmp(&a.0));
    /// assert_eq!(table.iter().map(|id| id.0).collect::<Vec<_>>(), [9, 4, 2]);
    /// ```
    pub fn sort<F: FnMut(&R, &R) -> Ordering>(&mut self, mut cmp: F) {
        let mut order = DynamicArray::<usize>::with_cap(self.len);
        let mut current = self.head;
        while let Some(index) = current {
            order.push_back(&index);
            current = self.entry(index).next;
        }

        let slots = &self.slots;
        order.sort(|a, b| cmp(slots[*a].entry().record, slots[*b].entry().record));

        for (position, &index) in order.iter().enumerate() {
            let prev = position.checked_sub(1).map(|p| order[p]);
            let next = order.get(position + 1).copied();

            let entry = self.entry_mut(index);
            entry.prev = prev;
            entry.next = next;
        }

        self.head = order.first().copied();
        self.tail = order.last().copied();
    }

    /// Unlinks every record for which `keep` returns false, in insertion order.
    pub fn retain<F: FnMut(&'a R) -> bool>(&mut self, mut keep: F) {
        let mut cursor = self.cursor_front();
        while let Some(record) = cursor.current() {
            if keep(record) {
                cursor.move_next();
            } else {
                cursor.remove_current();
            }
        }
    }

    /// Unlinks every record. The bucket array keeps its size.
    pub fn clear(&mut self) {
        self.slots.clear();
        for bucket in self.buckets.iter_mut() {
            *bucket = None;
        }
        self.free = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns an iterator over all records in insertion order.
    pub fn iter(&self) -> Iter<'_, 'a, R> {
        self.into_iter()
    }

    /// Returns a [`Cursor`] positioned on the first record in insertion order, which can unlink
    /// records as it goes.
    pub fn cursor_front(&mut self) -> Cursor<'_, 'a, R, B> {
        Cursor {
            current: self.head,
            table: self,
        }
    }

    /// Returns an iterator that unlinks and yields every record in insertion order. Any records
    /// not yet yielded when the iterator is dropped are unlinked as well.
    pub fn drain(&mut self) -> Drain<'_, 'a, R, B> {
        Drain { table: self }
    }
}

impl<'a, R: Keyed, B: BuildHasher> HashTable<'a, R, B> {
    pub(crate) fn entry(&self, index: usize) -> &Entry<'a, R> {
        self.slots[index].entry()
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> &mut Entry<'a, R> {
        self.slots[index].entry_mut()
    }

    pub(crate) const fn bucket_of(&self, hash: u64) -> usize {
        // The bucket count is always a power of two, so masking is equivalent to modulo.
        (hash as usize) & (self.buckets.len() - 1)
    }

    /// Finds the index of the entry with a key equal to `key`, which must hash to `hash`.
    pub(crate) fn find_index<Q>(&self, key: &Q, hash: u64) -> Option<usize>
    where
        R::Key: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.find_index_by(hash, |record| {
            let existing: &Q = record.key().borrow();
            existing == key
        })
    }

    /// Walks the chain of the bucket for `hash`, returning the first entry with that hash whose
    /// record satisfies `matches`.
    pub(crate) fn find_index_by<F: FnMut(&R) -> bool>(
        &self,
        hash: u64,
        mut matches: F,
    ) -> Option<usize> {
        let mut current = self.buckets[self.bucket_of(hash)];
        while let Some(index) = current {
            let entry = self.entry(index);
            if entry.hash == hash && matches(entry.record) {
                return Some(index);
            }
            current = entry.bucket_next;
        }
        None
    }

    /// Stores a new entry for `record`, linking it into both chains. The caller must have checked
    /// that no entry with an equal key exists.
    pub(crate) fn link(&mut self, record: &'a R, hash: u64) {
        let bucket = self.bucket_of(hash);
        let entry = Entry {
            record,
            hash,
            bucket_next: self.buckets[bucket],
            prev: self.tail,
            next: None,
        };

        let index = match self.free {
            Some(index) => {
                if let Slot::Vacant { next_free } = self.slots[index] {
                    self.free = next_free;
                }
                self.slots[index] = Slot::Occupied(entry);
                index
            },
            None => {
                self.slots.push_back(&Slot::Occupied(entry));
                self.slots.len() - 1
            },
        };

        self.buckets[bucket] = Some(index);
        match self.tail {
            Some(tail) => self.entry_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;

        if self.should_grow() {
            self.grow();
        }
    }

    /// Removes the entry at `index` from both chains and vacates its slot, returning its record.
    pub(crate) fn unlink(&mut self, index: usize) -> &'a R {
        let Entry { record, hash, bucket_next, prev, next } = *self.entry(index);

        let bucket = self.bucket_of(hash);
        if self.buckets[bucket] == Some(index) {
            self.buckets[bucket] = bucket_next;
        } else {
            let mut current = self.buckets[bucket];
            while let Some(i) = current {
                let entry = self.entry_mut(i);
                if entry.bucket_next == Some(index) {
                    entry.bucket_next = bucket_next;
                    break;
                }
                current = entry.bucket_next;
            }
        }

        match prev {
            Some(prev) => self.entry_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.entry_mut(next).prev = prev,
            None => self.tail = prev,
        }

        self.slots[index] = Slot::Vacant { next_free: self.free };
        self.free = Some(index);
        self.len -= 1;
        record
    }

    pub(crate) const fn should_grow(&self) -> bool {
        self.len > self.buckets.len() * MAX_CHAIN_LEN
    }

    /// Multiplies the number of buckets by the growth factor and rebuilds every bucket chain from
    /// the cached hashes. The insertion order is untouched.
    pub(crate) fn grow(&mut self) {
        let new_size = self.buckets.len()
            .checked_mul(GROWTH_FACTOR)
            .ok_or(CapacityOverflow)
            .throw();

        self.buckets.clear();
        self.buckets.resize(new_size);

        let mut current = self.head;
        while let Some(index) = current {
            let bucket = self.bucket_of(self.entry(index).hash);
            let chained = self.buckets[bucket];

            let entry = self.entry_mut(index);
            entry.bucket_next = chained;
            current = entry.next;

            self.buckets[bucket] = Some(index);
        }
    }
}

impl<'a, R: Keyed> Slot<'a, R> {
    pub(crate) fn entry(&self) -> &Entry<'a, R> {
        let entry = match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant { .. } => None,
        };
        // SAFETY: Chains only ever hold the indices of occupied slots, and this is only reached by
        // following a chain.
        unsafe { entry.unreachable() }
    }

    pub(crate) fn entry_mut(&mut self) -> &mut Entry<'a, R> {
        let entry = match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant { .. } => None,
        };
        // SAFETY: As in entry.
        unsafe { entry.unreachable() }
    }
}

impl<'a, R: Keyed> Default for Slot<'a, R> {
    fn default() -> Self {
        Slot::Vacant { next_free: None }
    }
}

impl<'a, R: Keyed> Clone for Slot<'a, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R: Keyed> Copy for Slot<'a, R> {}

impl<'a, R: Keyed> Clone for Entry<'a, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R: Keyed> Copy for Entry<'a, R> {}

impl<'a, R: Keyed, B: BuildHasher + Default> Default for HashTable<'a, R, B> {
    fn default() -> Self {
        HashTable::new()
    }
}

impl<'a, R: Keyed + Debug, B: BuildHasher + Debug> Debug for HashTable<'a, R, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("records", &self.iter())
            .field("chains", &DebugWith(|f: &mut Formatter<'_>| f.debug_list().entries(
                self.buckets.iter()
                    .map(|bucket| {
                        let mut chain_len = 0;
                        let mut current = *bucket;
                        while let Some(index) = current {
                            chain_len += 1;
                            current = self.entry(index).bucket_next;
                        }
                        DebugRaw(match chain_len {
                            0 => "-".into(),
                            n => n.to_string(),
                        })
                    })
            ).finish()))
            .field("len", &self.len)
            .field("buckets", &self.bucket_count())
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl<'a, R: Keyed + Debug, B: BuildHasher> Display for HashTable<'a, R, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_set().entries(self.iter()).finish()
    }
}

use std::hash::BuildHasher;

use super::{HashTable, Keyed, Link};

/// A position within a [`HashTable`]'s insertion order, which can unlink the record it points at
/// and carry on from the following one.
///
/// A cursor starts on the first record (see [`HashTable::cursor_front`]) and ends up past the last
/// one, where [`current`](Cursor::current) returns [`None`].
///
/// # Examples
/// ```
/// # use generic_containers::collections::hash::{HashTable, Keyed};
/// # struct Id(u8);
/// # impl Keyed for Id {
/// #     type Key = u8;
/// #     fn key(&self) -> &u8 { &self.0 }
/// # }
/// let ids = [Id(1), Id(2), Id(3), Id(4)];
/// let mut table = HashTable::<Id>::new();
/// for id in &ids {
///     table.add(id).unwrap();
/// }
///
/// let mut cursor = table.cursor_front();
/// while let Some(id) = cursor.current() {
///     if id.0 % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
/// assert_eq!(table.iter().map(|id| id.0).collect::<Vec<_>>(), [1, 3]);
/// ```
pub struct Cursor<'t, 'a, R: Keyed, B: BuildHasher> {
    pub(crate) table: &'t mut HashTable<'a, R, B>,
    pub(crate) current: Link,
}

impl<'t, 'a, R: Keyed, B: BuildHasher> Cursor<'t, 'a, R, B> {
    /// Returns the record under the cursor, or [`None`] once the cursor has moved past the end.
    pub fn current(&self) -> Option<&'a R> {
        Some(self.table.entry(self.current?).record)
    }

    /// Returns the record following the one under the cursor, without moving.
    pub fn peek_next(&self) -> Option<&'a R> {
        let next = self.table.entry(self.current?).next?;
        Some(self.table.entry(next).record)
    }

    /// Moves the cursor to the next record in insertion order. Does nothing once past the end.
    pub fn move_next(&mut self) -> &mut Self {
        if let Some(index) = self.current {
            self.current = self.table.entry(index).next;
        }
        self
    }

    /// Unlinks the record under the cursor and moves on to the following one, returning the
    /// unlinked record.
    pub fn remove_current(&mut self) -> Option<&'a R> {
        let index = self.current?;
        self.current = self.table.entry(index).next;
        Some(self.table.unlink(index))
    }

    /// Returns the table this cursor is moving through.
    pub fn table(&self) -> &HashTable<'a, R, B> {
        &*self.table
    }
}

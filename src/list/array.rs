use std::fmt::{self, Debug, Display, Formatter};
use std::io;
use std::mem;
use std::slice;

use crate::list::{dump_structure, CursorList, ListError, DEFAULT_CAPACITY};

/// The array-backed variant of the [`CursorList`] contract.
///
/// Elements live in a preallocated contiguous buffer and the cursor is a
/// plain index into it. This buys O(1) element access at the price of O(n)
/// structural mutation: `insert`, `remove` and `move_to_nth` all shift a
/// contiguous run of elements by one slot to keep the buffer gap-free.
///
/// The buffer is allocated once, at construction, and never grows; a full
/// list rejects further inserts with [`ListError::CapacityExceeded`].
///
/// # Examples
///
/// ```
/// use cursor_list::{ArrayList, CursorList};
///
/// let mut list = ArrayList::new(4);
/// list.insert('a').unwrap();
/// list.insert('c').unwrap();
/// list.goto_beginning();
/// list.insert('b').unwrap(); // after 'a': [a, b, c]
///
/// assert_eq!(list.current(), Some(&'b'));
/// assert_eq!(list.cursor_position(), Some(1));
/// ```
pub struct ArrayList<T> {
    /// Backing buffer; its length is the logical list length, its capacity
    /// is fixed at construction and never exceeded.
    buf: Vec<T>,
    capacity: usize,
    /// Index of the cursor element; `None` iff the list is empty.
    cursor: Option<usize>,
}

impl<T> ArrayList<T> {
    /// Create an empty list that can hold up to `capacity` elements.
    ///
    /// The whole buffer is allocated here; no later operation allocates.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            cursor: None,
        }
    }

    /// An iterator over the elements in list order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buf.iter()
    }

    /// The elements as a contiguous slice, in list order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }
}

impl<T> CursorList<T> for ArrayList<T> {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    fn insert(&mut self, item: T) -> Result<(), ListError> {
        if self.is_full() {
            return Err(ListError::CapacityExceeded(self.capacity));
        }
        // Inserting at `cursor + 1` shifts the tail of the buffer right by
        // one slot; with an unset cursor the item lands at the front.
        let slot = match self.cursor {
            Some(i) => i + 1,
            None => 0,
        };
        self.buf.insert(slot, item);
        self.cursor = Some(slot);
        Ok(())
    }

    fn remove(&mut self) -> Option<T> {
        let i = self.cursor?;
        let item = self.buf.remove(i);
        self.cursor = if self.buf.is_empty() {
            None
        } else if i >= self.buf.len() {
            // The removed element was the last one: wrap to the front.
            Some(0)
        } else {
            // The shift moved the former successor into slot `i`.
            Some(i)
        };
        Some(item)
    }

    fn replace(&mut self, item: T) -> Option<T> {
        let i = self.cursor?;
        Some(mem::replace(&mut self.buf[i], item))
    }

    fn clear(&mut self) {
        self.buf.clear();
        self.cursor = None;
    }

    fn goto_beginning(&mut self) -> bool {
        if self.buf.is_empty() {
            return false;
        }
        self.cursor = Some(0);
        true
    }

    fn goto_end(&mut self) -> bool {
        if self.buf.is_empty() {
            return false;
        }
        self.cursor = Some(self.buf.len() - 1);
        true
    }

    fn goto_next(&mut self) -> bool {
        match self.cursor {
            Some(i) if i + 1 < self.buf.len() => {
                self.cursor = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    fn goto_prev(&mut self) -> bool {
        match self.cursor {
            Some(i) if i > 0 => {
                self.cursor = Some(i - 1);
                true
            }
            _ => false,
        }
    }

    fn current(&self) -> Option<&T> {
        self.cursor.map(|i| &self.buf[i])
    }

    fn cursor_position(&self) -> Option<usize> {
        self.cursor
    }

    fn find(&mut self, target: &T) -> bool
    where
        T: PartialEq,
    {
        let start = match self.cursor {
            Some(i) => i,
            None => return false,
        };
        for i in start..self.buf.len() {
            if self.buf[i] == *target {
                self.cursor = Some(i);
                return true;
            }
        }
        self.cursor = Some(self.buf.len() - 1);
        false
    }

    fn move_to_nth(&mut self, n: usize) -> bool {
        let i = match self.cursor {
            Some(i) if n < self.buf.len() => i,
            _ => return false,
        };
        // Detach first, then re-insert at slot `n` of the shortened buffer.
        // `n <= len - 1` keeps the insert in bounds even when the target is
        // the last slot.
        let item = self.buf.remove(i);
        self.buf.insert(n, item);
        self.cursor = Some(n);
        true
    }

    fn show_structure<W: io::Write>(&self, sink: &mut W) -> io::Result<()>
    where
        T: Display,
    {
        dump_structure(sink, self.capacity, self.buf.len(), self.cursor, self.iter())
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T: Debug> Debug for ArrayList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::ArrayList;
    use crate::list::{CursorList, ListError, DEFAULT_CAPACITY};

    #[test]
    fn buffer_never_reallocates() {
        let mut list = ArrayList::new(16);
        let base = list.as_slice().as_ptr();
        for c in 'a'..='p' {
            list.insert(c).unwrap();
        }
        assert!(list.is_full());
        assert_eq!(list.as_slice().as_ptr(), base);
    }

    #[test]
    fn insert_shifts_tail_right() {
        let mut list = ArrayList::new(8);
        for c in ['a', 'b', 'd', 'e'] {
            list.insert(c).unwrap();
        }
        list.goto_beginning();
        list.goto_next(); // cursor on 'b'
        list.insert('c').unwrap();
        assert_eq!(list.as_slice(), &['a', 'b', 'c', 'd', 'e']);
        assert_eq!(list.cursor_position(), Some(2));
    }

    #[test]
    fn remove_shifts_tail_left() {
        let mut list = ArrayList::new(8);
        for c in ['a', 'b', 'c', 'd'] {
            list.insert(c).unwrap();
        }
        list.goto_beginning();
        list.goto_next();
        assert_eq!(list.remove(), Some('b'));
        assert_eq!(list.as_slice(), &['a', 'c', 'd']);
        // The former successor now occupies the cursor slot.
        assert_eq!(list.current(), Some(&'c'));
    }

    #[test]
    fn zero_capacity_rejects_everything() {
        let mut list = ArrayList::new(0);
        assert!(list.is_empty());
        assert!(list.is_full());
        assert_eq!(list.insert('a'), Err(ListError::CapacityExceeded(0)));
    }

    #[test]
    fn default_uses_default_capacity() {
        let list: ArrayList<char> = ArrayList::default();
        assert_eq!(list.capacity(), DEFAULT_CAPACITY);
        assert!(list.is_empty());
    }

    #[test]
    fn debug_renders_elements() {
        let mut list = ArrayList::new(4);
        list.insert(1).unwrap();
        list.insert(2).unwrap();
        assert_eq!(format!("{:?}", list), "[1, 2]");
    }
}

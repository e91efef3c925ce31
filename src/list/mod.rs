use std::fmt::Display;
use std::io;

use thiserror::Error;

pub mod array;
pub mod doubly;
pub mod singly;

/// Capacity used by [`Default`] constructors of all variants.
pub const DEFAULT_CAPACITY: usize = 512;

/// The two failure modes of [`CursorList::insert`].
///
/// Every other operation of the contract is total: inapplicability in the
/// current state (removing from an empty list, stepping past the end, ...)
/// is reported through silent no-ops and boolean returns, not through errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// An insert was attempted on a list that already holds `capacity`
    /// elements. The list is left untouched.
    #[error("list is full (capacity {0})")]
    CapacityExceeded(usize),
    /// An insert was attempted with an absent element. `insert` itself takes
    /// the element by value, so this is only produced at boundaries where
    /// absence is representable, such as parsing a bare `+` op-code.
    #[error("cannot insert an absent element")]
    InvalidElement,
}

/// The cursor-based list contract, implemented by three interchangeable
/// backing stores: [`ArrayList`], [`SinglyLinkedList`] and
/// [`DoublyLinkedList`].
///
/// A list is created empty with a fixed capacity and maintains a single
/// *cursor*, the logical "current element". The cursor is unset exactly when
/// the list is empty; otherwise it designates exactly one of the `len`
/// elements. Every operation below keeps that invariant, and for a fixed
/// sequence of operations all three variants expose identical observable
/// behavior (element order, cursor position, boolean results and
/// [`show_structure`] output).
///
/// Lists are single-owner, single-threaded values. Moving a whole list to
/// another thread is fine; sharing one instance across threads is not
/// supported.
///
/// # Examples
///
/// ```
/// use cursor_list::{ArrayList, CursorList};
///
/// let mut list = ArrayList::new(8);
/// list.insert('a').unwrap();
/// list.insert('b').unwrap(); // inserted after the cursor
/// assert_eq!(list.current(), Some(&'b'));
///
/// list.goto_beginning();
/// assert_eq!(list.current(), Some(&'a'));
/// ```
///
/// [`ArrayList`]: crate::ArrayList
/// [`SinglyLinkedList`]: crate::SinglyLinkedList
/// [`DoublyLinkedList`]: crate::DoublyLinkedList
/// [`show_structure`]: CursorList::show_structure
pub trait CursorList<T> {
    /// Maximum number of elements the list will ever hold.
    fn capacity(&self) -> usize;

    /// Number of elements currently in the list.
    fn len(&self) -> usize;

    /// Returns `true` if the list holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the list holds `capacity` elements.
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Insert `item` immediately after the cursor and move the cursor to it.
    ///
    /// If the list is empty, `item` becomes the sole element; if the cursor
    /// is unset, `item` is inserted at the front. Fails with
    /// [`ListError::CapacityExceeded`] when the list is full, leaving the
    /// list untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{CursorList, ListError, SinglyLinkedList};
    ///
    /// let mut list = SinglyLinkedList::new(2);
    /// list.insert(1).unwrap();
    /// list.insert(2).unwrap();
    /// assert_eq!(list.insert(3), Err(ListError::CapacityExceeded(2)));
    /// assert_eq!(list.len(), 2);
    /// ```
    fn insert(&mut self, item: T) -> Result<(), ListError>;

    /// Remove the cursor element and return it, or return `None` if the
    /// list is empty.
    ///
    /// Cursor relocation: if the removed element had a successor, the cursor
    /// moves to it; if the removed element was the last one, the cursor
    /// wraps to the first element; if the list becomes empty, the cursor
    /// becomes unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{CursorList, DoublyLinkedList};
    ///
    /// let mut list = DoublyLinkedList::new(8);
    /// for c in ['a', 'b', 'c'] {
    ///     list.insert(c).unwrap();
    /// }
    /// // Cursor is on 'c', the last element: removal wraps to the front.
    /// assert_eq!(list.remove(), Some('c'));
    /// assert_eq!(list.current(), Some(&'a'));
    /// ```
    fn remove(&mut self) -> Option<T>;

    /// Overwrite the cursor element with `item` and return the previous
    /// value, or return `None` (and drop nothing) if the list is empty.
    /// The cursor does not move.
    fn replace(&mut self, item: T) -> Option<T>;

    /// Remove all elements; the cursor becomes unset.
    fn clear(&mut self);

    /// Move the cursor to the first element. Returns `false` (and does
    /// nothing) if the list is empty.
    fn goto_beginning(&mut self) -> bool;

    /// Move the cursor to the last element. Returns `false` (and does
    /// nothing) if the list is empty.
    fn goto_end(&mut self) -> bool;

    /// Advance the cursor by one element. Returns `false` (and does
    /// nothing) if the list is empty or the cursor is already on the last
    /// element.
    fn goto_next(&mut self) -> bool;

    /// Retreat the cursor by one element. Returns `false` (and does
    /// nothing) if the list is empty or the cursor is already on the first
    /// element.
    fn goto_prev(&mut self) -> bool;

    /// The cursor element, or `None` if the list is empty.
    fn current(&self) -> Option<&T>;

    /// Zero-based index of the cursor element, or `None` if the list is
    /// empty. Linked variants compute this by a forward scan; it exists for
    /// diagnostics and drives [`show_structure`](CursorList::show_structure).
    fn cursor_position(&self) -> Option<usize>;

    /// Scan forward for an element equal to `target`, **starting at the
    /// cursor**, not at the beginning. On a hit the cursor moves to the
    /// matching element and `true` is returned; if the scan exhausts the
    /// list the cursor moves to the *last* element and `false` is returned.
    /// On an empty list, `false` is returned and nothing moves.
    ///
    /// Because the scan starts wherever the cursor happens to be, repeated
    /// calls are history-dependent: searching for the same target twice
    /// matches in place, and a failed search leaves earlier elements
    /// unreachable until the cursor is repositioned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{ArrayList, CursorList};
    ///
    /// let mut list = ArrayList::new(8);
    /// for c in ['a', 'b', 'c', 'b'] {
    ///     list.insert(c).unwrap();
    /// }
    /// list.goto_beginning();
    ///
    /// assert!(list.find(&'b'));
    /// assert_eq!(list.cursor_position(), Some(1));
    /// // A second search for 'b' matches immediately, at the cursor.
    /// assert!(list.find(&'b'));
    /// assert_eq!(list.cursor_position(), Some(1));
    /// // A miss parks the cursor on the last element.
    /// assert!(!list.find(&'z'));
    /// assert_eq!(list.cursor_position(), Some(3));
    /// ```
    fn find(&mut self, target: &T) -> bool
    where
        T: PartialEq;

    /// Relocate the cursor element so that it becomes the `n`-th element
    /// (zero-based), keeping all other elements in relative order, and move
    /// the cursor to the relocated element. Returns `false` (and does
    /// nothing) if the list is empty or `n >= len`.
    ///
    /// The relocation is a detach followed by a re-insert at slot `n` of the
    /// post-detachment sequence. Since the detachment shifts every later
    /// element down by one, this is the only reading under which the element
    /// ends up at index `n` of the final list for every `n`, on either side
    /// of the cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{CursorList, DoublyLinkedList};
    ///
    /// let mut list = DoublyLinkedList::new(8);
    /// for c in ['a', 'b', 'c', 'd'] {
    ///     list.insert(c).unwrap();
    /// }
    /// list.goto_beginning();
    /// list.goto_next(); // cursor on 'b'
    ///
    /// assert!(list.move_to_nth(3)); // [a, c, d, b]
    /// assert_eq!(list.current(), Some(&'b'));
    /// assert_eq!(list.cursor_position(), Some(3));
    ///
    /// assert!(list.move_to_nth(0)); // [b, a, c, d]
    /// assert_eq!(list.cursor_position(), Some(0));
    /// ```
    fn move_to_nth(&mut self, n: usize) -> bool;

    /// Write every element in order, followed by a
    /// `{capacity = C, length = L, cursor = P}` summary, to `sink`. An empty
    /// list prints `Empty list {capacity = C, length = 0, cursor = -1}`.
    ///
    /// Purely diagnostic: the list is never mutated, and for identical
    /// logical state all three variants produce identical bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::{ArrayList, CursorList};
    ///
    /// let mut list = ArrayList::new(8);
    /// for c in ['a', 'b', 'c'] {
    ///     list.insert(c).unwrap();
    /// }
    ///
    /// let mut out = Vec::new();
    /// list.show_structure(&mut out).unwrap();
    /// assert_eq!(out, b"a b c {capacity = 8, length = 3, cursor = 2}\n");
    /// ```
    fn show_structure<W: io::Write>(&self, sink: &mut W) -> io::Result<()>
    where
        T: Display;
}

/// Render the structure summary shared by all variants.
///
/// Keeping the rendering in one place is what makes the cross-variant
/// equivalence property ("same script, byte-identical dumps") hold by
/// construction rather than by coincidence.
pub(crate) fn dump_structure<'a, T, I, W>(
    sink: &mut W,
    capacity: usize,
    len: usize,
    cursor: Option<usize>,
    items: I,
) -> io::Result<()>
where
    T: Display + 'a,
    I: IntoIterator<Item = &'a T>,
    W: io::Write,
{
    if len == 0 {
        return writeln!(
            sink,
            "Empty list {{capacity = {}, length = 0, cursor = -1}}",
            capacity
        );
    }
    for item in items {
        write!(sink, "{} ", item)?;
    }
    let position = cursor.map_or(-1, |p| p as isize);
    writeln!(
        sink,
        "{{capacity = {}, length = {}, cursor = {}}}",
        capacity, len, position
    )
}

#[cfg(test)]
mod tests {
    //! The contract suite: every test in here is written against the trait
    //! alone and instantiated once per variant, so the three backing stores
    //! cannot drift apart without a test noticing.

    use super::{CursorList, ListError};
    use crate::{ArrayList, DoublyLinkedList, SinglyLinkedList};

    fn fill<L: CursorList<char>>(list: &mut L, items: &str) {
        for c in items.chars() {
            list.insert(c).unwrap();
        }
    }

    fn dump<L: CursorList<char>>(list: &L) -> String {
        let mut out = Vec::new();
        list.show_structure(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Move the cursor to index `n` via navigation only.
    fn seek<L: CursorList<char>>(list: &mut L, n: usize) {
        assert!(list.goto_beginning());
        for _ in 0..n {
            assert!(list.goto_next());
        }
    }

    fn check_insert_then_current<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(4);
        assert!(list.is_empty());
        list.insert('x').unwrap();
        assert_eq!(list.current(), Some(&'x'));
        assert_eq!(list.cursor_position(), Some(0));
        assert_eq!(list.len(), 1);

        // Insertion goes after the cursor and the cursor follows.
        list.insert('y').unwrap();
        assert_eq!(list.current(), Some(&'y'));
        assert_eq!(list.cursor_position(), Some(1));
    }

    fn check_insert_mid_list<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(8);
        fill(&mut list, "abd");
        seek(&mut list, 1); // cursor on 'b'
        list.insert('c').unwrap();
        assert_eq!(dump(&list), "a b c d {capacity = 8, length = 4, cursor = 2}\n");
    }

    fn check_capacity_boundary<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(2);
        fill(&mut list, "ab");
        assert!(list.is_full());
        let before = dump(&list);
        assert_eq!(list.insert('c'), Err(ListError::CapacityExceeded(2)));
        assert_eq!(dump(&list), before, "failed insert must leave state unchanged");
    }

    fn check_remove_relocation<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        // Removing a non-last element moves the cursor to its successor.
        let mut list = new(8);
        fill(&mut list, "abc");
        seek(&mut list, 1);
        assert_eq!(list.remove(), Some('b'));
        assert_eq!(list.current(), Some(&'c'));
        assert_eq!(list.cursor_position(), Some(1));

        // Removing the last element wraps the cursor to the first.
        assert!(list.goto_end());
        assert_eq!(list.remove(), Some('c'));
        assert_eq!(list.current(), Some(&'a'));
        assert_eq!(list.cursor_position(), Some(0));

        // Removing the sole element unsets the cursor.
        assert_eq!(list.remove(), Some('a'));
        assert!(list.is_empty());
        assert_eq!(list.current(), None);
        assert_eq!(list.cursor_position(), None);
    }

    fn check_remove_head<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(8);
        fill(&mut list, "abc");
        assert!(list.goto_beginning());
        assert_eq!(list.remove(), Some('a'));
        assert_eq!(dump(&list), "b c {capacity = 8, length = 2, cursor = 0}\n");
    }

    fn check_empty_noops<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(4);
        for _ in 0..3 {
            assert_eq!(list.remove(), None);
            assert!(!list.goto_beginning());
            assert!(!list.goto_end());
            assert!(!list.goto_next());
            assert!(!list.goto_prev());
            assert_eq!(list.replace('x'), None);
            assert!(!list.move_to_nth(0));
            assert!(!list.find(&'x'));
            assert_eq!(list.current(), None);
            assert_eq!(list.cursor_position(), None);
            assert_eq!(dump(&list), "Empty list {capacity = 4, length = 0, cursor = -1}\n");
        }
    }

    fn check_navigation_bounds<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(8);
        fill(&mut list, "ab");
        assert!(list.goto_end());
        assert!(!list.goto_next(), "goto_next at the end is a no-op");
        assert_eq!(list.cursor_position(), Some(1));

        assert!(list.goto_beginning());
        assert!(!list.goto_prev(), "goto_prev at the beginning is a no-op");
        assert_eq!(list.cursor_position(), Some(0));

        assert!(list.goto_next());
        assert_eq!(list.current(), Some(&'b'));
        assert!(list.goto_prev());
        assert_eq!(list.current(), Some(&'a'));
    }

    fn check_replace<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(8);
        fill(&mut list, "abc");
        seek(&mut list, 1);
        assert_eq!(list.replace('B'), Some('b'));
        assert_eq!(list.current(), Some(&'B'));
        assert_eq!(dump(&list), "a B c {capacity = 8, length = 3, cursor = 1}\n");
    }

    fn check_clear<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(8);
        fill(&mut list, "abc");
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.cursor_position(), None);
        // The list stays usable after a clear.
        list.insert('z').unwrap();
        assert_eq!(dump(&list), "z {capacity = 8, length = 1, cursor = 0}\n");
    }

    fn check_find_is_history_dependent<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(8);
        fill(&mut list, "abcb");
        assert!(list.goto_beginning());

        assert!(list.find(&'b'));
        assert_eq!(list.cursor_position(), Some(1));

        // The scan starts at the cursor, so the same target matches in place
        // instead of advancing to the second 'b'.
        assert!(list.find(&'b'));
        assert_eq!(list.cursor_position(), Some(1));

        // A miss parks the cursor on the last element...
        assert!(!list.find(&'z'));
        assert_eq!(list.cursor_position(), Some(3));

        // ...which makes earlier elements unreachable until the cursor is
        // repositioned.
        assert!(list.find(&'b'));
        assert_eq!(list.cursor_position(), Some(3));
        assert!(!list.find(&'a'));
        assert!(list.goto_beginning());
        assert!(list.find(&'a'));
        assert_eq!(list.cursor_position(), Some(0));
    }

    fn check_move_to_nth<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        // Target past the cursor.
        let mut list = new(8);
        fill(&mut list, "abcd");
        seek(&mut list, 1); // cursor on 'b'
        assert!(list.move_to_nth(3));
        assert_eq!(dump(&list), "a c d b {capacity = 8, length = 4, cursor = 3}\n");
        assert_eq!(list.current(), Some(&'b'));

        // Target before the cursor.
        let mut list = new(8);
        fill(&mut list, "abcd");
        seek(&mut list, 1);
        assert!(list.move_to_nth(0));
        assert_eq!(dump(&list), "b a c d {capacity = 8, length = 4, cursor = 0}\n");

        // Target is the cursor's own index: order is unchanged.
        let mut list = new(8);
        fill(&mut list, "abcd");
        seek(&mut list, 1);
        assert!(list.move_to_nth(1));
        assert_eq!(dump(&list), "a b c d {capacity = 8, length = 4, cursor = 1}\n");

        // Head element to the very end (n = len - 1).
        let mut list = new(8);
        fill(&mut list, "abcd");
        assert!(list.goto_beginning());
        assert!(list.move_to_nth(3));
        assert_eq!(dump(&list), "b c d a {capacity = 8, length = 4, cursor = 3}\n");

        // Tail element to the front.
        let mut list = new(8);
        fill(&mut list, "abcd");
        assert!(list.goto_end());
        assert!(list.move_to_nth(0));
        assert_eq!(dump(&list), "d a b c {capacity = 8, length = 4, cursor = 0}\n");

        // Out-of-range target is a no-op.
        assert!(!list.move_to_nth(4));
        assert_eq!(dump(&list), "d a b c {capacity = 8, length = 4, cursor = 0}\n");
    }

    fn check_single_element_moves<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(4);
        fill(&mut list, "a");
        assert!(list.goto_beginning());
        assert!(list.goto_end());
        assert!(!list.goto_next());
        assert!(!list.goto_prev());
        assert!(list.move_to_nth(0));
        assert_eq!(dump(&list), "a {capacity = 4, length = 1, cursor = 0}\n");
    }

    fn check_invariants_after_mixed_ops<L: CursorList<char>>(new: impl Fn(usize) -> L) {
        let mut list = new(3);
        let _ = list.insert('a');
        let _ = list.insert('b');
        let _ = list.insert('c');
        let _ = list.insert('d'); // over capacity, rejected
        list.goto_beginning();
        list.remove();
        list.goto_next();
        let _ = list.insert('e');
        list.move_to_nth(0);
        list.find(&'q');
        list.goto_prev();
        list.remove();
        assert!(list.len() <= list.capacity());
        assert_eq!(list.cursor_position().is_none(), list.is_empty());
        if let Some(p) = list.cursor_position() {
            assert!(p < list.len());
        }
    }

    fn contract_suite<L: CursorList<char>>(new: impl Fn(usize) -> L + Copy) {
        check_insert_then_current(new);
        check_insert_mid_list(new);
        check_capacity_boundary(new);
        check_remove_relocation(new);
        check_remove_head(new);
        check_empty_noops(new);
        check_navigation_bounds(new);
        check_replace(new);
        check_clear(new);
        check_find_is_history_dependent(new);
        check_move_to_nth(new);
        check_single_element_moves(new);
        check_invariants_after_mixed_ops(new);
    }

    #[test]
    fn array_contract() {
        contract_suite(ArrayList::new);
    }

    #[test]
    fn singly_linked_contract() {
        contract_suite(SinglyLinkedList::new);
    }

    #[test]
    fn doubly_linked_contract() {
        contract_suite(DoublyLinkedList::new);
    }
}

use std::fmt::{self, Debug, Display, Formatter};
use std::io;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::list::{dump_structure, CursorList, ListError, DEFAULT_CAPACITY};

/// The doubly-linked variant of the [`CursorList`] contract.
///
/// Elements live in heap nodes chained through both forward and backward
/// links. The list owns every node reachable from `head`; the cursor is a
/// non-owning position marker.
///
/// The backward link is the defining advantage over the singly-linked
/// variant: once a position is known, every splice (`insert`, `remove`, the
/// re-splices of `move_to_nth`) is O(1), because both neighbors are directly
/// reachable. The chain is not cyclic: the head's `prev` and the tail's
/// `next` are unset, and every splice that touches a boundary writes `head`
/// or `tail` instead of a neighbor link.
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
/// assert!(list.goto_prev()); // O(1): just follow the backward link
/// assert_eq!(list.current(), Some(&'b'));
/// ```
pub struct DoublyLinkedList<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    /// Non-owning marker; always points at a node reachable from `head`,
    /// and is `None` iff the list is empty.
    cursor: Option<NonNull<Node<T>>>,
    len: usize,
    capacity: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

struct Node<T> {
    next: Option<NonNull<Node<T>>>,
    prev: Option<NonNull<Node<T>>>,
    element: T,
}

impl<T> Node<T> {
    /// Allocate a detached node holding `element`.
    fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: None,
            prev: None,
            element,
        })))
    }

    /// Reclaim a detached node and return its element.
    ///
    /// It is unsafe because `node` must have been allocated by
    /// [`Node::new_detached`] and must no longer be linked into any chain.
    unsafe fn into_element(node: NonNull<Node<T>>) -> T {
        Box::from_raw(node.as_ptr()).element
    }
}

// Private chain plumbing.
impl<T> DoublyLinkedList<T> {
    /// Link a detached `node` between `prev` and `next`, either of which may
    /// be absent when the splice touches a boundary. Exactly four link
    /// fields are written: `prev.next` (or `head`), `next.prev` (or `tail`),
    /// and both links of `node`.
    ///
    /// It is unsafe because `prev` and `next` must be adjacent nodes of this
    /// list (or the matching boundary), and `node` must be detached.
    unsafe fn attach_between(
        &mut self,
        prev: Option<NonNull<Node<T>>>,
        next: Option<NonNull<Node<T>>>,
        mut node: NonNull<Node<T>>,
    ) {
        debug_assert!(self.adjacent(prev, next), "attach between non-adjacent nodes");
        node.as_mut().prev = prev;
        node.as_mut().next = next;
        match prev {
            Some(mut p) => p.as_mut().next = Some(node),
            None => self.head = Some(node),
        }
        match next {
            Some(mut n) => n.as_mut().prev = Some(node),
            None => self.tail = Some(node),
        }
        self.len += 1;
        debug_assert!(self.adjacent(prev, Some(node)));
        debug_assert!(self.adjacent(Some(node), next));
    }

    /// Unlink `node` from the chain, writing its two neighbors' links (or
    /// `head`/`tail` at a boundary). The node itself is left allocated with
    /// stale links; the caller either frees it or re-attaches it.
    ///
    /// It is unsafe because `node` must belong to this list.
    unsafe fn detach(&mut self, node: NonNull<Node<T>>) {
        let Node { prev, next, .. } = *node.as_ptr();
        match prev {
            Some(mut p) => p.as_mut().next = next,
            None => self.head = next,
        }
        match next {
            Some(mut n) => n.as_mut().prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        debug_assert!(self.adjacent(prev, next));
    }

    /// The node at index `slot`, or `None` when `slot == len` (the
    /// past-the-end position).
    fn node_at(&self, slot: usize) -> Option<NonNull<Node<T>>> {
        if slot >= self.len {
            return None;
        }
        let mut node = self.head.expect("non-empty chain without a head");
        for _ in 0..slot {
            // SAFETY: `slot < len`, so the scan stays inside the chain.
            node = unsafe { node.as_ref().next }.expect("chain shorter than its length");
        }
        Some(node)
    }

    /// Whether `a` and `b` are neighbors (boundaries included). Only used by
    /// debug assertions.
    fn adjacent(&self, a: Option<NonNull<Node<T>>>, b: Option<NonNull<Node<T>>>) -> bool {
        // SAFETY: only nodes of this list are ever passed in.
        let forward = match a {
            Some(a) => (unsafe { a.as_ref().next }) == b,
            None => self.head == b,
        };
        let backward = match b {
            Some(b) => (unsafe { b.as_ref().prev }) == a,
            None => self.tail == a,
        };
        forward && backward
    }
}

impl<T> DoublyLinkedList<T> {
    /// Create an empty list that will accept up to `capacity` elements.
    ///
    /// Nothing is preallocated; the capacity is a configured ceiling,
    /// enforced on `insert`.
    pub fn new(capacity: usize) -> Self {
        Self {
            head: None,
            tail: None,
            cursor: None,
            len: 0,
            capacity,
            _marker: PhantomData,
        }
    }

    /// An iterator over the elements in chain order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            node: self.head,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T> CursorList<T> for DoublyLinkedList<T> {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, item: T) -> Result<(), ListError> {
        if self.is_full() {
            return Err(ListError::CapacityExceeded(self.capacity));
        }
        let node = Node::new_detached(item);
        match self.cursor {
            // Unset cursor: the item becomes the front element (and the sole
            // one when the list is empty).
            // SAFETY: `None..head` is the front boundary, `node` is detached.
            None => unsafe { self.attach_between(None, self.head, node) },
            // SAFETY: `cur` and `cur.next` are adjacent, `node` is detached.
            Some(cur) => unsafe {
                self.attach_between(Some(cur), cur.as_ref().next, node)
            },
        }
        self.cursor = Some(node);
        Ok(())
    }

    fn remove(&mut self) -> Option<T> {
        let cur = self.cursor?;
        // SAFETY: the cursor always marks a node owned by this list.
        let successor = unsafe { cur.as_ref().next };
        unsafe { self.detach(cur) };
        self.cursor = if self.len == 0 {
            None
        } else {
            // Successor if there was one, otherwise wrap to the front.
            successor.or(self.head)
        };
        // SAFETY: `cur` was just detached and is never touched again.
        Some(unsafe { Node::into_element(cur) })
    }

    fn replace(&mut self, item: T) -> Option<T> {
        let mut cur = self.cursor?;
        // SAFETY: the cursor always marks a node owned by this list.
        Some(mem::replace(unsafe { &mut cur.as_mut().element }, item))
    }

    fn clear(&mut self) {
        let mut node = self.head.take();
        while let Some(n) = node {
            // SAFETY: `head` was taken, so each node is detached exactly
            // once and freed exactly once.
            node = unsafe { Box::from_raw(n.as_ptr()).next };
        }
        self.tail = None;
        self.cursor = None;
        self.len = 0;
    }

    fn goto_beginning(&mut self) -> bool {
        match self.head {
            Some(head) => {
                self.cursor = Some(head);
                true
            }
            None => false,
        }
    }

    fn goto_end(&mut self) -> bool {
        match self.tail {
            Some(tail) => {
                self.cursor = Some(tail);
                true
            }
            None => false,
        }
    }

    fn goto_next(&mut self) -> bool {
        let cur = match self.cursor {
            Some(cur) => cur,
            None => return false,
        };
        // SAFETY: the cursor always marks a node owned by this list.
        match unsafe { cur.as_ref().next } {
            Some(next) => {
                self.cursor = Some(next);
                true
            }
            None => false,
        }
    }

    fn goto_prev(&mut self) -> bool {
        let cur = match self.cursor {
            Some(cur) => cur,
            None => return false,
        };
        // SAFETY: the cursor always marks a node owned by this list.
        match unsafe { cur.as_ref().prev } {
            Some(prev) => {
                self.cursor = Some(prev);
                true
            }
            None => false,
        }
    }

    fn current(&self) -> Option<&T> {
        // SAFETY: the cursor always marks a node owned by this list.
        self.cursor.map(|cur| unsafe { &cur.as_ref().element })
    }

    fn cursor_position(&self) -> Option<usize> {
        let cur = self.cursor?;
        let mut node = self.head?;
        let mut pos = 0;
        while node != cur {
            // SAFETY: the cursor is reachable from `head`, so the scan stays
            // inside the chain.
            node = unsafe { node.as_ref().next }.expect("cursor not reachable from head");
            pos += 1;
        }
        Some(pos)
    }

    fn find(&mut self, target: &T) -> bool
    where
        T: PartialEq,
    {
        let mut node = match self.cursor {
            Some(cur) => cur,
            None => return false,
        };
        loop {
            // SAFETY: every node visited is owned by this list.
            let current = unsafe { node.as_ref() };
            if current.element == *target {
                self.cursor = Some(node);
                return true;
            }
            match current.next {
                Some(next) => node = next,
                None => break,
            }
        }
        // Exhausted without a match: park the cursor on the tail.
        self.cursor = self.tail;
        false
    }

    fn move_to_nth(&mut self, n: usize) -> bool {
        let cur = match self.cursor {
            Some(cur) if n < self.len => cur,
            _ => return false,
        };
        // SAFETY: `cur` belongs to this list. After the detach, the node at
        // slot `n` of the shortened chain (or the back boundary when
        // `n == len`) gives the insertion neighbors; both splices are O(1)
        // once that node is known. The node is reused, not reallocated.
        unsafe {
            self.detach(cur);
            match self.node_at(n) {
                Some(at) => self.attach_between(at.as_ref().prev, Some(at), cur),
                None => self.attach_between(self.tail, None, cur),
            }
        }
        self.cursor = Some(cur);
        true
    }

    fn show_structure<W: io::Write>(&self, sink: &mut W) -> io::Result<()>
    where
        T: Display,
    {
        dump_structure(sink, self.capacity, self.len, self.cursor_position(), self.iter())
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> Drop for DoublyLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug> Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

unsafe impl<T: Send> Send for DoublyLinkedList<T> {}

unsafe impl<T: Sync> Sync for DoublyLinkedList<T> {}

/// An iterator over the elements of a [`DoublyLinkedList`].
///
/// It does not hold a reference to the list, but it borrows from it, so a
/// phantom marker keeps the list immutable while the iterator lives.
pub struct Iter<'a, T: 'a> {
    node: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a DoublyLinkedList<T>>,
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        // SAFETY: the iterator only walks nodes owned by the borrowed list.
        let current = unsafe { node.as_ref() };
        self.node = current.next;
        self.len -= 1;
        Some(&current.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> std::iter::FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::DoublyLinkedList;
    use crate::list::CursorList;
    use std::cell::RefCell;

    fn collect(list: &DoublyLinkedList<char>) -> Vec<char> {
        list.iter().copied().collect()
    }

    /// Check that the boundary links are unset, every internal link pair is
    /// mutually inverse, and the chain length matches `len`.
    fn assert_well_linked(list: &DoublyLinkedList<char>) {
        unsafe {
            let head = match list.head {
                None => {
                    assert!(list.tail.is_none());
                    assert_eq!(list.len, 0);
                    return;
                }
                Some(head) => head,
            };
            assert!(head.as_ref().prev.is_none(), "head has a backward link");
            let mut node = head;
            let mut count = 1;
            while let Some(next) = node.as_ref().next {
                assert_eq!(next.as_ref().prev, Some(node), "links not mutually inverse");
                node = next;
                count += 1;
            }
            assert_eq!(list.tail, Some(node), "tail does not mark the last node");
            assert_eq!(count, list.len);
        }
    }

    #[test]
    fn boundary_splices_update_head_and_tail() {
        let mut list = DoublyLinkedList::new(8);
        // Grow from both boundaries.
        list.insert('b').unwrap();
        list.insert('c').unwrap(); // tail splice: cursor was the tail
        list.goto_beginning();
        list.goto_prev(); // stays on head
        assert_eq!(collect(&list), vec!['b', 'c']);

        // Removing the head must clear the new head's backward link, which
        // goto_prev then refuses to cross.
        list.remove();
        assert_eq!(list.current(), Some(&'c'));
        assert!(!list.goto_prev());

        // Removing the tail must rewrite `tail`, which goto_end then uses.
        list.insert('d').unwrap();
        list.insert('e').unwrap();
        list.goto_end();
        list.remove(); // removed 'e', wrapped to front
        assert!(list.goto_end());
        assert_eq!(list.current(), Some(&'d'));
    }

    #[test]
    fn links_stay_mutually_inverse_after_moves() {
        let mut list = DoublyLinkedList::new(8);
        for c in ['a', 'b', 'c', 'd', 'e'] {
            list.insert(c).unwrap();
        }
        list.goto_beginning();
        list.goto_next();
        assert!(list.move_to_nth(4)); // 'b' to the end
        assert_eq!(collect(&list), vec!['a', 'c', 'd', 'e', 'b']);
        assert_well_linked(&list);

        assert!(list.move_to_nth(2)); // and back into the middle
        assert_eq!(collect(&list), vec!['a', 'c', 'b', 'd', 'e']);
        assert_well_linked(&list);
    }

    #[test]
    fn adjacency_check_covers_boundaries() {
        let mut list = DoublyLinkedList::new(4);
        for c in ['a', 'b'] {
            list.insert(c).unwrap();
        }
        let head = list.head;
        let tail = list.tail;
        assert!(list.adjacent(None, head));
        assert!(list.adjacent(head, tail));
        assert!(list.adjacent(tail, None));
        assert!(!list.adjacent(tail, head));
        assert!(!list.adjacent(None, tail));
    }

    #[test]
    fn goto_prev_is_constant_time_navigation() {
        let mut list = DoublyLinkedList::new(8);
        for c in ['x', 'y', 'z'] {
            list.insert(c).unwrap();
        }
        assert!(list.goto_prev());
        assert_eq!(list.current(), Some(&'y'));
        assert!(list.goto_prev());
        assert_eq!(list.current(), Some(&'x'));
        assert!(!list.goto_prev());
    }

    #[test]
    fn drop_frees_every_node() {
        struct DropTally<'a>(i32, &'a RefCell<Vec<i32>>);
        impl Drop for DropTally<'_> {
            fn drop(&mut self) {
                self.1.borrow_mut().push(self.0);
            }
        }

        let dropped = RefCell::new(Vec::new());
        let mut list = DoublyLinkedList::new(8);
        for i in 1..=3 {
            list.insert(DropTally(i, &dropped)).unwrap();
        }
        drop(list);
        assert_eq!(*dropped.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn clear_resets_both_boundaries() {
        let mut list = DoublyLinkedList::new(4);
        for c in ['a', 'b'] {
            list.insert(c).unwrap();
        }
        list.clear();
        assert!(list.is_empty());
        assert!(!list.goto_beginning());
        assert!(!list.goto_end());
        // Reusable after the clear.
        list.insert('z').unwrap();
        assert_eq!(collect(&list), vec!['z']);
    }
}

use std::fmt::{self, Debug, Display, Formatter};
use std::io;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::list::{dump_structure, CursorList, ListError, DEFAULT_CAPACITY};

/// The singly-linked variant of the [`CursorList`] contract.
///
/// Elements live in heap nodes chained through forward links only. The list
/// owns every node reachable from `head`; the cursor is a non-owning
/// position marker into that chain.
///
/// The missing backward link is the defining cost of this variant: `remove`,
/// `goto_prev` and the splices of `move_to_nth` all locate a predecessor by
/// a forward scan from `head`, O(len) each.
///
/// # Examples
///
/// ```
/// use cursor_list::{CursorList, SinglyLinkedList};
///
/// let mut list = SinglyLinkedList::new(8);
/// for c in ['a', 'b', 'c'] {
///     list.insert(c).unwrap();
/// }
/// assert!(list.goto_prev()); // predecessor found by scanning from head
/// assert_eq!(list.current(), Some(&'b'));
/// ```
pub struct SinglyLinkedList<T> {
    head: Option<NonNull<Node<T>>>,
    /// Non-owning marker; always points at a node reachable from `head`,
    /// and is `None` iff the list is empty.
    cursor: Option<NonNull<Node<T>>>,
    len: usize,
    capacity: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

struct Node<T> {
    next: Option<NonNull<Node<T>>>,
    element: T,
}

impl<T> Node<T> {
    /// Allocate a detached node holding `element`.
    fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: None,
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
impl<T> SinglyLinkedList<T> {
    /// Find the node whose `next` is `target` by scanning from `head`, or
    /// `None` if `target` is the head node.
    fn predecessor(&self, target: NonNull<Node<T>>) -> Option<NonNull<Node<T>>> {
        let mut node = self.head?;
        if node == target {
            return None;
        }
        // SAFETY: every node visited is reachable from `head`, hence owned
        // by this list and valid.
        while let Some(next) = unsafe { node.as_ref().next } {
            if next == target {
                return Some(node);
            }
            node = next;
        }
        None
    }

    /// Unlink `node` from the chain. The node itself is left allocated with
    /// a stale `next`; the caller either frees it or re-attaches it.
    ///
    /// It is unsafe because `node` must belong to this list.
    unsafe fn detach(&mut self, node: NonNull<Node<T>>) {
        let next = node.as_ref().next;
        match self.predecessor(node) {
            Some(mut prev) => prev.as_mut().next = next,
            None => self.head = next,
        }
        self.len -= 1;
    }

    /// Link a detached `node` into the chain so it becomes element `slot`
    /// (`slot == len` appends).
    ///
    /// It is unsafe because `node` must be detached and `slot <= len`.
    unsafe fn attach_at(&mut self, slot: usize, mut node: NonNull<Node<T>>) {
        if slot == 0 {
            node.as_mut().next = self.head;
            self.head = Some(node);
        } else {
            let mut prev = self.head.expect("attach slot out of chain bounds");
            for _ in 0..slot - 1 {
                prev = prev.as_ref().next.expect("attach slot out of chain bounds");
            }
            node.as_mut().next = prev.as_ref().next;
            prev.as_mut().next = Some(node);
        }
        self.len += 1;
    }
}

impl<T> SinglyLinkedList<T> {
    /// Create an empty list that will accept up to `capacity` elements.
    ///
    /// Unlike the array variant nothing is preallocated; the capacity is a
    /// configured ceiling, enforced on `insert`.
    pub fn new(capacity: usize) -> Self {
        Self {
            head: None,
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

impl<T> CursorList<T> for SinglyLinkedList<T> {
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
        let mut node = Node::new_detached(item);
        match self.cursor {
            // Unset cursor: the item becomes the front element (and the sole
            // one when the list is empty).
            // SAFETY: slot 0 is always a valid attach point, and `node` is
            // freshly allocated, hence detached.
            None => unsafe { self.attach_at(0, node) },
            // SAFETY: `cur` belongs to this list, `node` is detached; the
            // splice rewrites exactly the two forward links involved.
            Some(mut cur) => unsafe {
                node.as_mut().next = cur.as_ref().next;
                cur.as_mut().next = Some(node);
                self.len += 1;
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
        let mut node = match self.head {
            Some(head) => head,
            None => return false,
        };
        // SAFETY: every node visited is owned by this list.
        while let Some(next) = unsafe { node.as_ref().next } {
            node = next;
        }
        self.cursor = Some(node);
        true
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
        match self.predecessor(cur) {
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
        // Exhausted without a match: `node` is the last element.
        self.cursor = Some(node);
        false
    }

    fn move_to_nth(&mut self, n: usize) -> bool {
        let cur = match self.cursor {
            Some(cur) if n < self.len => cur,
            _ => return false,
        };
        // SAFETY: `cur` belongs to this list; after the detach `n` is at
        // most the shortened chain's length, so the attach slot is valid.
        // The node is reused, not reallocated.
        unsafe {
            self.detach(cur);
            self.attach_at(n, cur);
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

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Debug> Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

unsafe impl<T: Send> Send for SinglyLinkedList<T> {}

unsafe impl<T: Sync> Sync for SinglyLinkedList<T> {}

/// An iterator over the elements of a [`SinglyLinkedList`].
///
/// It does not hold a reference to the list, but it borrows from it, so a
/// phantom marker keeps the list immutable while the iterator lives.
pub struct Iter<'a, T: 'a> {
    node: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a SinglyLinkedList<T>>,
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

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

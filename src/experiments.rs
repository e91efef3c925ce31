//! A fully safe doubly-linked chain built from branded cells and
//! fractional ownership, kept as a prototype for a possible `unsafe`-free
//! backing of [`DoublyLinkedList`](crate::DoublyLinkedList).
//!
//! Each node is co-owned by two half-references: one held by whatever
//! points at it from the left (the chain's `head`, or the predecessor's
//! `next`), one by whatever points at it from the right (the chain's
//! `tail`, or the successor's `prev`). Popping a node joins its two halves
//! back into full ownership, and every link mutation goes through a
//! [`GhostToken`], so the module contains no `unsafe` at all.
//!
//! The catch is that the token must be threaded through every call, and
//! the cursor API has nowhere to keep it without infecting the public
//! trait with a `'id` brand. That is why the shipping variant uses raw
//! `NonNull` links instead.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;

pub struct Chain<'id, T> {
    head: Option<NodePtr<'id, T>>,
    tail: Option<NodePtr<'id, T>>,
    len: usize,
}

struct Node<'id, T> {
    next: Option<NodePtr<'id, T>>,
    prev: Option<NodePtr<'id, T>>,
    element: T,
}

type NodePtr<'id, T> = Half<GhostCell<'id, Node<'id, T>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id, T> Node<'id, T> {
    fn new(element: T) -> Self {
        Self {
            next: None,
            prev: None,
            element,
        }
    }
}

impl<'id, T> Default for Chain<'id, T> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<'id, T> Chain<'id, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn push_front(&mut self, element: T, token: &mut GhostToken<'id>) {
        let (one, other) = Full::split(Full::new(GhostCell::new(Node::new(element))));
        match self.head.take() {
            Some(old_head) => {
                old_head.borrow_mut(token).prev = Some(one);
                other.borrow_mut(token).next = Some(old_head);
                self.head = Some(other);
            }
            None => {
                self.tail = Some(one);
                self.head = Some(other);
            }
        }
        self.len += 1;
    }

    pub fn push_back(&mut self, element: T, token: &mut GhostToken<'id>) {
        let (one, other) = Full::split(Full::new(GhostCell::new(Node::new(element))));
        match self.tail.take() {
            Some(old_tail) => {
                old_tail.borrow_mut(token).next = Some(one);
                other.borrow_mut(token).prev = Some(old_tail);
                self.tail = Some(other);
            }
            None => {
                self.head = Some(one);
                self.tail = Some(other);
            }
        }
        self.len += 1;
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        let left = self.head.take()?;
        // The departing node's other half sits in its successor's `prev`
        // link, or in `tail` when it is the only node.
        let right = match left.borrow_mut(token).next.take() {
            Some(after) => {
                let right = after
                    .borrow_mut(token)
                    .prev
                    .take()
                    .expect("successor lost its backward link");
                self.head = Some(after);
                right
            }
            None => self.tail.take().expect("chain with a head but no tail"),
        };
        self.len -= 1;
        Some(Full::into_box(Full::join(left, right)).into_inner().element)
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        let right = self.tail.take()?;
        let left = match right.borrow_mut(token).prev.take() {
            Some(before) => {
                let left = before
                    .borrow_mut(token)
                    .next
                    .take()
                    .expect("predecessor lost its forward link");
                self.tail = Some(before);
                left
            }
            None => self.head.take().expect("chain with a tail but no head"),
        };
        self.len -= 1;
        Some(Full::into_box(Full::join(left, right)).into_inner().element)
    }

    /// Snapshot the chain front to back. Walking only needs a shared token.
    pub fn to_vec(&self, token: &GhostToken<'id>) -> Vec<T>
    where
        T: Clone,
    {
        let mut items = Vec::with_capacity(self.len);
        let mut link = self.head.as_ref();
        while let Some(half) = link {
            let node = half.borrow(token);
            items.push(node.element.clone());
            link = node.next.as_ref();
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;
    use ghost_cell::GhostToken;

    #[test]
    fn push_pop_both_ends() {
        GhostToken::new(|mut token| {
            let mut chain = Chain::new();
            assert!(chain.is_empty());
            chain.push_back(1, &mut token);
            chain.push_front(2, &mut token);
            chain.push_back(3, &mut token);
            assert_eq!(chain.len(), 3);
            assert_eq!(chain.to_vec(&token), vec![2, 1, 3]);
            assert_eq!(chain.pop_back(&mut token), Some(3));
            assert_eq!(chain.pop_front(&mut token), Some(2));
            assert_eq!(chain.pop_front(&mut token), Some(1));
            assert_eq!(chain.pop_back(&mut token), None);
            assert!(chain.is_empty());
        })
    }

    #[test]
    fn singleton_pops_from_either_end() {
        GhostToken::new(|mut token| {
            let mut chain = Chain::new();
            chain.push_front('a', &mut token);
            assert_eq!(chain.pop_back(&mut token), Some('a'));
            chain.push_back('b', &mut token);
            assert_eq!(chain.pop_front(&mut token), Some('b'));
            assert_eq!(chain.len(), 0);
        })
    }
}

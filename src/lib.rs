//! This crate provides a cursor-based list with three interchangeable
//! backing stores: a preallocated array, a singly-linked chain and a
//! doubly-linked chain.
//!
//! All three variants implement the one [`CursorList`] trait and agree on
//! every observable detail, so picking a variant is purely a performance
//! decision:
//!
//! - [`ArrayList`] keeps elements in one contiguous buffer. Cursor motion
//!   and `move_to_nth` are index arithmetic; structural edits shift a run
//!   of elements.
//! - [`SinglyLinkedList`] keeps one forward link per node. Insertion after
//!   the cursor is *O*(1); stepping backwards re-scans from the head.
//! - [`DoublyLinkedList`] keeps both links per node, making every cursor
//!   step *O*(1) at the cost of one extra pointer per element.
//!
//! A list is created with a fixed capacity and never grows; a full list
//! rejects inserts with [`ListError::CapacityExceeded`]. The cursor is the
//! single "current element": unset exactly when the list is empty, and
//! relocated by every structural operation in a way all variants share.
//!
//! Here is a quick example showing how the cursor drives the list.
//!
//! ```
//! use cursor_list::{CursorList, DoublyLinkedList};
//!
//! let mut list = DoublyLinkedList::new(8);
//! for c in ['a', 'b', 'd'] {
//!     list.insert(c).unwrap(); // each insert lands after the cursor
//! }
//!
//! list.goto_beginning();
//! list.goto_next(); // cursor on 'b'
//! list.insert('c').unwrap();
//! assert_eq!(list.iter().copied().collect::<String>(), "abcd");
//!
//! assert!(list.find(&'d')); // scans forward from the cursor
//! assert_eq!(list.remove(), Some('d')); // cursor wraps to the front
//! assert_eq!(list.current(), Some(&'a'));
//! ```
//!
//! # Scripted replay
//!
//! The [`script`] module decodes the compact op-code language used by the
//! scripted test drivers (`+a`, `-`, `#`, ...) and replays whole scripts
//! against any variant, dumping the structure after every line. Replaying
//! one script against two variants produces byte-identical output, which
//! is the strongest form of the interchangeability guarantee.
//!
//! # Threading
//!
//! Lists are single-owner values. The linked variants are `Send`/`Sync`
//! under the usual element bounds, so a whole list may be moved to or
//! inspected from another thread, but all mutation goes through `&mut self`
//! and there is no internal synchronization.

#[doc(inline)]
pub use list::array::ArrayList;
#[doc(inline)]
pub use list::doubly::DoublyLinkedList;
#[doc(inline)]
pub use list::singly::SinglyLinkedList;
#[doc(inline)]
pub use list::{CursorList, ListError, DEFAULT_CAPACITY};

pub mod list;
pub mod script;

mod experiments;

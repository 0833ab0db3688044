//! An ordered set of unique keys on a red-black tree, with bidirectional cursors.
//!
//! This crate provides [`RBTreeSet`], a sorted set whose order is set by a pluggable
//! [`Comparator`] chosen at construction time. On top of the usual iterators it offers
//! cursors that walk the set one key at a time in either direction:
//!
//! - [`Cursor`](rbtree_set::Cursor) - a read-only cursor, handed out by
//!   [`begin`](RBTreeSet::begin), [`end`](RBTreeSet::end) and [`find`](RBTreeSet::find)
//! - [`CursorMut`](rbtree_set::CursorMut) - a cursor that can also insert and remove
//! - [`Position`](rbtree_set::Position) - a detached cursor location that survives
//!   unrelated insertions and removals
//!
//! # Example
//!
//! ```
//! use rbtree_set::{RBTreeSet, Reverse, NaturalOrder};
//!
//! let mut set = RBTreeSet::new();
//! for key in [5, 3, 8, 1, 4] {
//!     set.insert(key);
//! }
//!
//! // Walk the set with a cursor, like an iterator that can also go backwards.
//! let mut cursor = set.find(&4);
//! cursor.move_next();
//! assert_eq!(*cursor.key(), 5);
//! cursor.move_prev();
//! cursor.move_prev();
//! assert_eq!(*cursor.key(), 3);
//!
//! // Remember where a key is, modify the set, and come back.
//! let five = set.find(&5).position();
//! set.remove(&3);
//! set.insert(6);
//! let mut cursor = set.cursor_at(five);
//! cursor.move_next();
//! assert_eq!(*cursor.key(), 6);
//!
//! // Any comparator works, fixed for the set's lifetime.
//! let descending: RBTreeSet<_, _> = {
//!     let mut set = RBTreeSet::with_comparator(Reverse(NaturalOrder));
//!     set.extend([1, 2, 3]);
//!     set
//! };
//! assert_eq!(descending.first(), Some(&3));
//! ```
//!
//! # Cursor contract
//!
//! Reading the key at `end()`, stepping forward from `end()`, stepping back from the first key,
//! and re-attaching a [`Position`](rbtree_set::Position) whose key has been removed all panic.
//! None of them can corrupt the set.
//!
//! # Implementation
//!
//! Nodes live in an arena and are linked through stable handles. Rotations only relink
//! handles, and removing a node with two children relinks its successor in its place rather
//! than moving keys between nodes. A handle therefore keeps naming the same key until that key
//! is removed. Each arena slot carries a generation counter so stale positions are detected.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod comparator;
mod raw;

pub mod rbtree_set;

pub use comparator::{Comparator, NaturalOrder, Reverse};
pub use rbtree_set::RBTreeSet;

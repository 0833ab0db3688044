use core::fmt;
use core::ptr;

use super::RBTreeSet;
use crate::comparator::{Comparator, NaturalOrder};
use crate::raw::{Generation, Handle, RawRBTree, TreeId};

/// A detached cursor location in a particular `RBTreeSet`.
///
/// A position is created by [`Cursor::position`] or [`CursorMut::position`] and turned back into
/// a cursor with [`RBTreeSet::cursor_at`]. It holds no borrow, so the set may be modified in
/// between. A position stays valid across any insertion and across the removal of any *other*
/// key. Once its own key is removed (or the set is cleared) it can no longer be resolved.
///
/// Two positions are equal if they belong to the same set and point at the same key, or are both
/// at `end()` of the same set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    tree: TreeId,
    node: Option<(Handle, Generation)>,
}

impl Position {
    fn new<K, C>(tree: &RawRBTree<K, C>, current: Option<Handle>) -> Self {
        Position {
            tree: tree.id(),
            node: current.map(|h| (h, tree.generation(h))),
        }
    }

    /// Returns `true` if this is the `end()` position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub(super) const fn tree(&self) -> TreeId {
        self.tree
    }

    pub(super) const fn node(&self) -> Option<(Handle, Generation)> {
        self.node
    }
}

/// A read-only cursor into a `RBTreeSet`.
///
/// The cursor is either on a key or at *end*, the position one past the largest key.
///
/// | operation      | on a key                                      | at end                     |
/// |----------------|-----------------------------------------------|----------------------------|
/// | [`key`]        | the key                                       | panics                     |
/// | [`move_next`]  | next key, or end after the largest            | panics                     |
/// | [`move_prev`]  | previous key, panics on the smallest          | largest key, panics if empty |
///
/// Cursors compare equal when they borrow the same set and sit on the same key, or are both at
/// end.
///
/// This `struct` is created by [`RBTreeSet::begin`], [`RBTreeSet::end`], [`RBTreeSet::find`]
/// and friends.
///
/// # Examples
///
/// ```
/// use rbtree_set::RBTreeSet;
///
/// let set = RBTreeSet::from([7]);
/// let mut cursor = set.end();
/// cursor.move_prev();
/// assert_eq!(*cursor.key(), 7);
/// cursor.move_next();
/// assert!(cursor == set.end());
/// ```
///
/// [`key`]: Cursor::key
/// [`move_next`]: Cursor::move_next
/// [`move_prev`]: Cursor::move_prev
pub struct Cursor<'a, K, C = NaturalOrder> {
    set: &'a RBTreeSet<K, C>,
    current: Option<Handle>,
}

/// A cursor into a `RBTreeSet` that can also insert and remove keys.
///
/// Moves and panics exactly like [`Cursor`]. Keys are never handed out mutably, since changing
/// a key in place could break the set's ordering.
///
/// This `struct` is created by [`RBTreeSet::insert`], [`RBTreeSet::find_mut`],
/// [`RBTreeSet::begin_mut`] and friends.
///
/// # Examples
///
/// ```
/// use rbtree_set::RBTreeSet;
///
/// let mut set = RBTreeSet::from([1, 2, 3, 4]);
/// let mut cursor = set.begin_mut();
/// while !cursor.is_end() {
///     if cursor.key() % 2 == 0 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3]);
/// ```
pub struct CursorMut<'a, K, C = NaturalOrder> {
    set: &'a mut RBTreeSet<K, C>,
    current: Option<Handle>,
}

fn key_at<'t, K, C>(tree: &'t RawRBTree<K, C>, current: Option<Handle>, method: &str) -> &'t K {
    match current {
        Some(h) => tree.key(h),
        None => panic!("`{method}()` - cursor is at `end()`!"),
    }
}

fn next_of<K, C>(tree: &RawRBTree<K, C>, current: Option<Handle>, method: &str) -> Option<Handle> {
    match current {
        Some(h) => tree.successor(h),
        None => panic!("`{method}()` - cursor is at `end()`!"),
    }
}

fn prev_of<K, C>(tree: &RawRBTree<K, C>, current: Option<Handle>, method: &str) -> Handle {
    match current {
        Some(h) => tree
            .predecessor(h)
            .unwrap_or_else(|| panic!("`{method}()` - cursor is at the first key!")),
        None => tree.last().unwrap_or_else(|| panic!("`{method}()` - set is empty!")),
    }
}

impl<'a, K, C> Cursor<'a, K, C> {
    pub(super) const fn new(set: &'a RBTreeSet<K, C>, current: Option<Handle>) -> Self {
        Cursor {
            set,
            current,
        }
    }

    /// Returns the key under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at `end()`.
    #[must_use]
    pub fn key(&self) -> &'a K {
        key_at(&self.set.tree, self.current, "Cursor::key")
    }

    /// Returns the key under the cursor, or `None` at `end()`.
    #[must_use]
    pub fn get(&self) -> Option<&'a K> {
        self.current.map(|h| self.set.tree.key(h))
    }

    /// Returns `true` if the cursor is at `end()`.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next key, or to `end()` from the largest key.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at `end()`.
    pub fn move_next(&mut self) {
        self.current = next_of(&self.set.tree, self.current, "Cursor::move_next");
    }

    /// Moves to the previous key. From `end()`, moves to the largest key.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is on the smallest key, or at `end()` of an empty set.
    pub fn move_prev(&mut self) {
        self.current = Some(prev_of(&self.set.tree, self.current, "Cursor::move_prev"));
    }

    /// Detaches the cursor's location from the borrow of the set.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(&self.set.tree, self.current)
    }
}

impl<'a, K, C> CursorMut<'a, K, C> {
    pub(super) fn new(set: &'a mut RBTreeSet<K, C>, current: Option<Handle>) -> Self {
        CursorMut {
            set,
            current,
        }
    }

    /// Returns the key under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at `end()`.
    #[must_use]
    pub fn key(&self) -> &K {
        key_at(&self.set.tree, self.current, "CursorMut::key")
    }

    /// Returns the key under the cursor, or `None` at `end()`.
    #[must_use]
    pub fn get(&self) -> Option<&K> {
        self.current.map(|h| self.set.tree.key(h))
    }

    /// Returns `true` if the cursor is at `end()`.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next key, or to `end()` from the largest key.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at `end()`.
    pub fn move_next(&mut self) {
        self.current = next_of(&self.set.tree, self.current, "CursorMut::move_next");
    }

    /// Moves to the previous key. From `end()`, moves to the largest key.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is on the smallest key, or at `end()` of an empty set.
    pub fn move_prev(&mut self) {
        self.current = Some(prev_of(&self.set.tree, self.current, "CursorMut::move_prev"));
    }

    /// Detaches the cursor's location from the borrow of the set.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(&self.set.tree, self.current)
    }

    /// Returns a read-only cursor at the same location.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, C> {
        Cursor::new(&*self.set, self.current)
    }

    /// Removes the key under the cursor and moves to the key after it (or `end()`).
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at `end()`.
    pub fn remove_current(&mut self) -> K {
        let Some(h) = self.current else {
            panic!("`CursorMut::remove_current()` - cursor is at `end()`!");
        };
        let tree = &mut self.set.tree;
        self.current = tree.successor(h);
        tree.remove_handle(h)
    }
}

impl<K, C: Comparator<K>> CursorMut<'_, K, C> {
    /// Inserts `key` and moves the cursor onto it.
    ///
    /// If an equal key is already present the set is unchanged, the cursor moves onto the
    /// existing key, and `false` is returned.
    pub fn insert(&mut self, key: K) -> bool {
        let (inserted, h) = self.set.tree.insert(key);
        self.current = Some(h);
        inserted
    }
}

impl<K, C> Clone for Cursor<'_, K, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, C> Copy for Cursor<'_, K, C> {}

impl<K, C> PartialEq for Cursor<'_, K, C> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.set, other.set) && self.current == other.current
    }
}

impl<K, C> Eq for Cursor<'_, K, C> {}

impl<'a, K, C> From<CursorMut<'a, K, C>> for Cursor<'a, K, C> {
    fn from(cursor: CursorMut<'a, K, C>) -> Self {
        let CursorMut {
            set,
            current,
        } = cursor;
        Cursor::new(set, current)
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Cursor<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<K: fmt::Debug, C> fmt::Debug for CursorMut<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}

use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::comparator::{Comparator, NaturalOrder};
use crate::raw::{Handle, RawRBTree};

mod capacity;
mod cursor;

pub use cursor::{Cursor, CursorMut, Position};

/// An ordered set of unique keys based on a red-black tree.
///
/// Keys are kept in the order defined by the set's [`Comparator`], which is fixed when the set
/// is created. [`RBTreeSet::new`] orders by `<` and `==` through [`NaturalOrder`];
/// [`RBTreeSet::with_comparator`] accepts any other strategy, including closures. Two keys
/// that compare [`Equal`](core::cmp::Ordering::Equal) are duplicates, and only the first one
/// inserted is kept.
///
/// Insert, find and remove take O(log n) time.
///
/// Besides the usual iterators, a set hands out cursors. A [`Cursor`] sits on one element, or
/// on the *end* position just past the last element, and can be stepped in both directions.
/// Reading the key at `end()` or stepping past it panics. A cursor can be detached as a
/// [`Position`], which stays valid across later insertions and removals of *other* keys.
///
/// It is a logic error for a key to be modified in such a way that its ordering relative to any
/// other key changes while it is in the set. The behavior resulting from such a logic error is
/// not specified, but will be encapsulated to the `RBTreeSet` that observed it and not result in
/// undefined behavior.
///
/// # Examples
///
/// ```
/// use rbtree_set::RBTreeSet;
///
/// let mut set = RBTreeSet::new();
/// for key in [5, 3, 8, 1, 4] {
///     set.insert(key);
/// }
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
///
/// assert!(set.remove(&3));
/// assert_eq!(set.len(), 4);
/// assert!(set.find(&3).is_end());
///
/// let (inserted, cursor) = set.insert(5);
/// assert!(!inserted);
/// assert_eq!(*cursor.key(), 5);
/// ```
pub struct RBTreeSet<K, C = NaturalOrder> {
    tree: RawRBTree<K, C>,
}

/// An iterator over the keys of a `RBTreeSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeSet`].
///
/// # Examples
///
/// ```
/// use rbtree_set::RBTreeSet;
///
/// let set = RBTreeSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RBTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, C = NaturalOrder> {
    tree: &'a RawRBTree<K, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the keys of a `RBTreeSet`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RBTreeSet#method.into_iter
pub struct IntoIter<K> {
    inner: alloc::vec::IntoIter<K>,
}

impl<K> RBTreeSet<K> {
    /// Makes a new, empty `RBTreeSet` ordered by [`NaturalOrder`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set: RBTreeSet<i32> = RBTreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, C> RBTreeSet<K, C> {
    /// Makes a new, empty `RBTreeSet` ordered by `compare`.
    ///
    /// The comparator cannot be replaced afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// set.extend([1, 2, 3]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(compare: C) -> Self {
        Self {
            tree: RawRBTree::new(compare),
        }
    }

    /// Returns the comparator that orders this set.
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the number of keys in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[doc(alias = "size")]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every key from the set.
    ///
    /// Every [`Position`] taken from this set before the call is invalidated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2, 3]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert!(set.begin() == set.end());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a cursor on the smallest key, or [`end`](Self::end) if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([2, 1]);
    /// let mut cursor = set.begin();
    /// assert_eq!(*cursor.key(), 1);
    /// cursor.move_next();
    /// cursor.move_next();
    /// assert!(cursor == set.end());
    /// ```
    pub fn begin(&self) -> Cursor<'_, K, C> {
        Cursor::new(self, self.tree.first())
    }

    /// Returns a cursor on the position one past the largest key.
    ///
    /// This cursor can be stepped backwards but never forwards, and holds no key.
    pub fn end(&self) -> Cursor<'_, K, C> {
        Cursor::new(self, None)
    }

    /// Like [`begin`](Self::begin), but the cursor can also modify the set.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, C> {
        let first = self.tree.first();
        CursorMut::new(self, first)
    }

    /// Like [`end`](Self::end), but the cursor can also modify the set.
    pub fn end_mut(&mut self) -> CursorMut<'_, K, C> {
        CursorMut::new(self, None)
    }

    /// Re-attaches a detached [`Position`] to this set.
    ///
    /// # Panics
    ///
    /// Panics if `position` was taken from a different set, or if the key it pointed at has since
    /// been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([10, 20, 30]);
    /// let twenty = set.find(&20).position();
    ///
    /// set.insert(25);
    /// set.remove(&10);
    ///
    /// let mut cursor = set.cursor_at(twenty);
    /// assert_eq!(*cursor.key(), 20);
    /// cursor.move_next();
    /// assert_eq!(*cursor.key(), 25);
    /// ```
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, K, C> {
        let current = self.resolve(position, "RBTreeSet::cursor_at");
        Cursor::new(self, current)
    }

    /// Like [`cursor_at`](Self::cursor_at), but the cursor can also modify the set.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`cursor_at`](Self::cursor_at).
    pub fn cursor_mut_at(&mut self, position: Position) -> CursorMut<'_, K, C> {
        let current = self.resolve(position, "RBTreeSet::cursor_mut_at");
        CursorMut::new(self, current)
    }

    fn resolve(&self, position: Position, method: &str) -> Option<Handle> {
        assert!(position.tree() == self.tree.id(), "`{method}()` - position belongs to another set!");
        let (handle, generation) = position.node()?;
        assert!(self.tree.is_live(handle, generation), "`{method}()` - position refers to a removed key!");
        Some(handle)
    }

    /// Returns a reference to the smallest key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|h| self.tree.key(h))
    }

    /// Returns a reference to the largest key, if any.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|h| self.tree.key(h))
    }

    /// Removes and returns the smallest key, if any.
    pub fn pop_first(&mut self) -> Option<K> {
        let first = self.tree.first()?;
        Some(self.tree.remove_handle(first))
    }

    /// Removes and returns the largest key, if any.
    pub fn pop_last(&mut self) -> Option<K> {
        let last = self.tree.last()?;
        Some(self.tree.remove_handle(last))
    }

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, C> {
        Iter {
            tree: &self.tree,
            front: self.tree.first(),
            back: self.tree.last(),
            remaining: self.tree.len(),
        }
    }
}

impl<K, C: Comparator<K>> RBTreeSet<K, C> {
    /// Adds a key to the set.
    ///
    /// Returns whether the key was newly inserted, together with a cursor on the key in the set.
    /// If an equal key was already present, the set is left unchanged and the cursor points at
    /// the key that was already there.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// let (inserted, cursor) = set.insert(2);
    /// assert!(inserted);
    /// let position = cursor.position();
    ///
    /// let (inserted, cursor) = set.insert(2);
    /// assert!(!inserted);
    /// assert_eq!(cursor.position(), position);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> (bool, CursorMut<'_, K, C>) {
        let (inserted, handle) = self.tree.insert(key);
        (inserted, CursorMut::new(self, Some(handle)))
    }

    /// Returns a cursor on the key equal to `key`, or [`end`](Self::end) if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3]);
    /// assert_eq!(*set.find(&2).key(), 2);
    /// assert!(set.find(&4) == set.end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find(&self, key: &K) -> Cursor<'_, K, C> {
        Cursor::new(self, self.tree.search(key))
    }

    /// Like [`find`](Self::find), but the cursor can also modify the set.
    pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K, C> {
        let found = self.tree.search(key);
        CursorMut::new(self, found)
    }

    /// Returns `true` if the set contains a key equal to `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.search(key).is_some()
    }

    /// Returns a reference to the key in the set equal to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&K> {
        self.tree.search(key).map(|h| self.tree.key(h))
    }

    /// Removes the key equal to `key`. Returns whether such a key was present.
    ///
    /// Positions and cursors on other keys are unaffected.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::from([1, 2]);
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[doc(alias = "erase")]
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.remove(key).is_some()
    }

    /// Removes and returns the key equal to `key`, if any.
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.tree.remove(key)
    }

    /// Returns a cursor on the first key that does not order before `key`, or `end()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.lower_bound(&20).get(), Some(&20));
    /// assert_eq!(set.lower_bound(&21).get(), Some(&30));
    /// assert!(set.lower_bound(&31).is_end());
    /// ```
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, C> {
        Cursor::new(self, self.tree.lower_bound(key))
    }

    /// Returns a cursor on the first key that orders after `key`, or `end()`.
    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K, C> {
        Cursor::new(self, self.tree.upper_bound(key))
    }
}

impl<K: Hash, C> Hash for RBTreeSet<K, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for key in self {
            key.hash(state);
        }
    }
}

impl<K: PartialEq, C> PartialEq for RBTreeSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for RBTreeSet<K, C> {}

impl<K: Clone, C: Clone> Clone for RBTreeSet<K, C> {
    fn clone(&self) -> Self {
        RBTreeSet {
            tree: self.tree.clone(),
        }
    }

    /// Clears `self`, then copies every key of `source` into it.
    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<K: fmt::Debug, C> fmt::Debug for RBTreeSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C: Default> Default for RBTreeSet<K, C> {
    fn default() -> Self {
        RBTreeSet::with_comparator(C::default())
    }
}

impl<K, C: Comparator<K> + Default> FromIterator<K> for RBTreeSet<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = RBTreeSet::default();
        set.extend(iter);
        set
    }
}

impl<K, C: Comparator<K>> Extend<K> for RBTreeSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.tree.insert(key);
        }
    }
}

impl<'a, K: 'a + Copy, C: Comparator<K>> Extend<&'a K> for RBTreeSet<K, C> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        for &key in iter {
            self.tree.insert(key);
        }
    }
}

impl<K: PartialOrd, const N: usize> From<[K; N]> for RBTreeSet<K> {
    /// Converts a `[K; N]` into a `RBTreeSet<K>`. Later duplicates are dropped.
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set1 = RBTreeSet::from([1, 2, 3, 4]);
    /// let set2: RBTreeSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [K; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, C> IntoIterator for RBTreeSet<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Gets an iterator for moving out the `RBTreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<K> {
        IntoIter {
            inner: self.tree.into_sorted_vec().into_iter(),
        }
    }
}

impl<'a, K, C> IntoIterator for &'a RBTreeSet<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, C>;

    fn into_iter(self) -> Iter<'a, K, C> {
        self.iter()
    }
}

impl<'a, K, C> Iterator for Iter<'a, K, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(h);
        Some(self.tree.key(h))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a K> {
        self.next_back()
    }
}

impl<'a, K, C> DoubleEndedIterator for Iter<'a, K, C> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(h);
        Some(self.tree.key(h))
    }
}

impl<K, C> ExactSizeIterator for Iter<'_, K, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, C> FusedIterator for Iter<'_, K, C> {}

impl<K, C> Clone for Iter<'_, K, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Iter<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K: fmt::Debug> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K> Default for IntoIter<K> {
    /// Creates an empty `rbtree_set::IntoIter`.
    ///
    /// ```
    /// # use rbtree_set::rbtree_set;
    /// let iter: rbtree_set::IntoIter<u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter {
            inner: alloc::vec::Vec::new().into_iter(),
        }
    }
}

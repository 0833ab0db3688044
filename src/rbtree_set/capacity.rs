use super::RBTreeSet;
use crate::comparator::NaturalOrder;
use crate::raw::RawRBTree;

impl<K> RBTreeSet<K> {
    /// Creates an empty set with room for at least `capacity` keys before it reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let set: RBTreeSet<i32> = RBTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, C> RBTreeSet<K, C> {
    /// Creates an empty set ordered by `compare`, with room for at least `capacity` keys.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, compare: C) -> Self {
        RBTreeSet {
            tree: RawRBTree::with_capacity(capacity, compare),
        }
    }

    /// Returns how many keys the set can hold without reallocating.
    ///
    /// Removing keys does not shrink the capacity; freed slots are reused by later insertions.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_set::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::with_capacity(32);
    /// set.extend(0..32);
    /// set.clear();
    /// assert!(set.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}

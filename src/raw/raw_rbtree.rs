use alloc::vec::Vec;
use core::cmp::Ordering;
use core::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use super::arena::Arena;
use super::handle::{Generation, Handle};
use super::node::{Color, Node};
use crate::comparator::Comparator;

/// Process-unique identity of a tree, used to reject positions taken from another set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct TreeId(usize);

impl TreeId {
    fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// The red-black tree backing `RBTreeSet`.
pub(crate) struct RawRBTree<K, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of keys in the tree.
    len: usize,
    /// Ordering used for every descent. Fixed for the life of the tree.
    compare: C,
    id: TreeId,
}

impl<K, C> RawRBTree<K, C> {
    /// Creates a new, empty tree ordered by `compare`.
    pub(crate) fn new(compare: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            compare,
            id: TreeId::next(),
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, compare: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            compare,
            id: TreeId::next(),
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.compare
    }

    pub(crate) const fn id(&self) -> TreeId {
        self.id
    }

    /// Releases every node. Handles issued before the call never resolve again.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        debug_assert!(self.nodes.is_empty());
    }

    #[inline]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    /// Generation under which the node at `handle` was allocated.
    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.nodes.generation(handle)
    }

    /// Returns `true` if `handle` still names the node allocated under `generation`.
    pub(crate) fn is_live(&self, handle: Handle, generation: Generation) -> bool {
        self.nodes.is_live(handle, generation)
    }

    #[inline]
    fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut Node<K> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).parent()
    }

    #[inline]
    fn left(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).left()
    }

    #[inline]
    fn right(&self, handle: Handle) -> Option<Handle> {
        self.node(handle).right()
    }

    /// Color of a possibly-absent node. Absent nodes are black leaves.
    #[inline]
    fn color(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |h| self.node(h).color())
    }

    #[inline]
    fn is_red(&self, handle: Option<Handle>) -> bool {
        self.color(handle) == Color::Red
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).set_color(color);
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.left(handle) {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.right(handle) {
            handle = right;
        }
        handle
    }

    /// Handle of the smallest key, if any.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Handle of the largest key, if any.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// In-order successor of `handle`; `None` past the largest key.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.right(handle) {
            return Some(self.leftmost(right));
        }
        let mut child = handle;
        while let Some(parent) = self.parent(child) {
            if self.left(parent) == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// In-order predecessor of `handle`; `None` before the smallest key.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.left(handle) {
            return Some(self.rightmost(left));
        }
        let mut child = handle;
        while let Some(parent) = self.parent(child) {
            if self.right(parent) == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// Points `parent`'s link to `old` (or the root, for no parent) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(p) => self.node_mut(p).replace_child(old, new),
            None => self.root = new,
        }
    }

    //
    //     p                  p
    //     |                  |
    //     x         -->      y
    //    / \                / \
    //   a   y              x   c
    //      / \            / \
    //     b   c          a   b
    //
    fn rotate_left(&mut self, x: Handle) {
        let y = self.right(x).expect("`RawRBTree::rotate_left()` - node has no right child!");
        let b = self.left(y);
        self.node_mut(x).set_right(b);
        if let Some(b) = b {
            self.node_mut(b).set_parent(Some(x));
        }
        let p = self.parent(x);
        self.node_mut(y).set_parent(p);
        self.replace_child(p, x, Some(y));
        self.node_mut(y).set_left(Some(x));
        self.node_mut(x).set_parent(Some(y));
    }

    // Mirror image of `rotate_left`.
    fn rotate_right(&mut self, x: Handle) {
        let y = self.left(x).expect("`RawRBTree::rotate_right()` - node has no left child!");
        let b = self.right(y);
        self.node_mut(x).set_left(b);
        if let Some(b) = b {
            self.node_mut(b).set_parent(Some(x));
        }
        let p = self.parent(x);
        self.node_mut(y).set_parent(p);
        self.replace_child(p, x, Some(y));
        self.node_mut(y).set_right(Some(x));
        self.node_mut(x).set_parent(Some(y));
    }

    /// Puts the subtree `new` where `old` hangs from its parent. `old`'s own links are untouched.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.parent(old);
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.node_mut(new).set_parent(parent);
        }
    }

    fn insert_fixup(&mut self, mut z: Handle) {
        while let Some(p) = self.parent(z)
            && self.is_red(Some(p))
        {
            // A red node is never the root, so `p` has a parent.
            let Some(g) = self.parent(p) else {
                break;
            };
            if self.left(g) == Some(p) {
                let uncle = self.right(g);
                if let Some(u) = uncle
                    && self.is_red(uncle)
                {
                    self.set_color(p, Color::Black);
                    self.set_color(u, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    let (child, parent) = if self.right(p) == Some(z) {
                        self.rotate_left(p);
                        (p, z)
                    } else {
                        (z, p)
                    };
                    self.set_color(parent, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                    z = child;
                }
            } else {
                let uncle = self.left(g);
                if let Some(u) = uncle
                    && self.is_red(uncle)
                {
                    self.set_color(p, Color::Black);
                    self.set_color(u, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    let (child, parent) = if self.left(p) == Some(z) {
                        self.rotate_right(p);
                        (p, z)
                    } else {
                        (z, p)
                    };
                    self.set_color(parent, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                    z = child;
                }
            }
        }
        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Unlinks and frees the node at `z`, returning its key.
    ///
    /// A node with two children is replaced by relinking its successor node into its place.
    /// Keys never move between nodes, so handles to every other node stay valid.
    pub(crate) fn remove_handle(&mut self, z: Handle) -> K {
        let (z_left, z_right) = (self.left(z), self.right(z));
        let removed_color;
        let x;
        let x_parent;

        match (z_left, z_right) {
            (None, _) => {
                removed_color = self.node(z).color();
                x = z_right;
                x_parent = self.parent(z);
                self.transplant(z, z_right);
            }
            (Some(_), None) => {
                removed_color = self.node(z).color();
                x = z_left;
                x_parent = self.parent(z);
                self.transplant(z, z_left);
            }
            (Some(l), Some(r)) => {
                let y = self.leftmost(r);
                removed_color = self.node(y).color();
                x = self.right(y);
                if self.parent(y) == Some(z) {
                    x_parent = Some(y);
                } else {
                    x_parent = self.parent(y);
                    self.transplant(y, x);
                    self.node_mut(y).set_right(Some(r));
                    self.node_mut(r).set_parent(Some(y));
                }
                self.transplant(z, Some(y));
                self.node_mut(y).set_left(Some(l));
                self.node_mut(l).set_parent(Some(y));
                let z_color = self.node(z).color();
                self.set_color(y, z_color);
            }
        }

        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }
        self.len -= 1;
        self.nodes.take(z).into_key()
    }

    /// Restores the black height after a black node was unlinked above `x`.
    ///
    /// `x` may be absent, so its parent is tracked separately.
    fn remove_fixup(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        while x != self.root && !self.is_red(x) {
            let Some(p) = parent else {
                break;
            };
            if self.left(p) == x {
                let mut w = self.right(p).expect("`RawRBTree::remove_fixup()` - sibling is missing!");
                if self.is_red(Some(w)) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_left(p);
                    w = self.right(p).expect("`RawRBTree::remove_fixup()` - sibling is missing!");
                }
                if !self.is_red(self.left(w)) && !self.is_red(self.right(w)) {
                    self.set_color(w, Color::Red);
                    x = Some(p);
                    parent = self.parent(p);
                } else {
                    if !self.is_red(self.right(w)) {
                        if let Some(wl) = self.left(w) {
                            self.set_color(wl, Color::Black);
                        }
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(p).expect("`RawRBTree::remove_fixup()` - sibling is missing!");
                    }
                    let p_color = self.node(p).color();
                    self.set_color(w, p_color);
                    self.set_color(p, Color::Black);
                    if let Some(wr) = self.right(w) {
                        self.set_color(wr, Color::Black);
                    }
                    self.rotate_left(p);
                    x = self.root;
                    parent = None;
                }
            } else {
                let mut w = self.left(p).expect("`RawRBTree::remove_fixup()` - sibling is missing!");
                if self.is_red(Some(w)) {
                    self.set_color(w, Color::Black);
                    self.set_color(p, Color::Red);
                    self.rotate_right(p);
                    w = self.left(p).expect("`RawRBTree::remove_fixup()` - sibling is missing!");
                }
                if !self.is_red(self.left(w)) && !self.is_red(self.right(w)) {
                    self.set_color(w, Color::Red);
                    x = Some(p);
                    parent = self.parent(p);
                } else {
                    if !self.is_red(self.left(w)) {
                        if let Some(wr) = self.right(w) {
                            self.set_color(wr, Color::Black);
                        }
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(p).expect("`RawRBTree::remove_fixup()` - sibling is missing!");
                    }
                    let p_color = self.node(p).color();
                    self.set_color(w, p_color);
                    self.set_color(p, Color::Black);
                    if let Some(wl) = self.left(w) {
                        self.set_color(wl, Color::Black);
                    }
                    self.rotate_right(p);
                    x = self.root;
                    parent = None;
                }
            }
        }
        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    /// Drains every key in ascending order, leaving the tree empty.
    pub(crate) fn into_sorted_vec(mut self) -> Vec<K> {
        let mut handles = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(h) = current {
            handles.push(h);
            current = self.successor(h);
        }
        let keys = handles.into_iter().map(|h| self.nodes.take(h).into_key()).collect();
        self.root = None;
        self.len = 0;
        keys
    }
}

impl<K, C: Comparator<K>> RawRBTree<K, C> {
    /// Searches for a key equal to `key` under the tree's comparator.
    pub(crate) fn search(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        while let Some(h) = current {
            current = match self.compare.compare(key, self.key(h)) {
                Ordering::Less => self.left(h),
                Ordering::Greater => self.right(h),
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    /// First node whose key is not less than `key`.
    pub(crate) fn lower_bound(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        let mut candidate = None;
        while let Some(h) = current {
            if self.compare.compare(self.key(h), key) == Ordering::Less {
                current = self.right(h);
            } else {
                candidate = Some(h);
                current = self.left(h);
            }
        }
        candidate
    }

    /// First node whose key is greater than `key`.
    pub(crate) fn upper_bound(&self, key: &K) -> Option<Handle> {
        let mut current = self.root;
        let mut candidate = None;
        while let Some(h) = current {
            if self.compare.compare(self.key(h), key) == Ordering::Greater {
                candidate = Some(h);
                current = self.left(h);
            } else {
                current = self.right(h);
            }
        }
        candidate
    }

    /// Inserts `key` unless an equal key is present.
    ///
    /// Returns `(true, new)` after linking a new node, or `(false, existing)` without touching
    /// the tree.
    pub(crate) fn insert(&mut self, key: K) -> (bool, Handle) {
        let mut parent = None;
        let mut ordering = Ordering::Equal;
        let mut current = self.root;
        while let Some(h) = current {
            ordering = self.compare.compare(&key, self.key(h));
            current = match ordering {
                Ordering::Less => self.left(h),
                Ordering::Greater => self.right(h),
                Ordering::Equal => return (false, h),
            };
            parent = Some(h);
        }

        let z = self.nodes.alloc(Node::new(key, parent));
        match parent {
            Some(p) if ordering == Ordering::Less => self.node_mut(p).set_left(Some(z)),
            Some(p) => self.node_mut(p).set_right(Some(z)),
            None => self.root = Some(z),
        }
        self.len += 1;
        self.insert_fixup(z);
        (true, z)
    }

    /// Removes the key equal to `key`, if present.
    pub(crate) fn remove(&mut self, key: &K) -> Option<K> {
        let h = self.search(key)?;
        Some(self.remove_handle(h))
    }
}

impl<K: Clone, C: Clone> Clone for RawRBTree<K, C> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
            compare: self.compare.clone(),
            id: TreeId::next(),
        }
    }

    // Slot generations are copied from `source`, so the old id must go too.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.nodes.clone_from(&source.nodes);
        self.root = source.root;
        self.len = source.len;
        self.compare.clone_from(&source.compare);
        self.id = TreeId::next();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::uninlined_format_args, clippy::manual_assert)]
mod tests {
    use super::*;
    use crate::comparator::{NaturalOrder, Reverse};
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use proptest::prelude::*;

    impl<K: core::fmt::Debug, C: Comparator<K>> RawRBTree<K, C> {
        /// Validates all red-black tree invariants. Panics with a descriptive message if any are
        /// violated. This is intended for use in tests to catch tree corruption.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            let Some(root) = self.root else {
                assert_eq!(self.len, 0, "Empty tree should have len 0");
                assert!(self.nodes.is_empty(), "Empty tree should have no live nodes");
                return;
            };

            if self.node(root).color() != Color::Black {
                errors.push("Root is not black".into());
            }
            if self.parent(root).is_some() {
                errors.push(alloc::format!("Root {:?} has a parent", root));
            }

            let mut count = 0;
            self.validate_node(root, &mut count, &mut errors);

            if count != self.len {
                errors.push(alloc::format!("len mismatch: self.len={}, actual count={}", self.len, count));
            }
            if count != self.nodes.len() {
                errors.push(alloc::format!("arena mismatch: reachable={}, live slots={}", count, self.nodes.len()));
            }

            // In-order walk through `successor` must be strictly ascending.
            let mut current = self.first();
            let mut walked = 0;
            while let Some(h) = current {
                walked += 1;
                let next = self.successor(h);
                if let Some(n) = next
                    && self.compare.compare(self.key(h), self.key(n)) != Ordering::Less
                {
                    errors.push(alloc::format!("Keys not ascending: {:?} then {:?}", self.key(h), self.key(n)));
                }
                if let Some(n) = next
                    && self.predecessor(n) != Some(h)
                {
                    errors.push(alloc::format!("predecessor({:?}) is not {:?}", n, h));
                }
                current = next;
            }
            if walked != self.len {
                errors.push(alloc::format!("successor walk visited {} of {} nodes", walked, self.len));
            }

            assert!(errors.is_empty(), "Tree invariant violations:\n{}", errors.join("\n"));
        }

        // Returns the black height of the subtree rooted at `handle`.
        fn validate_node(&self, handle: Handle, count: &mut usize, errors: &mut Vec<String>) -> usize {
            *count += 1;
            let node = self.node(handle);

            for child in [node.left(), node.right()].into_iter().flatten() {
                if self.parent(child) != Some(handle) {
                    errors.push(alloc::format!("Child {:?} does not link back to parent {:?}", child, handle));
                }
                if node.color() == Color::Red && self.is_red(Some(child)) {
                    errors.push(alloc::format!("Red node {:?} has red child {:?}", handle, child));
                }
            }
            if let Some(l) = node.left()
                && self.compare.compare(self.key(l), node.key()) != Ordering::Less
            {
                errors.push(alloc::format!("Left child {:?} not less than {:?}", self.key(l), node.key()));
            }
            if let Some(r) = node.right()
                && self.compare.compare(self.key(r), node.key()) != Ordering::Greater
            {
                errors.push(alloc::format!("Right child {:?} not greater than {:?}", self.key(r), node.key()));
            }

            let left_height = node.left().map_or(1, |l| self.validate_node(l, count, errors));
            let right_height = node.right().map_or(1, |r| self.validate_node(r, count, errors));
            if left_height != right_height {
                errors.push(alloc::format!(
                    "Black height mismatch at {:?}: left={}, right={}",
                    handle,
                    left_height,
                    right_height
                ));
            }
            left_height + usize::from(node.color() == Color::Black)
        }

        fn keys(&self) -> Vec<&K> {
            let mut keys = Vec::with_capacity(self.len);
            let mut current = self.first();
            while let Some(h) = current {
                keys.push(self.key(h));
                current = self.successor(h);
            }
            keys
        }

        fn height(&self) -> usize {
            fn walk<K, C>(tree: &RawRBTree<K, C>, handle: Option<Handle>) -> usize {
                handle.map_or(0, |h| 1 + walk(tree, tree.left(h)).max(walk(tree, tree.right(h))))
            }
            walk(self, self.root)
        }
    }

    #[test]
    fn insert_find_erase_scenario() {
        let mut tree = RawRBTree::new(NaturalOrder);
        for key in [5, 3, 8, 1, 4] {
            assert!(tree.insert(key).0);
            tree.validate_invariants();
        }
        assert_eq!(tree.keys(), [&1, &3, &4, &5, &8]);

        assert_eq!(tree.remove(&3), Some(3));
        assert_eq!(tree.remove(&3), None);
        tree.validate_invariants();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.search(&3), None);

        let existing = tree.search(&5).unwrap();
        assert_eq!(tree.insert(5), (false, existing));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn successor_and_predecessor_at_the_edges() {
        let mut tree = RawRBTree::new(NaturalOrder);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);

        let (_, only) = tree.insert(7);
        assert_eq!(tree.first(), Some(only));
        assert_eq!(tree.last(), Some(only));
        assert_eq!(tree.successor(only), None);
        assert_eq!(tree.predecessor(only), None);

        for key in 0..32 {
            tree.insert(key);
        }
        let first = tree.first().unwrap();
        let last = tree.last().unwrap();
        assert_eq!(*tree.key(first), 0);
        assert_eq!(*tree.key(last), 31);
        assert_eq!(tree.predecessor(first), None);
        assert_eq!(tree.successor(last), None);
    }

    #[test]
    fn bounds() {
        let mut tree = RawRBTree::new(NaturalOrder);
        for key in (0..20).step_by(2) {
            tree.insert(key);
        }
        let key_of = |h: Option<Handle>| h.map(|h| *tree.key(h));
        assert_eq!(key_of(tree.lower_bound(&4)), Some(4));
        assert_eq!(key_of(tree.lower_bound(&5)), Some(6));
        assert_eq!(key_of(tree.upper_bound(&4)), Some(6));
        assert_eq!(key_of(tree.lower_bound(&-1)), Some(0));
        assert_eq!(key_of(tree.lower_bound(&19)), None);
        assert_eq!(key_of(tree.upper_bound(&18)), None);
    }

    #[test]
    fn sequential_inserts_stay_balanced() {
        let mut tree = RawRBTree::new(NaturalOrder);
        for key in 0..1024 {
            tree.insert(key);
        }
        tree.validate_invariants();
        // A red-black tree with n nodes has height at most 2 * log2(n + 1).
        assert!(tree.height() <= 20, "height {} too large", tree.height());
    }

    #[test]
    fn removal_relinks_instead_of_moving_keys() {
        let mut tree = RawRBTree::new(NaturalOrder);
        let handles: Vec<_> = (0..64).map(|key| (key, tree.insert(key).1)).collect();

        // Removing interior nodes (two children) must leave every other handle on its key.
        for key in (0..64).step_by(3) {
            tree.remove(&key);
            tree.validate_invariants();
        }
        for (key, handle) in handles {
            if key % 3 != 0 {
                assert_eq!(*tree.key(handle), key);
                assert!(tree.is_live(handle, tree.generation(handle)));
            }
        }
    }

    #[test]
    fn clear_expires_handles() {
        let mut tree = RawRBTree::new(NaturalOrder);
        let (_, h) = tree.insert(1);
        let generation = tree.generation(h);
        tree.clear();
        tree.validate_invariants();
        assert!(!tree.is_live(h, generation));
        tree.insert(2);
        assert!(!tree.is_live(h, generation));
    }

    #[test]
    fn clone_is_independent_and_renamed() {
        let mut tree = RawRBTree::new(NaturalOrder);
        for key in 0..10 {
            tree.insert(key);
        }
        let mut copy = tree.clone();
        assert_ne!(copy.id(), tree.id());
        copy.remove(&4);
        copy.insert(100);
        copy.validate_invariants();
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.search(&4).map(|h| *tree.key(h)), Some(4));
        assert_eq!(tree.search(&100), None);

        let mut target = RawRBTree::new(NaturalOrder);
        target.insert(-1);
        let target_id = target.id();
        target.clone_from(&copy);
        target.validate_invariants();
        assert_ne!(target.id(), target_id);
        assert_ne!(target.id(), copy.id());
        assert_eq!(target.keys(), copy.keys());
    }

    #[test]
    fn into_sorted_vec_drains_in_order() {
        let mut tree = RawRBTree::new(Reverse(NaturalOrder));
        for key in [3, 9, 1, 7] {
            tree.insert(key);
        }
        assert_eq!(tree.into_sorted_vec(), [9, 7, 3, 1]);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0i32..1000).prop_map(Op::Insert),
            2 => (0i32..1000).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn tree_invariants_maintained_after_operations(ops in prop::collection::vec(op_strategy(), 0..500)) {
            let mut tree = RawRBTree::new(NaturalOrder);
            let mut model = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        let (inserted, h) = tree.insert(key);
                        prop_assert_eq!(inserted, model.insert(key));
                        prop_assert_eq!(*tree.key(h), key);
                    }
                    Op::Remove(key) => {
                        prop_assert_eq!(tree.remove(&key), model.take(&key));
                    }
                }
                tree.validate_invariants();
            }

            let expected: Vec<&i32> = model.iter().collect();
            prop_assert_eq!(tree.keys(), expected);
        }

        #[test]
        fn handles_survive_unrelated_mutations(
            keys in prop::collection::btree_set(0i32..500, 1..200),
            ops in prop::collection::vec(op_strategy(), 0..200),
        ) {
            let mut tree = RawRBTree::new(NaturalOrder);
            for &key in &keys {
                tree.insert(key);
            }
            let pinned = *keys.iter().next().unwrap();
            let handle = tree.search(&pinned).unwrap();
            let generation = tree.generation(handle);

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        tree.insert(key);
                    }
                    Op::Remove(key) if key != pinned => {
                        tree.remove(&key);
                    }
                    Op::Remove(_) => {}
                }
                prop_assert!(tree.is_live(handle, generation));
                prop_assert_eq!(*tree.key(handle), pinned);
                let expected_next = tree.upper_bound(&pinned);
                prop_assert_eq!(tree.successor(handle), expected_next);
            }
        }
    }
}

use super::handle::Handle;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A red-black tree node. Links are arena handles; `None` plays the role of a black leaf.
#[derive(Clone)]
pub(crate) struct Node<K> {
    key: K,
    color: Color,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K> Node<K> {
    /// Creates a detached red node, ready to be linked under `parent`.
    pub(crate) const fn new(key: K, parent: Option<Handle>) -> Self {
        Self {
            key,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) const fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Replaces whichever child link currently holds `old` with `new`.
    pub(crate) fn replace_child(&mut self, old: Handle, new: Option<Handle>) {
        if self.left == Some(old) {
            self.left = new;
        } else {
            debug_assert_eq!(self.right, Some(old), "`Node::replace_child()` - `old` is not a child!");
            self.right = new;
        }
    }
}

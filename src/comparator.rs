//! Ordering strategies for [`RBTreeSet`](crate::RBTreeSet).
//!
//! A set is ordered by a [`Comparator`] chosen when the set is built. It cannot be swapped out
//! later; the tree layout depends on it.

use core::cmp::Ordering;

/// A three-way comparison over keys of type `K`.
///
/// Implementations must describe a strict total order and must give the same answer for the
/// same pair of keys for as long as any set uses them. Two keys are considered duplicates when
/// `compare` returns [`Ordering::Equal`].
///
/// Closures of the form `Fn(&K, &K) -> Ordering` implement this trait.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use rbtree_set::{Comparator, RBTreeSet};
///
/// struct ByLength;
///
/// impl Comparator<str> for ByLength {
///     fn compare(&self, a: &str, b: &str) -> Ordering {
///         a.len().cmp(&b.len())
///     }
/// }
///
/// let mut words = RBTreeSet::with_comparator(|a: &&str, b: &&str| ByLength.compare(a, b));
/// words.insert("three");
/// words.insert("to");
/// assert!(!words.insert("at").0); // same length as "to"
/// assert_eq!(words.iter().copied().collect::<Vec<_>>(), ["to", "three"]);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Returns how `a` orders relative to `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The default ordering: `a < b` is `Less`, `a == b` is `Equal`, anything else is `Greater`.
///
/// Only [`PartialOrd`] is required, so the caller is responsible for not storing values that
/// break totality (such as `NaN`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<K: ?Sized + PartialOrd> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        if a < b {
            Ordering::Less
        } else if a == b {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }
}

/// Reverses the ordering of the wrapped comparator.
///
/// ```
/// use rbtree_set::{NaturalOrder, RBTreeSet, Reverse};
///
/// let set = {
///     let mut set = RBTreeSet::with_comparator(Reverse(NaturalOrder));
///     set.extend([1, 3, 2]);
///     set
/// };
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

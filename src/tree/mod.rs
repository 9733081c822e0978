//! Persistent (immutable) AVL tree.
//!
//! This module provides [`PersistentAvlTree`], an immutable ordered map that
//! uses structural sharing for efficient operations.
//!
//! # Overview
//!
//! `PersistentAvlTree` is a height-balanced binary search tree. Keys are
//! ordered by a [`Comparator`] chosen when the tree is created.
//!
//! - O(log N) find, insert, update, remove
//! - O(log N) min/max
//! - O(log N + k) range queries where k is the number of results
//! - O(N log N) set algebra (union, intersection, difference)
//! - O(1) clone, len and `is_empty`
//!
//! Every operation returns a new tree without modifying the original. The
//! new tree rebuilds only the path from the root to the change and shares
//! everything else with the old one.
//!
//! # Examples
//!
//! ```rust
//! use persistent_avl::PersistentAvlTree;
//!
//! let tree: PersistentAvlTree<i32, &str> =
//!     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
//!
//! // Entries are always in sorted order
//! let keys: Vec<&i32> = tree.keys().collect();
//! assert_eq!(keys, vec![&1, &2, &3]);
//!
//! // Removing returns a new version
//! let smaller = tree.remove(&2);
//! assert_eq!(tree.len(), 3);
//! assert_eq!(smaller.len(), 2);
//! ```
//!
//! # Internal Structure
//!
//! Every node caches its height (a leaf has height 0, the empty tree -1) and
//! the tree maintains:
//! 1. The heights of the two children of any node differ by at most one
//! 2. Every key in a left subtree orders before its parent's key
//! 3. Every key in a right subtree orders after its parent's key
//! 4. Keys are unique
//!
//! These invariants keep the height below 1.45 log2(N + 2).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use crate::comparator::{Comparator, NaturalOrder};

mod insert;
mod node;
mod remove;
mod rotation;
mod search;
mod set_ops;
mod traversal;

#[cfg(feature = "serde")]
mod serialization;

#[cfg(test)]
pub(crate) mod fixtures;

use node::Link;

pub use node::Node;
pub use traversal::{
    PersistentAvlTreeIntoIterator, PersistentAvlTreeIterator, PersistentAvlTreeRangeIterator,
};

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(PersistentAvlTree<i32, String>: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(PersistentAvlTree<i32, String>: Send, Sync);

// =============================================================================
// PersistentAvlTree Definition
// =============================================================================

/// A persistent (immutable) ordered map based on an AVL tree.
///
/// `PersistentAvlTree` is an immutable data structure that uses structural
/// sharing to efficiently support functional programming patterns.
///
/// Keys are ordered by the comparator `C`, which defaults to
/// [`NaturalOrder`]. Trees derived from one another (by insertion, removal,
/// or set operations) carry the same comparator.
///
/// # Time Complexity
///
/// | Operation            | Complexity        |
/// |----------------------|-------------------|
/// | `new`                | O(1)              |
/// | `find` / `get`       | O(log N)          |
/// | `insert` / `update`  | O(log N)          |
/// | `remove`             | O(log N)          |
/// | `min` / `max`        | O(log N)          |
/// | `range`              | O(log N + k)      |
/// | `union` and friends  | O(M log (N + M))  |
/// | `len` / `is_empty`   | O(1)              |
///
/// # Examples
///
/// ```rust
/// use persistent_avl::PersistentAvlTree;
///
/// let tree = PersistentAvlTree::singleton(42, "answer");
/// assert_eq!(tree.get(&42), Some(&"answer"));
///
/// // Duplicate keys are rejected by `insert`
/// assert!(tree.insert(42, "question").is_err());
///
/// // `update` inserts or replaces
/// let tree = tree.update(42, "question").update(7, "seven");
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree.min().map(|node| node.entry()), Some((&7, &"seven")));
/// ```
pub struct PersistentAvlTree<K, V, C = NaturalOrder> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of entries
    length: usize,
    /// Key ordering shared by every derived tree
    comparator: C,
}

impl<K, V> PersistentAvlTree<K, V> {
    /// Creates a new empty tree ordered by [`NaturalOrder`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, String> = PersistentAvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[doc(alias = "empty")]
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates a tree containing a single key-value pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::singleton(42, "answer");
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.get(&42), Some(&"answer"));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::from_parts(
            Some(ReferenceCounter::new(Node::leaf(key, value))),
            1,
            NaturalOrder,
        )
    }
}

impl<K, V, C> PersistentAvlTree<K, V, C> {
    /// Creates a new empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    /// use std::cmp::Ordering;
    ///
    /// fn by_length(left: &String, right: &String) -> Ordering {
    ///     left.len().cmp(&right.len()).then_with(|| left.cmp(right))
    /// }
    ///
    /// let tree = PersistentAvlTree::with_comparator(by_length as fn(&String, &String) -> Ordering)
    ///     .update("ccc".to_string(), 3)
    ///     .update("a".to_string(), 1)
    ///     .update("bb".to_string(), 2);
    ///
    /// let keys: Vec<&String> = tree.keys().collect();
    /// assert_eq!(keys, vec!["a", "bb", "ccc"]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self::from_parts(None, 0, comparator)
    }

    pub(crate) const fn from_parts(root: Link<K, V>, length: usize, comparator: C) -> Self {
        Self {
            root,
            length,
            comparator,
        }
    }

    /// Returns a tree over `root` that keeps this tree's comparator.
    fn with_root(&self, root: Link<K, V>, length: usize) -> Self
    where
        C: Clone,
    {
        Self::from_parts(root, length, self.comparator.clone())
    }

    /// Returns an empty tree with this tree's comparator.
    fn empty_like<W>(&self) -> PersistentAvlTree<K, W, C>
    where
        C: Clone,
    {
        PersistentAvlTree::with_comparator(self.comparator.clone())
    }

    /// Returns the number of entries in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the tree contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the height of the tree: -1 when empty, 0 for a single entry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, ()> = (0..7).map(|key| (key, ())).collect();
    /// assert_eq!(tree.height(), 2);
    /// assert_eq!(PersistentAvlTree::<i32, ()>::new().height(), -1);
    /// ```
    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        node::link_height(&self.root)
    }

    /// Returns the root node, or `None` if the tree is empty.
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Returns the comparator ordering this tree.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns `true` if both trees share the same root allocation.
    ///
    /// This is the cheap, physical notion of equality: two trees built
    /// independently never share a root even when they hold the same entries.
    /// Two empty trees are always `ptr_eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::singleton(1, "one");
    /// assert!(tree.ptr_eq(&tree.clone()));
    /// assert!(tree.ptr_eq(&tree.remove(&2)));
    /// assert!(!tree.ptr_eq(&PersistentAvlTree::singleton(1, "one")));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V, C: Clone> Clone for PersistentAvlTree<K, V, C> {
    #[inline]
    fn clone(&self) -> Self {
        Self::from_parts(self.root.clone(), self.length, self.comparator.clone())
    }
}

impl<K, V, C: Default> Default for PersistentAvlTree<K, V, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> FromIterator<(K, V)> for PersistentAvlTree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone + Default,
{
    /// Builds a tree from entries; a later entry replaces an earlier one
    /// with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C> Extend<(K, V)> for PersistentAvlTree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            *self = self.update(key, value);
        }
    }
}

impl<K, V, C> PartialEq for PersistentAvlTree<K, V, C>
where
    C: Comparator<K>,
    V: PartialEq,
{
    /// Compares contents regardless of shape; see
    /// [`structural_equal`](PersistentAvlTree::structural_equal).
    fn eq(&self, other: &Self) -> bool {
        self.structural_equal(other)
    }
}

impl<K, V: Eq, C: Comparator<K>> Eq for PersistentAvlTree<K, V, C> {}

// No `Ord` impl: `Ord::min`/`Ord::max` take `self` by value and would shadow
// the inherent `min`/`max` lookups in method-call syntax.
impl<K, V: Ord, C: Comparator<K>> PartialOrd for PersistentAvlTree<K, V, C> {
    /// Orders trees lexicographically by their in-order entries; see
    /// [`lexicographic_compare`](PersistentAvlTree::lexicographic_compare).
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.lexicographic_compare(other))
    }
}

/// Hashes the length, then every entry in key order.
///
/// Trees holding the same entries hash equally whatever their shape, which
/// keeps `Hash` consistent with `Eq` for comparators that agree with `K`'s
/// own equality.
impl<K: Hash, V: Hash, C> Hash for PersistentAvlTree<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for (key, value) in self {
            key.hash(state);
            value.hash(state);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for PersistentAvlTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for PersistentAvlTree<K, V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(all(test, feature = "arc"))]
mod send_sync_tests {
    use super::*;
    use rstest::rstest;

    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}

    #[rstest]
    fn test_tree_is_send() {
        assert_send::<PersistentAvlTree<i32, String>>();
        assert_send::<PersistentAvlTree<String, i32>>();
    }

    #[rstest]
    fn test_tree_is_sync() {
        assert_sync::<PersistentAvlTree<i32, String>>();
        assert_sync::<PersistentAvlTree<String, i32>>();
    }
}

//! Folds and in-order iterators.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use smallvec::SmallVec;

use super::PersistentAvlTree;
use super::node::{Link, Node};
use crate::comparator::Comparator;

/// Iterators keep their stack inline up to this depth. An AVL tree this tall
/// holds over ten billion entries.
const STACK_CAPACITY: usize = 48;

impl<K, V, C> PersistentAvlTree<K, V, C> {
    /// Folds the tree bottom-up, following its shape.
    ///
    /// `on_empty` supplies the result for every empty subtree. `combine`
    /// receives the results of the left and right subtrees, then the node's
    /// key and value. Subtrees are visited left before right, and a node
    /// after both of its children.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, i32> = (1..=7).map(|key| (key, key * 10)).collect();
    ///
    /// let sum = tree.fold(|| 0, |left, right, _, value| left + right + value);
    /// assert_eq!(sum, 280);
    ///
    /// let height = tree.fold(|| -1, |left: i32, right, _, _| 1 + left.max(right));
    /// assert_eq!(height, tree.height());
    /// ```
    pub fn fold<R, E, F>(&self, mut on_empty: E, mut combine: F) -> R
    where
        E: FnMut() -> R,
        F: FnMut(R, R, &K, &V) -> R,
    {
        fn go<K, V, R, E, F>(node: Option<&Node<K, V>>, on_empty: &mut E, combine: &mut F) -> R
        where
            E: FnMut() -> R,
            F: FnMut(R, R, &K, &V) -> R,
        {
            match node {
                None => on_empty(),
                Some(node) => {
                    let left = go(node.left(), on_empty, combine);
                    let right = go(node.right(), on_empty, combine);
                    combine(left, right, &node.key, &node.value)
                }
            }
        }
        go(self.root(), &mut on_empty, &mut combine)
    }

    /// Folds the entries in key order, left to right.
    ///
    /// # Complexity
    ///
    /// O(N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, char> = [(2, 'b'), (3, 'c'), (1, 'a')].into_iter().collect();
    ///
    /// let word = tree.fold_in_order(String::new(), |mut word, _, letter| {
    ///     word.push(*letter);
    ///     word
    /// });
    /// assert_eq!(word, "abc");
    /// ```
    pub fn fold_in_order<R, F>(&self, init: R, mut combine: F) -> R
    where
        F: FnMut(R, &K, &V) -> R,
    {
        self.iter()
            .fold(init, |accumulator, (key, value)| combine(accumulator, key, value))
    }

    /// Returns an iterator over entries in sorted key order.
    ///
    /// The iterator is lazy: it holds a stack of at most `height + 1`
    /// nodes and visits each node once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, &str> =
    ///     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    ///
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.len(), 3);
    /// assert_eq!(iter.next(), Some((&1, &"one")));
    /// assert_eq!(iter.len(), 2);
    /// ```
    #[must_use]
    pub fn iter(&self) -> PersistentAvlTreeIterator<'_, K, V> {
        let mut iterator = PersistentAvlTreeIterator {
            stack: SmallVec::new(),
            remaining: self.length,
        };
        iterator.push_left_spine(self.root());
        iterator
    }

    /// Returns an iterator over keys in sorted order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, &str> =
    ///     [(3, "three"), (1, "one"), (2, "two")].into_iter().collect();
    ///
    /// let keys: Vec<&i32> = tree.keys().collect();
    /// assert_eq!(keys, vec![&1, &2, &3]);
    /// ```
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in key order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    ///
    /// let sum: i32 = tree.values().sum();
    /// assert_eq!(sum, 60);
    /// ```
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over entries within the specified range.
    ///
    /// The range is specified using Rust's range syntax:
    /// - `a..b` - from a (inclusive) to b (exclusive)
    /// - `a..=b` - from a (inclusive) to b (inclusive)
    /// - `a..` - from a (inclusive) to the end
    /// - `..b` - from the start to b (exclusive)
    /// - `..` - all entries
    ///
    /// Bounds are compared with the tree's comparator, so a reversed tree
    /// takes its ranges in reversed order too.
    ///
    /// # Complexity
    ///
    /// O(log N + k) where k is the number of entries in the range
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, i32> = (1..=5).map(|key| (key, key * key)).collect();
    ///
    /// let range: Vec<(&i32, &i32)> = tree.range(2..=4).collect();
    /// assert_eq!(range, vec![(&2, &4), (&3, &9), (&4, &16)]);
    /// ```
    pub fn range<R, Q>(&self, range: R) -> PersistentAvlTreeRangeIterator<'_, K, V>
    where
        R: RangeBounds<Q>,
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut entries = Vec::new();
        collect_range(self.root(), &range, &self.comparator, &mut entries);
        PersistentAvlTreeRangeIterator {
            entries: entries.into_iter(),
        }
    }
}

/// Pushes the in-range entries of a subtree, skipping subtrees that lie
/// wholly outside the bounds.
fn collect_range<'a, K, V, R, Q, C>(
    node: Option<&'a Node<K, V>>,
    range: &R,
    comparator: &C,
    entries: &mut Vec<(&'a K, &'a V)>,
) where
    R: RangeBounds<Q>,
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    let Some(node) = node else {
        return;
    };
    let key: &Q = node.key.borrow();
    let after_start = match range.start_bound() {
        Bound::Included(start) => comparator.compare(key, start) != Ordering::Less,
        Bound::Excluded(start) => comparator.compare(key, start) == Ordering::Greater,
        Bound::Unbounded => true,
    };
    let before_end = match range.end_bound() {
        Bound::Included(end) => comparator.compare(key, end) != Ordering::Greater,
        Bound::Excluded(end) => comparator.compare(key, end) == Ordering::Less,
        Bound::Unbounded => true,
    };

    if after_start {
        collect_range(node.left(), range, comparator, entries);
    }
    if after_start && before_end {
        entries.push(node.entry());
    }
    if before_end {
        collect_range(node.right(), range, comparator, entries);
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over key-value pairs of a [`PersistentAvlTree`], in key order.
pub struct PersistentAvlTreeIterator<'a, K, V> {
    stack: SmallVec<[&'a Node<K, V>; STACK_CAPACITY]>,
    remaining: usize,
}

impl<'a, K, V> PersistentAvlTreeIterator<'a, K, V> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, K, V> Iterator for PersistentAvlTreeIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.entry())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for PersistentAvlTreeIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for PersistentAvlTreeIterator<'_, K, V> {}

impl<K, V> Clone for PersistentAvlTreeIterator<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// A range iterator over key-value pairs of a [`PersistentAvlTree`].
pub struct PersistentAvlTreeRangeIterator<'a, K, V> {
    entries: std::vec::IntoIter<(&'a K, &'a V)>,
}

impl<'a, K, V> Iterator for PersistentAvlTreeRangeIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for PersistentAvlTreeRangeIterator<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for PersistentAvlTreeRangeIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FusedIterator for PersistentAvlTreeRangeIterator<'_, K, V> {}

/// An owning iterator over key-value pairs of a [`PersistentAvlTree`].
///
/// Nodes still shared with other trees are cloned; nodes owned by this
/// iterator alone are moved out.
pub struct PersistentAvlTreeIntoIterator<K, V> {
    /// Pending nodes, each with its left subtree already taken.
    stack: SmallVec<[Node<K, V>; STACK_CAPACITY]>,
    remaining: usize,
}

impl<K: Clone, V: Clone> PersistentAvlTreeIntoIterator<K, V> {
    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(handle) = link {
            let mut node = Node::unshare(handle);
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K: Clone, V: Clone> Iterator for PersistentAvlTreeIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let (_, right, key, value) = node.into_parts();
        self.push_left_spine(right);
        self.remaining = self.remaining.saturating_sub(1);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Clone, V: Clone> ExactSizeIterator for PersistentAvlTreeIntoIterator<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K: Clone, V: Clone> FusedIterator for PersistentAvlTreeIntoIterator<K, V> {}

impl<K: Clone, V: Clone, C> IntoIterator for PersistentAvlTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = PersistentAvlTreeIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iterator = PersistentAvlTreeIntoIterator {
            stack: SmallVec::new(),
            remaining: self.length,
        };
        iterator.push_left_spine(self.root);
        iterator
    }
}

impl<'a, K, V, C> IntoIterator for &'a PersistentAvlTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = PersistentAvlTreeIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

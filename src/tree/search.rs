//! Lookups: find, get, contains, min and max.

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::PersistentAvlTree;
use super::node::Node;
use crate::comparator::Comparator;

impl<K, V, C> PersistentAvlTree<K, V, C> {
    /// Returns the node holding `key`, or `None` if the key is absent.
    ///
    /// The key may be any borrowed form of the tree's key type, as long as
    /// the comparator can order it.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<String, i32> =
    ///     [("one".to_string(), 1), ("two".to_string(), 2)].into_iter().collect();
    ///
    /// let node = tree.find("two").unwrap();
    /// assert_eq!(node.value(), &2);
    /// assert!(tree.find("three").is_none());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.comparator.compare(key, node.key.borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree = PersistentAvlTree::singleton(1, "one");
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(Node::value)
    }

    /// Returns the stored key-value pair for `key`.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(Node::entry)
    }

    /// Returns `true` if the tree holds an entry for `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).is_some()
    }

    /// Alias of [`contains_key`](Self::contains_key), for set-like use.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.contains_key(key)
    }

    /// Returns the node with the smallest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let tree: PersistentAvlTree<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// assert_eq!(tree.min().map(|node| node.entry()), Some((&1, &'a')));
    /// assert_eq!(tree.max().map(|node| node.entry()), Some((&3, &'c')));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref()?;
        while let Some(left) = current.left() {
            current = left;
        }
        Some(current)
    }

    /// Returns the node with the largest key, or `None` if the tree is empty.
    #[must_use]
    pub fn max(&self) -> Option<&Node<K, V>> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right() {
            current = right;
        }
        Some(current)
    }
}

//! Tree nodes and subtree links.

use super::ReferenceCounter;
use std::fmt;

/// A shared handle to a subtree. `None` is the empty tree.
pub(crate) type Link<K, V> = Option<ReferenceCounter<Node<K, V>>>;

/// A node of a [`PersistentAvlTree`](super::PersistentAvlTree).
///
/// Nodes are immutable and may be shared by many trees at once, so this is a
/// read-only view: it exposes the entry, the cached height, and the two
/// children. Use [`PersistentAvlTree::root`](super::PersistentAvlTree::root)
/// or [`PersistentAvlTree::find`](super::PersistentAvlTree::find) to obtain
/// one.
///
/// Two nodes are equal (`==`) when their whole subtrees have the same shape,
/// heights, keys, and values. Use
/// [`PersistentAvlTree::structural_equal`](super::PersistentAvlTree::structural_equal)
/// to compare contents regardless of shape.
///
/// # Examples
///
/// ```rust
/// use persistent_avl::PersistentAvlTree;
///
/// let tree: PersistentAvlTree<i32, &str> =
///     [(2, "two"), (1, "one"), (3, "three")].into_iter().collect();
///
/// let root = tree.root().unwrap();
/// assert_eq!(root.entry(), (&2, &"two"));
/// assert_eq!(root.height(), 1);
/// assert_eq!(root.left().map(|node| *node.key()), Some(1));
/// assert_eq!(root.right().map(|node| *node.key()), Some(3));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) height: i32,
    pub(super) left: Link<K, V>,
    pub(super) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// Builds a node over two subtrees, deriving its height from them.
    pub(super) fn new(left: Link<K, V>, right: Link<K, V>, key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 1 + link_height(&left).max(link_height(&right)),
            left,
            right,
        }
    }

    /// Builds a node with two empty children.
    pub(super) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            height: 0,
            left: None,
            right: None,
        }
    }

    /// Takes a node out of its handle, cloning only if the handle is shared.
    pub(super) fn unshare(node: ReferenceCounter<Self>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        ReferenceCounter::unwrap_or_clone(node)
    }

    /// Splits the node into `(left, right, key, value)`.
    pub(super) fn into_parts(self) -> (Link<K, V>, Link<K, V>, K, V) {
        (self.left, self.right, self.key, self.value)
    }

    /// Height of the left subtree minus the height of the right subtree.
    pub(super) fn balance_factor(&self) -> i32 {
        link_height(&self.left) - link_height(&self.right)
    }

    /// Returns the key stored in this node.
    #[inline]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value stored in this node.
    #[inline]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns the key-value pair stored in this node.
    #[inline]
    pub const fn entry(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Returns the height of the subtree rooted here. A leaf has height 0.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Returns the left child, or `None` if the left subtree is empty.
    #[inline]
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Returns the right child, or `None` if the right subtree is empty.
    #[inline]
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }
}

/// Height of a subtree; the empty tree has height -1.
#[inline]
pub(super) fn link_height<K, V>(link: &Link<K, V>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

/// Prints the subtree as `(key: value ^height left right)`, with `.` for an
/// empty child.
impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "({:?}: {:?} ^{} ",
            self.key, self.value, self.height
        )?;
        match self.left() {
            Some(left) => write!(formatter, "{left:?}")?,
            None => formatter.write_str(".")?,
        }
        formatter.write_str(" ")?;
        match self.right() {
            Some(right) => write!(formatter, "{right:?}")?,
            None => formatter.write_str(".")?,
        }
        formatter.write_str(")")
    }
}

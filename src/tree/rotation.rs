//! Rotation primitives used to restore the AVL balance.
//!
//! Each rotation takes an owned node whose balance factor is ±2 and returns
//! the rebuilt subtree. Only the nodes on the rotated path are rebuilt; every
//! other subtree is shared with the input. A promoted child that no other
//! tree references is moved instead of cloned.
//!
//! ```text
//!   rotate_right            rotate_left
//!
//!       n        l            n          r
//!      / \      / \          / \        / \
//!     l   c => a   n        a   r  =>  n   c
//!    / \          / \          / \    / \
//!   a   b        b   c        b   c  a   b
//! ```
//!
//! `double_left` handles the left-right case (left child leaning right) and
//! `double_right` the right-left case.

use super::ReferenceCounter;
use super::node::Node;

/// Promotes the right child: fixes a right-right imbalance.
pub(super) fn rotate_left<K: Clone, V: Clone>(node: Node<K, V>) -> Node<K, V> {
    let (left, right, key, value) = node.into_parts();
    debug_assert!(right.is_some(), "rotate_left requires a right child");
    let Some(right) = right else {
        return Node::new(left, None, key, value);
    };

    let (inner, outer, right_key, right_value) = Node::unshare(right).into_parts();
    let demoted = Node::new(left, inner, key, value);
    let promoted = Node::new(
        Some(ReferenceCounter::new(demoted)),
        outer,
        right_key,
        right_value,
    );
    tracing::trace!(height = promoted.height, "rotated subtree left");
    promoted
}

/// Promotes the left child: fixes a left-left imbalance.
pub(super) fn rotate_right<K: Clone, V: Clone>(node: Node<K, V>) -> Node<K, V> {
    let (left, right, key, value) = node.into_parts();
    debug_assert!(left.is_some(), "rotate_right requires a left child");
    let Some(left) = left else {
        return Node::new(None, right, key, value);
    };

    let (outer, inner, left_key, left_value) = Node::unshare(left).into_parts();
    let demoted = Node::new(inner, right, key, value);
    let promoted = Node::new(
        outer,
        Some(ReferenceCounter::new(demoted)),
        left_key,
        left_value,
    );
    tracing::trace!(height = promoted.height, "rotated subtree right");
    promoted
}

/// Left-right case: rotates the left child left, then the node right.
pub(super) fn double_left<K: Clone, V: Clone>(node: Node<K, V>) -> Node<K, V> {
    let (left, right, key, value) = node.into_parts();
    let left = left.map(|left| ReferenceCounter::new(rotate_left(Node::unshare(left))));
    rotate_right(Node::new(left, right, key, value))
}

/// Right-left case: rotates the right child right, then the node left.
pub(super) fn double_right<K: Clone, V: Clone>(node: Node<K, V>) -> Node<K, V> {
    let (left, right, key, value) = node.into_parts();
    let right = right.map(|right| ReferenceCounter::new(rotate_right(Node::unshare(right))));
    rotate_left(Node::new(left, right, key, value))
}

/// Asserts (in debug builds) that a rebalanced node satisfies the AVL bound.
#[inline]
pub(super) fn checked<K, V>(node: Node<K, V>) -> Node<K, V> {
    debug_assert!(
        node.balance_factor().abs() <= 1,
        "subtree left unbalanced (balance factor {})",
        node.balance_factor()
    );
    node
}

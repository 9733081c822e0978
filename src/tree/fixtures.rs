//! Hand-built trees for shape-level unit tests.
//!
//! Every fixture node stores its key as its value, so `leaf(3)` is the entry
//! `3 => 3`. Heights are derived from the children, and the builders do not
//! rebalance, so a fixture can describe any shape (including the unbalanced
//! inputs that rotations receive).

use super::node::{Link, Node};
use super::{PersistentAvlTree, ReferenceCounter};
use crate::comparator::NaturalOrder;

pub(crate) type FixtureTree = PersistentAvlTree<i32, i32, NaturalOrder>;

pub(crate) fn leaf(key: i32) -> Link<i32, i32> {
    Some(ReferenceCounter::new(Node::leaf(key, key)))
}

pub(crate) fn branch(left: Link<i32, i32>, key: i32, right: Link<i32, i32>) -> Link<i32, i32> {
    Some(ReferenceCounter::new(Node::new(left, right, key, key)))
}

pub(crate) fn tree(root: Link<i32, i32>) -> FixtureTree {
    fn count(link: Option<&Node<i32, i32>>) -> usize {
        link.map_or(0, |node| 1 + count(node.left()) + count(node.right()))
    }
    let length = count(root.as_deref());
    PersistentAvlTree::from_parts(root, length, NaturalOrder)
}

/// ```text
///     5
///   2   8
///  1 3 7 9
/// ```
pub(crate) fn seven_node_tree() -> FixtureTree {
    tree(branch(
        branch(leaf(1), 2, leaf(3)),
        5,
        branch(leaf(7), 8, leaf(9)),
    ))
}

/// Walks the whole tree and panics on any broken AVL or ordering invariant.
pub(crate) fn assert_avl_invariants(tree: &FixtureTree) {
    fn check(
        node: Option<&Node<i32, i32>>,
        lower: Option<i32>,
        upper: Option<i32>,
    ) -> (i32, usize) {
        let Some(node) = node else {
            return (-1, 0);
        };
        assert!(lower.is_none_or(|bound| node.key > bound), "order violated at {}", node.key);
        assert!(upper.is_none_or(|bound| node.key < bound), "order violated at {}", node.key);
        let (left_height, left_count) = check(node.left(), lower, Some(node.key));
        let (right_height, right_count) = check(node.right(), Some(node.key), upper);
        assert_eq!(node.height, 1 + left_height.max(right_height), "stale height at {}", node.key);
        assert!((left_height - right_height).abs() <= 1, "unbalanced at {}", node.key);
        (node.height, left_count + right_count + 1)
    }
    let (_, count) = check(tree.root(), None, None);
    assert_eq!(count, tree.len());
}

//! Removal with in-order successor splicing.

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::node::{Link, Node, link_height};
use super::rotation::{checked, double_left, double_right, rotate_left, rotate_right};
use super::{PersistentAvlTree, ReferenceCounter};
use crate::comparator::Comparator;

impl<K, V, C> PersistentAvlTree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    /// Removes the entry for `key`.
    ///
    /// Returns a new tree without the key. If the key is absent, the result
    /// is a clone of this tree that shares its root, so
    /// [`ptr_eq`](Self::ptr_eq) holds between the two.
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
    /// let tree: PersistentAvlTree<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
    /// let removed = tree.remove(&1);
    ///
    /// assert_eq!(tree.len(), 2);    // Original unchanged
    /// assert_eq!(removed.len(), 1); // New version
    /// assert_eq!(removed.get(&1), None);
    /// assert!(removed.ptr_eq(&removed.remove(&1)));
    /// ```
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        if !self.contains_key(key) {
            return self.clone();
        }

        let root = Self::remove_from_node(self.root.as_ref(), key, &self.comparator);
        self.with_root(root, self.length.saturating_sub(1))
    }

    /// Recursive helper for remove.
    fn remove_from_node<Q>(
        link: Option<&ReferenceCounter<Node<K, V>>>,
        key: &Q,
        comparator: &C,
    ) -> Link<K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let node = link?;
        match comparator.compare(key, node.key.borrow()) {
            Ordering::Less => {
                let left = Self::remove_from_node(node.left.as_ref(), key, comparator);
                let rebuilt = Node::new(left, node.right.clone(), node.key.clone(), node.value.clone());
                Some(ReferenceCounter::new(rebalance_after_left_removal(rebuilt)))
            }
            Ordering::Greater => {
                let right = Self::remove_from_node(node.right.as_ref(), key, comparator);
                let rebuilt = Node::new(node.left.clone(), right, node.key.clone(), node.value.clone());
                Some(ReferenceCounter::new(rebalance_after_right_removal(rebuilt)))
            }
            Ordering::Equal => match (&node.left, &node.right) {
                (None, _) => node.right.clone(),
                (_, None) => node.left.clone(),
                (Some(_), Some(right)) => {
                    let (right, successor_key, successor_value) = Self::remove_min(right);
                    let rebuilt = Node::new(node.left.clone(), right, successor_key, successor_value);
                    Some(ReferenceCounter::new(rebalance_after_right_removal(rebuilt)))
                }
            },
        }
    }

    /// Removes the leftmost entry of a subtree, returning the rebuilt subtree
    /// and the removed key and value.
    fn remove_min(node: &ReferenceCounter<Node<K, V>>) -> (Link<K, V>, K, V) {
        match &node.left {
            None => (node.right.clone(), node.key.clone(), node.value.clone()),
            Some(left) => {
                let (left, key, value) = Self::remove_min(left);
                let rebuilt = Node::new(left, node.right.clone(), node.key.clone(), node.value.clone());
                (
                    Some(ReferenceCounter::new(rebalance_after_left_removal(rebuilt))),
                    key,
                    value,
                )
            }
        }
    }
}

/// The left subtree lost a level: rotate if the right side is now two taller.
fn rebalance_after_left_removal<K: Clone, V: Clone>(node: Node<K, V>) -> Node<K, V> {
    if node.balance_factor() != -2 {
        return checked(node);
    }
    let outer_is_taller = node
        .right()
        .is_some_and(|right| link_height(&right.right) >= link_height(&right.left));
    checked(if outer_is_taller {
        rotate_left(node)
    } else {
        double_right(node)
    })
}

/// The right subtree lost a level: rotate if the left side is now two taller.
fn rebalance_after_right_removal<K: Clone, V: Clone>(node: Node<K, V>) -> Node<K, V> {
    if node.balance_factor() != 2 {
        return checked(node);
    }
    let outer_is_taller = node
        .left()
        .is_some_and(|left| link_height(&left.left) >= link_height(&left.right));
    checked(if outer_is_taller {
        rotate_right(node)
    } else {
        double_left(node)
    })
}

#[cfg(test)]
mod tests {
    use crate::tree::fixtures::{assert_avl_invariants, branch, leaf, seven_node_tree, tree};
    use crate::tree::node::Link;
    use crate::PersistentAvlTree;
    use rstest::rstest;

    #[rstest]
    #[case::leftmost_leaf(1, branch(branch(None, 2, leaf(3)), 5, branch(leaf(7), 8, leaf(9))))]
    #[case::rightmost_leaf(9, branch(branch(leaf(1), 2, leaf(3)), 5, branch(leaf(7), 8, None)))]
    #[case::inner_left_leaf(3, branch(branch(leaf(1), 2, None), 5, branch(leaf(7), 8, leaf(9))))]
    #[case::inner_right_leaf(7, branch(branch(leaf(1), 2, leaf(3)), 5, branch(None, 8, leaf(9))))]
    #[case::successor_splice(8, branch(branch(leaf(1), 2, leaf(3)), 5, branch(leaf(7), 9, None)))]
    #[case::root_with_successor(5, branch(branch(leaf(1), 2, leaf(3)), 7, branch(None, 8, leaf(9))))]
    fn test_remove_from_template(#[case] key: i32, #[case] expected: Link<i32, i32>) {
        let original = seven_node_tree();
        let removed = original.remove(&key);
        assert_eq!(removed.root(), expected.as_deref());
        assert_eq!(removed.len(), 6);
        assert_avl_invariants(&removed);
    }

    #[rstest]
    #[case::left_left(
        branch(branch(leaf(1), 2, leaf(3)), 5, leaf(8)),
        8,
        branch(leaf(1), 2, branch(leaf(3), 5, None))
    )]
    #[case::right_right(
        branch(leaf(2), 5, branch(leaf(7), 8, leaf(9))),
        2,
        branch(branch(None, 5, leaf(7)), 8, leaf(9))
    )]
    #[case::left_right(
        branch(branch(leaf(1), 2, branch(None, 3, leaf(4))), 5, branch(leaf(7), 8, None)),
        7,
        branch(branch(leaf(1), 2, None), 3, branch(leaf(4), 5, leaf(8)))
    )]
    #[case::right_left(
        branch(branch(leaf(1), 2, None), 5, branch(branch(leaf(6), 7, None), 8, leaf(9))),
        1,
        branch(branch(leaf(2), 5, leaf(6)), 7, branch(None, 8, leaf(9)))
    )]
    fn test_remove_rebalances(
        #[case] input: Link<i32, i32>,
        #[case] key: i32,
        #[case] expected: Link<i32, i32>,
    ) {
        let removed = tree(input).remove(&key);
        assert_eq!(removed.root(), expected.as_deref());
        assert_avl_invariants(&removed);
    }

    #[rstest]
    fn test_remove_absent_key_shares_root() {
        let original = seven_node_tree();
        let removed = original.remove(&10);
        assert!(removed.ptr_eq(&original));
        assert_eq!(removed.len(), 7);
    }

    #[rstest]
    fn test_remove_from_empty_tree() {
        let empty = tree(None);
        let removed = empty.remove(&1);
        assert!(removed.is_empty());
        assert!(removed.root().is_none());
    }

    #[rstest]
    fn test_remove_last_entry_leaves_empty_tree() {
        let removed = tree(leaf(1)).remove(&1);
        assert!(removed.is_empty());
        assert_eq!(removed.height(), -1);
    }

    #[rstest]
    fn test_remove_leaves_original_untouched() {
        let original = seven_node_tree();
        let _ = original.remove(&5);
        assert_eq!(original.root(), seven_node_tree().root());
    }

    #[rstest]
    fn test_remove_every_key_stays_balanced() {
        let full: PersistentAvlTree<i32, i32> = (0..200).map(|key| (key, key)).collect();
        let drained = (0..200).step_by(3).chain((0..200).rev()).fold(full, |tree, key| {
            let next = tree.remove(&key);
            assert_avl_invariants(&next);
            next
        });
        assert!(drained.is_empty());
    }

    #[rstest]
    fn test_remove_with_borrowed_key() {
        let tree: PersistentAvlTree<String, i32> =
            [("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
        let removed = tree.remove("a");
        assert_eq!(removed.len(), 1);
        assert!(!removed.contains_key("a"));
    }
}

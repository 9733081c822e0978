//! Insertion with rebalancing on the way back up.

use std::cmp::Ordering;
use std::convert::Infallible;

use super::node::Node;
use super::rotation::{checked, double_left, double_right, rotate_left, rotate_right};
use super::{PersistentAvlTree, ReferenceCounter};
use crate::comparator::Comparator;
use crate::error::KeyExists;

/// Result of inserting into a subtree.
struct Inserted<K, V> {
    /// Rebuilt subtree root.
    node: Node<K, V>,
    /// Where the key went relative to `node`'s key before any rotation at
    /// this level. `Equal` for a fresh leaf or a replaced entry.
    direction: Ordering,
    /// `false` when an existing entry was replaced.
    added: bool,
}

impl<K, V, C> PersistentAvlTree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone,
{
    /// Inserts a new entry, failing if `key` is already present.
    ///
    /// Returns a new tree containing the entry. The original tree is not
    /// modified. When the key exists, the rejected key and value are handed
    /// back inside [`KeyExists`]; use [`update`](Self::update) to replace an
    /// entry instead.
    ///
    /// # Errors
    ///
    /// Returns [`KeyExists`] if the tree already holds an entry for `key`.
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
    /// let tree = PersistentAvlTree::new().insert(1, "one").unwrap();
    /// let bigger = tree.insert(2, "two").unwrap();
    ///
    /// assert_eq!(tree.len(), 1);   // Original unchanged
    /// assert_eq!(bigger.len(), 2); // New version
    /// assert!(bigger.insert(2, "deux").is_err());
    /// ```
    pub fn insert(&self, key: K, value: V) -> Result<Self, KeyExists<K, V>> {
        self.insert_entry(key, value, |_, key, value| Err(KeyExists { key, value }))
            .inspect_err(|_| {
                tracing::debug!(length = self.length, "rejected insertion of an existing key");
            })
    }

    /// Inserts an entry, replacing any entry with an equal key.
    ///
    /// Both the stored key and the value are replaced, so a comparator that
    /// treats distinct keys as equal keeps the most recent one.
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
    /// let first = PersistentAvlTree::singleton(1, "one");
    /// let second = first.update(1, "ONE");
    ///
    /// assert_eq!(first.get(&1), Some(&"one"));  // Original unchanged
    /// assert_eq!(second.get(&1), Some(&"ONE")); // New version
    /// assert_eq!(second.len(), 1);
    /// ```
    #[must_use]
    pub fn update(&self, key: K, value: V) -> Self {
        let Ok(tree) = self.insert_entry::<Infallible, _>(key, value, |_, key, value| Ok((key, value)));
        tree
    }

    /// Inserts an entry, letting `on_conflict` decide what replaces an
    /// existing one. `on_conflict` receives the existing node and the new
    /// key and value, and returns the entry to store or an error that aborts
    /// the insertion.
    pub(super) fn insert_entry<E, F>(&self, key: K, value: V, on_conflict: F) -> Result<Self, E>
    where
        F: FnOnce(&Node<K, V>, K, V) -> Result<(K, V), E>,
    {
        let inserted =
            Self::insert_into_node(self.root.as_ref(), key, value, &self.comparator, on_conflict)?;
        let length = if inserted.added {
            self.length + 1
        } else {
            self.length
        };
        Ok(self.with_root(Some(ReferenceCounter::new(inserted.node)), length))
    }

    /// Recursive helper for insertion.
    fn insert_into_node<E, F>(
        link: Option<&ReferenceCounter<Node<K, V>>>,
        key: K,
        value: V,
        comparator: &C,
        on_conflict: F,
    ) -> Result<Inserted<K, V>, E>
    where
        F: FnOnce(&Node<K, V>, K, V) -> Result<(K, V), E>,
    {
        let Some(node) = link else {
            return Ok(Inserted {
                node: Node::leaf(key, value),
                direction: Ordering::Equal,
                added: true,
            });
        };

        match comparator.compare(&key, &node.key) {
            Ordering::Less => {
                let inserted =
                    Self::insert_into_node(node.left.as_ref(), key, value, comparator, on_conflict)?;
                let rebuilt = Node::new(
                    Some(ReferenceCounter::new(inserted.node)),
                    node.right.clone(),
                    node.key.clone(),
                    node.value.clone(),
                );
                let balanced = if rebuilt.balance_factor() == 2 {
                    if inserted.direction == Ordering::Less {
                        rotate_right(rebuilt)
                    } else {
                        double_left(rebuilt)
                    }
                } else {
                    rebuilt
                };
                Ok(Inserted {
                    node: checked(balanced),
                    direction: Ordering::Less,
                    added: inserted.added,
                })
            }
            Ordering::Greater => {
                let inserted =
                    Self::insert_into_node(node.right.as_ref(), key, value, comparator, on_conflict)?;
                let rebuilt = Node::new(
                    node.left.clone(),
                    Some(ReferenceCounter::new(inserted.node)),
                    node.key.clone(),
                    node.value.clone(),
                );
                let balanced = if rebuilt.balance_factor() == -2 {
                    if inserted.direction == Ordering::Greater {
                        rotate_left(rebuilt)
                    } else {
                        double_right(rebuilt)
                    }
                } else {
                    rebuilt
                };
                Ok(Inserted {
                    node: checked(balanced),
                    direction: Ordering::Greater,
                    added: inserted.added,
                })
            }
            Ordering::Equal => {
                let (key, value) = on_conflict(node, key, value)?;
                Ok(Inserted {
                    node: Node {
                        key,
                        value,
                        height: node.height,
                        left: node.left.clone(),
                        right: node.right.clone(),
                    },
                    direction: Ordering::Equal,
                    added: false,
                })
            }
        }
    }
}

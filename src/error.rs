//! Error types for tree operations.
//!
//! The only failing operation is [`PersistentAvlTree::insert`], which refuses
//! to overwrite a key that is already present. Removing or looking up an
//! absent key is not an error.
//!
//! [`PersistentAvlTree::insert`]: crate::PersistentAvlTree::insert

use thiserror::Error;

/// Returned by [`PersistentAvlTree::insert`] when the key is already present.
///
/// The rejected key and value are handed back so the caller can retry with
/// [`PersistentAvlTree::update`] without cloning them up front.
///
/// [`PersistentAvlTree::insert`]: crate::PersistentAvlTree::insert
/// [`PersistentAvlTree::update`]: crate::PersistentAvlTree::update
///
/// # Examples
///
/// ```rust
/// use persistent_avl::PersistentAvlTree;
///
/// let tree = PersistentAvlTree::singleton(1, "one");
/// let error = tree.insert(1, "uno").unwrap_err();
///
/// assert_eq!(format!("{error}"), "key already exists in the tree");
///
/// let (key, value) = error.into_parts();
/// let updated = tree.update(key, value);
/// assert_eq!(updated.get(&1), Some(&"uno"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key already exists in the tree")]
pub struct KeyExists<K, V> {
    /// The key that was rejected.
    pub key: K,
    /// The value that was to be stored under `key`.
    pub value: V,
}

impl<K, V> KeyExists<K, V> {
    /// Consumes the error, returning the rejected key and value.
    #[inline]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

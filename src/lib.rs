//! # persistent-avl
//!
//! A persistent (immutable) AVL tree for Rust, ordered by a pluggable
//! comparator and built on structural sharing.
//!
//! ## Overview
//!
//! - **[`PersistentAvlTree`]**: an ordered map whose every update returns a
//!   new tree, sharing all untouched subtrees with the old one
//! - **[`Comparator`]**: the key-ordering policy, with [`NaturalOrder`],
//!   [`Reversed`], and plain closures provided
//! - **Set algebra**: union, intersection, difference, subset checks,
//!   structural equality and lexicographic ordering between trees
//! - **Traversal**: structural and in-order folds plus lazy iterators
//!
//! ## Feature Flags
//!
//! - `arc`: share subtrees through `Arc` so trees are `Send + Sync`
//! - `serde`: serialize and deserialize trees as maps
//! - `full`: enable all optional features
//!
//! ## Example
//!
//! ```rust
//! use persistent_avl::prelude::*;
//!
//! let tree = PersistentAvlTree::new()
//!     .insert(2, "two")
//!     .and_then(|tree| tree.insert(1, "one"))
//!     .unwrap();
//!
//! // Inserting a present key is an error; `update` overwrites instead
//! assert!(tree.insert(1, "uno").is_err());
//! let updated = tree.update(1, "uno");
//!
//! assert_eq!(tree.get(&1), Some(&"one"));    // Original unchanged
//! assert_eq!(updated.get(&1), Some(&"uno")); // New version
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the tree, the comparator types, and the error type.
///
/// # Usage
///
/// ```rust
/// use persistent_avl::prelude::*;
/// ```
pub mod prelude {
    pub use crate::comparator::*;
    pub use crate::error::*;
    pub use crate::tree::*;
}

pub mod comparator;
pub mod error;
pub mod tree;

pub use comparator::{Comparator, NaturalOrder, Reversed};
pub use error::KeyExists;
pub use tree::{Node, PersistentAvlTree};

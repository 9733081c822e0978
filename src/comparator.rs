//! Key-ordering policies.
//!
//! A [`Comparator`] decides how keys are ordered inside a
//! [`PersistentAvlTree`](crate::PersistentAvlTree). The tree stores the
//! comparator by value and hands a copy to every tree derived from it.
//!
//! Three kinds of comparators are available out of the box:
//!
//! - [`NaturalOrder`]: the key type's own [`Ord`] implementation
//! - [`Reversed`]: any other comparator, flipped
//! - closures and functions of type `Fn(&T, &T) -> Ordering`
//!
//! # Contract
//!
//! A comparator must describe a total order: it must be consistent (the same
//! inputs always give the same answer), antisymmetric, and transitive. This is
//! not checked; a comparator that breaks the contract produces a tree whose
//! shape is unspecified, although every operation still terminates.
//!
//! # Examples
//!
//! ```rust
//! use persistent_avl::{Comparator, NaturalOrder, Reversed};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(Reversed(NaturalOrder).compare(&1, &2), Ordering::Greater);
//!
//! let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
//! assert_eq!(by_length.compare(&"ab", &"c"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// A total order over values of type `T`.
///
/// Implemented by [`NaturalOrder`], [`Reversed`], and every
/// `Fn(&T, &T) -> Ordering`.
pub trait Comparator<T: ?Sized> {
    /// Compares two values, returning `Less`, `Equal`, or `Greater`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
///
/// This is the default comparator of
/// [`PersistentAvlTree`](crate::PersistentAvlTree). It also orders every
/// borrowed form of a key that implements `Ord`, so a tree keyed by `String`
/// can be searched with a `&str`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Flips the order described by the wrapped comparator.
///
/// # Examples
///
/// ```rust
/// use persistent_avl::{NaturalOrder, PersistentAvlTree, Reversed};
///
/// let tree: PersistentAvlTree<i32, (), _> = [(1, ()), (2, ()), (3, ())]
///     .into_iter()
///     .fold(PersistentAvlTree::with_comparator(Reversed(NaturalOrder)), |tree, (key, value)| {
///         tree.update(key, value)
///     });
///
/// let keys: Vec<&i32> = tree.keys().collect();
/// assert_eq!(keys, vec![&3, &2, &1]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.0.compare(right, left)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

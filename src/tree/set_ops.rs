//! Set algebra over trees: union, intersection, difference, subset,
//! equality and ordering.
//!
//! Every operation takes the comparator of `self`. Combining two trees whose
//! comparators disagree gives a well-formed tree ordered by `self`'s
//! comparator, but membership tests against `other` then follow `other`'s
//! layout and may miss keys.

use std::cmp::Ordering;
use std::convert::Infallible;

use smallvec::SmallVec;

use super::PersistentAvlTree;
use crate::comparator::Comparator;

impl<K, V, C> PersistentAvlTree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone,
{
    // =========================================================================
    // Union
    // =========================================================================

    /// Returns a tree with the entries of both trees.
    ///
    /// When a key is present in both, the entry of `self` is kept.
    ///
    /// # Complexity
    ///
    /// O(M log (N + M)) where M is `other.len()`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let left: PersistentAvlTree<i32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
    /// let right: PersistentAvlTree<i32, &str> = [(2, "B"), (3, "C")].into_iter().collect();
    ///
    /// let union = left.union(&right);
    /// let entries: Vec<(&i32, &&str)> = union.iter().collect();
    /// assert_eq!(entries, vec![(&1, &"a"), (&2, &"b"), (&3, &"C")]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        tracing::trace!(left = self.len(), right = other.len(), "computing union");
        other.fold_in_order(self.clone(), |tree, key, value| {
            tree.insert_entry(key.clone(), value.clone(), |_, _, _| Err(()))
                .unwrap_or(tree)
        })
    }

    /// Returns the union of `self` and every tree in `others`.
    ///
    /// Earlier trees win: an entry of `self` beats all others, and an entry
    /// of `others[i]` beats those of `others[j]` for `i < j`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let first = PersistentAvlTree::singleton(1, "first");
    /// let second = PersistentAvlTree::singleton(1, "second").update(2, "second");
    /// let third = PersistentAvlTree::singleton(3, "third");
    ///
    /// let union = first.union_all([&second, &third]);
    /// assert_eq!(union.len(), 3);
    /// assert_eq!(union.get(&1), Some(&"first"));
    /// assert_eq!(union.get(&2), Some(&"second"));
    /// ```
    #[must_use]
    pub fn union_all<'a, I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        others
            .into_iter()
            .fold(self.clone(), |tree, other| tree.union(other))
    }

    /// Returns a tree with the entries of both trees, resolving shared keys
    /// with `combine(value_in_self, value_in_other)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let left: PersistentAvlTree<&str, i32> = [("apples", 3), ("pears", 1)].into_iter().collect();
    /// let right: PersistentAvlTree<&str, i32> = [("apples", 2), ("plums", 5)].into_iter().collect();
    ///
    /// let totals = left.union_with(&right, |mine, theirs| mine + theirs);
    /// assert_eq!(totals.get(&"apples"), Some(&5));
    /// assert_eq!(totals.get(&"pears"), Some(&1));
    /// assert_eq!(totals.get(&"plums"), Some(&5));
    /// ```
    #[must_use]
    pub fn union_with<F>(&self, other: &Self, mut combine: F) -> Self
    where
        F: FnMut(&V, &V) -> V,
    {
        tracing::trace!(left = self.len(), right = other.len(), "computing union_with");
        other.fold_in_order(self.clone(), |tree, key, value| {
            let Ok(next) = tree.insert_entry::<Infallible, _>(
                key.clone(),
                value.clone(),
                |existing, key, value| Ok((key, combine(existing.value(), &value))),
            );
            next
        })
    }

    /// Folds every tree in `others` into `self` with
    /// [`union_with`](Self::union_with), left to right.
    ///
    /// `combine` always receives the accumulated value first.
    #[must_use]
    pub fn union_with_all<'a, I, F>(&self, others: I, mut combine: F) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        F: FnMut(&V, &V) -> V,
        Self: 'a,
    {
        others.into_iter().fold(self.clone(), |tree, other| {
            tree.union_with(other, &mut combine)
        })
    }

    // =========================================================================
    // Intersection
    // =========================================================================

    /// Returns the entries of `self` whose keys are also in `other`.
    ///
    /// `other` may carry a different value type; only its keys matter.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let names: PersistentAvlTree<i32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
    /// let flags: PersistentAvlTree<i32, bool> = [(2, true), (3, false), (4, true)].into_iter().collect();
    ///
    /// let common = names.intersection(&flags);
    /// let entries: Vec<(&i32, &&str)> = common.iter().collect();
    /// assert_eq!(entries, vec![(&2, &"b"), (&3, &"c")]);
    /// ```
    #[must_use]
    pub fn intersection<W>(&self, other: &PersistentAvlTree<K, W, C>) -> Self {
        tracing::trace!(left = self.len(), right = other.len(), "computing intersection");
        self.fold_in_order(self.empty_like(), |tree, key, value| {
            if other.contains_key(key) {
                tree.update(key.clone(), value.clone())
            } else {
                tree
            }
        })
    }

    /// Returns the entries of `self` whose keys are in every tree of
    /// `others`. With no other trees, this is a copy of `self`.
    #[must_use]
    pub fn intersection_all<'a, I>(&self, others: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        others
            .into_iter()
            .fold(self.clone(), |tree, other| tree.intersection(other))
    }

    /// Returns a tree over the keys present in both trees, with values
    /// computed by `combine(key, value_in_self, value_in_other)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let prices: PersistentAvlTree<&str, u32> = [("tea", 3), ("cake", 4)].into_iter().collect();
    /// let counts: PersistentAvlTree<&str, u32> = [("tea", 2), ("soup", 1)].into_iter().collect();
    ///
    /// let bill = prices.intersection_with(&counts, |_, price, count| price * count);
    /// assert_eq!(bill.len(), 1);
    /// assert_eq!(bill.get(&"tea"), Some(&6));
    /// ```
    pub fn intersection_with<W, U, F>(
        &self,
        other: &PersistentAvlTree<K, W, C>,
        mut combine: F,
    ) -> PersistentAvlTree<K, U, C>
    where
        U: Clone,
        F: FnMut(&K, &V, &W) -> U,
    {
        tracing::trace!(left = self.len(), right = other.len(), "computing intersection_with");
        self.fold_in_order(self.empty_like(), |tree, key, value| match other.get(key) {
            Some(other_value) => tree.update(key.clone(), combine(key, value, other_value)),
            None => tree,
        })
    }

    /// Returns a tree over the keys present in `self` and in every tree of
    /// `others`. `combine` receives the key and its values in order:
    /// `values[0]` comes from `self`, `values[i]` from the `i`-th other tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let monday: PersistentAvlTree<&str, u32> = [("ann", 2), ("bob", 1)].into_iter().collect();
    /// let tuesday: PersistentAvlTree<&str, u32> = [("ann", 3), ("cat", 4)].into_iter().collect();
    /// let wednesday: PersistentAvlTree<&str, u32> = [("ann", 1), ("bob", 5)].into_iter().collect();
    ///
    /// let every_day = monday.intersection_with_all([&tuesday, &wednesday], |_, hours| {
    ///     hours.iter().copied().sum()
    /// });
    /// assert_eq!(every_day.len(), 1);
    /// assert_eq!(every_day.get(&"ann"), Some(&6));
    /// ```
    #[must_use]
    pub fn intersection_with_all<'a, I, F>(&self, others: I, mut combine: F) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        F: FnMut(&K, &[&V]) -> V,
        Self: 'a,
    {
        let others: SmallVec<[&Self; 4]> = others.into_iter().collect();
        tracing::trace!(
            left = self.len(),
            trees = others.len() + 1,
            "computing intersection_with_all"
        );
        self.fold_in_order(self.empty_like(), |tree, key, value| {
            let mut values: SmallVec<[&V; 4]> = SmallVec::with_capacity(others.len() + 1);
            values.push(value);
            for other in &others {
                match other.get(key) {
                    Some(other_value) => values.push(other_value),
                    None => return tree,
                }
            }
            tree.update(key.clone(), combine(key, values.as_slice()))
        })
    }

    // =========================================================================
    // Difference
    // =========================================================================

    /// Returns the entries of `self` whose keys are not in `other`.
    ///
    /// Subtrees of `self` untouched by the removals stay shared with the
    /// result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let all: PersistentAvlTree<i32, char> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
    /// let done: PersistentAvlTree<i32, ()> = [(2, ()), (9, ())].into_iter().collect();
    ///
    /// let todo = all.difference(&done);
    /// let keys: Vec<&i32> = todo.keys().collect();
    /// assert_eq!(keys, vec![&1, &3]);
    /// ```
    #[must_use]
    pub fn difference<W>(&self, other: &PersistentAvlTree<K, W, C>) -> Self {
        tracing::trace!(left = self.len(), right = other.len(), "computing difference");
        other.fold_in_order(self.clone(), |tree, key, _| tree.remove(key))
    }

    /// Rewrites `self` entry by entry against `other`.
    ///
    /// For every entry of `self`, `resolve(key, value, value_in_other)` is
    /// called with `other`'s value for the key, or `None` when `other` lacks
    /// it. The entry is kept with the returned value, or dropped on `None`.
    /// Keys of `other` missing from `self` are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let stock: PersistentAvlTree<&str, u32> = [("nails", 10), ("screws", 4), ("bolts", 7)]
    ///     .into_iter()
    ///     .collect();
    /// let sold: PersistentAvlTree<&str, u32> = [("nails", 3), ("screws", 4)].into_iter().collect();
    ///
    /// let left_over = stock.difference_with(&sold, |_, have, sold| {
    ///     let remaining = have - sold.copied().unwrap_or(0);
    ///     (remaining > 0).then_some(remaining)
    /// });
    /// assert_eq!(left_over.get(&"nails"), Some(&7));
    /// assert_eq!(left_over.get(&"screws"), None);
    /// assert_eq!(left_over.get(&"bolts"), Some(&7));
    /// ```
    #[must_use]
    pub fn difference_with<W, F>(&self, other: &PersistentAvlTree<K, W, C>, mut resolve: F) -> Self
    where
        F: FnMut(&K, &V, Option<&W>) -> Option<V>,
    {
        tracing::trace!(left = self.len(), right = other.len(), "computing difference_with");
        self.fold_in_order(self.empty_like(), |tree, key, value| {
            match resolve(key, value, other.get(key)) {
                Some(resolved) => tree.update(key.clone(), resolved),
                None => tree,
            }
        })
    }
}

impl<K, V, C> PersistentAvlTree<K, V, C>
where
    C: Comparator<K>,
{
    // =========================================================================
    // Comparison
    // =========================================================================

    /// Returns `true` if every key of `self` is also a key of `other`.
    ///
    /// Values are ignored, and the two trees may hold different value types.
    /// The empty tree is a subset of every tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let small: PersistentAvlTree<i32, ()> = [(1, ()), (3, ())].into_iter().collect();
    /// let large: PersistentAvlTree<i32, &str> = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
    ///
    /// assert!(small.is_subset(&large));
    /// assert!(!large.is_subset(&small));
    /// ```
    pub fn is_subset<W>(&self, other: &PersistentAvlTree<K, W, C>) -> bool {
        self.length <= other.length
            && self.fold(
                || true,
                |left, right, key, _| left && right && other.contains_key(key),
            )
    }

    /// Returns `true` if both trees hold the same key-value pairs, whatever
    /// their shapes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    ///
    /// let ascending: PersistentAvlTree<i32, i32> = (0..10).map(|key| (key, key)).collect();
    /// let descending: PersistentAvlTree<i32, i32> = (0..10).rev().map(|key| (key, key)).collect();
    ///
    /// assert_ne!(ascending.root(), descending.root());
    /// assert!(ascending.structural_equal(&descending));
    /// assert!(!ascending.structural_equal(&descending.update(3, 30)));
    /// ```
    pub fn structural_equal(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        self.length == other.length
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }

    /// Compares two trees entry by entry in key order.
    ///
    /// The first pair of differing keys decides, using the comparator of
    /// `self`. Equal keys with different values are decided by
    /// `compare_values`. If one tree runs out first, it is the smaller.
    pub fn lexicographic_compare_by<F>(&self, other: &Self, mut compare_values: F) -> Ordering
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let mut left = self.iter();
        let mut right = other.iter();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some((left_key, left_value)), Some((right_key, right_value))) => {
                    let ordering = self
                        .comparator
                        .compare(left_key, right_key)
                        .then_with(|| compare_values(left_value, right_value));
                    if ordering != Ordering::Equal {
                        return ordering;
                    }
                }
            }
        }
    }

    /// Compares two trees entry by entry in key order, ordering values by
    /// their [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_avl::PersistentAvlTree;
    /// use std::cmp::Ordering;
    ///
    /// let short: PersistentAvlTree<i32, i32> = [(1, 1), (2, 2)].into_iter().collect();
    /// let long: PersistentAvlTree<i32, i32> = [(1, 1), (2, 2), (3, 3)].into_iter().collect();
    /// let bigger_value: PersistentAvlTree<i32, i32> = [(1, 1), (2, 5)].into_iter().collect();
    ///
    /// assert_eq!(short.lexicographic_compare(&long), Ordering::Less);
    /// assert_eq!(short.lexicographic_compare(&bigger_value), Ordering::Less);
    /// assert_eq!(long.lexicographic_compare(&bigger_value), Ordering::Less);
    /// ```
    pub fn lexicographic_compare(&self, other: &Self) -> Ordering
    where
        V: Ord,
    {
        self.lexicographic_compare_by(other, Ord::cmp)
    }
}

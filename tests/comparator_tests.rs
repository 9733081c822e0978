//! Integration tests for trees ordered by custom comparators.

use persistent_avl::{Comparator, NaturalOrder, PersistentAvlTree, Reversed};
use rstest::rstest;
use std::cmp::Ordering;

/// Orders strings case-insensitively.
#[derive(Clone, Copy, Default)]
struct CaseInsensitive;

impl Comparator<str> for CaseInsensitive {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        left.bytes()
            .map(|byte| byte.to_ascii_lowercase())
            .cmp(right.bytes().map(|byte| byte.to_ascii_lowercase()))
    }
}

impl Comparator<String> for CaseInsensitive {
    fn compare(&self, left: &String, right: &String) -> Ordering {
        Comparator::<str>::compare(self, left, right)
    }
}

#[rstest]
fn test_reversed_tree_iterates_descending() {
    let tree: PersistentAvlTree<i32, i32, Reversed<NaturalOrder>> =
        (1..=10).map(|key| (key, key)).collect();
    let keys: Vec<i32> = tree.keys().copied().collect();
    assert_eq!(keys, (1..=10).rev().collect::<Vec<_>>());
    assert_eq!(tree.min().map(|node| *node.key()), Some(10));
    assert_eq!(tree.max().map(|node| *node.key()), Some(1));
}

#[rstest]
fn test_closure_comparator() {
    let by_last_digit = |left: &u32, right: &u32| (left % 10).cmp(&(right % 10));
    let tree = PersistentAvlTree::with_comparator(by_last_digit)
        .update(21, "a")
        .update(13, "b")
        .update(42, "c");
    let keys: Vec<u32> = tree.keys().copied().collect();
    assert_eq!(keys, vec![21, 42, 13]);
    assert!(tree.contains(&1));
    assert!(tree.insert(33, "d").is_err());
}

#[rstest]
fn test_case_insensitive_lookup_by_str() {
    let tree = PersistentAvlTree::with_comparator(CaseInsensitive)
        .update("Apple".to_string(), 1)
        .update("banana".to_string(), 2);
    assert_eq!(tree.get("APPLE"), Some(&1));
    assert_eq!(tree.get("Banana"), Some(&2));
    assert!(tree.remove("apple").get("Apple").is_none());
}

#[rstest]
fn test_update_replaces_equivalent_key() {
    let tree = PersistentAvlTree::with_comparator(CaseInsensitive)
        .update("apple".to_string(), 1)
        .update("APPLE".to_string(), 2);
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get_key_value("Apple"), Some((&"APPLE".to_string(), &2)));
}

#[rstest]
fn test_derived_trees_keep_comparator() {
    let left: PersistentAvlTree<i32, (), Reversed<NaturalOrder>> =
        [(1, ()), (3, ())].into_iter().collect();
    let right: PersistentAvlTree<i32, (), Reversed<NaturalOrder>> =
        [(2, ()), (3, ())].into_iter().collect();
    let union = left.union(&right).remove(&3);
    let keys: Vec<i32> = union.keys().copied().collect();
    assert_eq!(keys, vec![2, 1]);
}

#[rstest]
fn test_lexicographic_compare_uses_comparator() {
    let small: PersistentAvlTree<i32, i32, Reversed<NaturalOrder>> = [(1, 0)].into_iter().collect();
    let large: PersistentAvlTree<i32, i32, Reversed<NaturalOrder>> = [(2, 0)].into_iter().collect();
    assert_eq!(small.lexicographic_compare(&large), Ordering::Greater);
}

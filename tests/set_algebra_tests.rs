//! Integration tests for set algebra between trees.

use persistent_avl::PersistentAvlTree;
use rstest::{fixture, rstest};
use std::cmp::Ordering;

type Inventory = PersistentAvlTree<&'static str, u32>;

#[fixture]
fn warehouse() -> Inventory {
    [("bolts", 40), ("nails", 100), ("nuts", 25), ("screws", 60)]
        .into_iter()
        .collect()
}

#[fixture]
fn shop() -> Inventory {
    [("glue", 5), ("nails", 10), ("screws", 8), ("tape", 12)]
        .into_iter()
        .collect()
}

fn names<V>(tree: &PersistentAvlTree<&'static str, V>) -> Vec<&'static str> {
    tree.keys().copied().collect()
}

// =============================================================================
// Union
// =============================================================================

#[rstest]
fn test_union_prefers_receiver(warehouse: Inventory, shop: Inventory) {
    let union = warehouse.union(&shop);
    assert_eq!(
        names(&union),
        vec!["bolts", "glue", "nails", "nuts", "screws", "tape"]
    );
    assert_eq!(union.get(&"nails"), Some(&100));
    assert_eq!(shop.union(&warehouse).get(&"nails"), Some(&10));
}

#[rstest]
fn test_union_with_sums_stock(warehouse: Inventory, shop: Inventory) {
    let total = warehouse.union_with(&shop, |stored, shelved| stored + shelved);
    assert_eq!(total.get(&"nails"), Some(&110));
    assert_eq!(total.get(&"screws"), Some(&68));
    assert_eq!(total.get(&"glue"), Some(&5));
    assert_eq!(total.len(), 6);
}

#[rstest]
fn test_union_all_of_nothing_is_receiver(warehouse: Inventory) {
    let union = warehouse.union_all([]);
    assert!(union.ptr_eq(&warehouse));
}

#[rstest]
fn test_union_with_all_sums_every_tree(warehouse: Inventory, shop: Inventory) {
    let total = warehouse.union_with_all([&shop, &shop], |left, right| left + right);
    assert_eq!(total.get(&"nails"), Some(&120));
    assert_eq!(total.get(&"tape"), Some(&24));
    assert_eq!(total.get(&"bolts"), Some(&40));
}

// =============================================================================
// Intersection
// =============================================================================

#[rstest]
fn test_intersection_is_shared_keys(warehouse: Inventory, shop: Inventory) {
    let shared = warehouse.intersection(&shop);
    assert_eq!(names(&shared), vec!["nails", "screws"]);
    assert_eq!(shared.get(&"screws"), Some(&60));
}

#[rstest]
fn test_intersection_with_disjoint_is_empty(warehouse: Inventory) {
    let other: PersistentAvlTree<&'static str, ()> = [("rope", ())].into_iter().collect();
    assert!(warehouse.intersection(&other).is_empty());
}

#[rstest]
fn test_intersection_all(warehouse: Inventory, shop: Inventory) {
    let only_nails: Inventory = [("nails", 1)].into_iter().collect();
    let shared = warehouse.intersection_all([&shop, &only_nails]);
    assert_eq!(names(&shared), vec!["nails"]);
    assert_eq!(shared.get(&"nails"), Some(&100));
}

#[rstest]
fn test_intersection_with_builds_new_value_type(warehouse: Inventory, shop: Inventory) {
    let ratio = warehouse.intersection_with(&shop, |_, stored, shelved| {
        f64::from(*shelved) / f64::from(*stored)
    });
    assert_eq!(ratio.get(&"nails"), Some(&0.1));
    assert_eq!(ratio.len(), 2);
}

#[rstest]
fn test_intersection_with_all_sees_every_value(warehouse: Inventory, shop: Inventory) {
    let minimum = warehouse.intersection_with_all([&shop], |_, counts| {
        counts.iter().copied().copied().min().unwrap_or(0)
    });
    assert_eq!(minimum.get(&"nails"), Some(&10));
    assert_eq!(minimum.get(&"screws"), Some(&8));
    assert_eq!(minimum.len(), 2);
}

// =============================================================================
// Difference
// =============================================================================

#[rstest]
fn test_difference(warehouse: Inventory, shop: Inventory) {
    assert_eq!(names(&warehouse.difference(&shop)), vec!["bolts", "nuts"]);
    assert_eq!(names(&shop.difference(&warehouse)), vec!["glue", "tape"]);
}

#[rstest]
fn test_difference_with_empty_shares_root(warehouse: Inventory) {
    let empty: PersistentAvlTree<&'static str, u32> = PersistentAvlTree::new();
    assert!(warehouse.difference(&empty).ptr_eq(&warehouse));
}

#[rstest]
fn test_difference_with_subtracts_stock(warehouse: Inventory, shop: Inventory) {
    let restock = warehouse.difference_with(&shop, |_, stored, shelved| {
        let remaining = stored.saturating_sub(shelved.copied().unwrap_or(0) * 10);
        (remaining > 0).then_some(remaining)
    });
    assert_eq!(names(&restock), vec!["bolts", "nuts"]);
}

// =============================================================================
// Comparisons
// =============================================================================

#[rstest]
fn test_subset(warehouse: Inventory, shop: Inventory) {
    let shared = warehouse.intersection(&shop);
    assert!(shared.is_subset(&warehouse));
    assert!(shared.is_subset(&shop));
    assert!(!warehouse.is_subset(&shop));
    assert!(Inventory::new().is_subset(&shop));
}

#[rstest]
fn test_mutual_subsets_with_different_values_are_not_equal(warehouse: Inventory) {
    let recounted = warehouse.update("nails", 99);
    assert!(recounted.is_subset(&warehouse));
    assert!(warehouse.is_subset(&recounted));
    assert!(!recounted.structural_equal(&warehouse));
    assert_ne!(recounted, warehouse);
    assert!(recounted.update("nails", 100).structural_equal(&warehouse));
}

#[rstest]
fn test_structural_equal_across_shapes(warehouse: Inventory) {
    let mut entries: Vec<(&'static str, u32)> = warehouse
        .iter()
        .map(|(name, count)| (*name, *count))
        .collect();
    entries.reverse();
    let rebuilt: Inventory = entries.into_iter().collect();
    assert!(rebuilt.structural_equal(&warehouse));
    assert_eq!(rebuilt, warehouse);
}

#[rstest]
fn test_lexicographic_compare(warehouse: Inventory, shop: Inventory) {
    assert_eq!(warehouse.lexicographic_compare(&shop), Ordering::Less);
    assert_eq!(shop.lexicographic_compare(&warehouse), Ordering::Greater);
    assert_eq!(
        warehouse.lexicographic_compare(&warehouse.clone()),
        Ordering::Equal
    );
    assert!(warehouse < shop);
}

//! Serde support: a tree serializes as a map in key order.
//!
//! Deserialization rebuilds the tree with the default comparator and rejects
//! input that repeats a key.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{Error as _, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::PersistentAvlTree;
use crate::comparator::Comparator;

impl<K, V, C> Serialize for PersistentAvlTree<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct PersistentAvlTreeVisitor<K, V, C> {
    marker: PhantomData<fn() -> PersistentAvlTree<K, V, C>>,
}

impl<K, V, C> PersistentAvlTreeVisitor<K, V, C> {
    const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<'de, K, V, C> Visitor<'de> for PersistentAvlTreeVisitor<K, V, C>
where
    K: Deserialize<'de> + Clone,
    V: Deserialize<'de> + Clone,
    C: Comparator<K> + Clone + Default,
{
    type Value = PersistentAvlTree<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with unique keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tree = PersistentAvlTree::default();
        while let Some((key, value)) = access.next_entry()? {
            tree = tree.insert(key, value).map_err(A::Error::custom)?;
        }
        Ok(tree)
    }
}

impl<'de, K, V, C> Deserialize<'de> for PersistentAvlTree<K, V, C>
where
    K: Deserialize<'de> + Clone,
    V: Deserialize<'de> + Clone,
    C: Comparator<K> + Clone + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PersistentAvlTreeVisitor::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::comparator::{NaturalOrder, Reversed};
    use crate::tree::fixtures::{seven_node_tree, FixtureTree};
    use crate::PersistentAvlTree;
    use rstest::rstest;

    #[rstest]
    fn test_serializes_as_ordered_map() {
        let json = serde_json::to_string(&seven_node_tree()).expect("serializable");
        assert_eq!(json, r#"{"1":1,"2":2,"3":3,"5":5,"7":7,"8":8,"9":9}"#);
    }

    #[rstest]
    fn test_deserializes_into_balanced_tree() {
        let tree: FixtureTree =
            serde_json::from_str(r#"{"9":9,"8":8,"7":7,"5":5,"3":3,"2":2,"1":1}"#)
                .expect("valid map");
        assert_eq!(tree, seven_node_tree());
        crate::tree::fixtures::assert_avl_invariants(&tree);
    }

    #[rstest]
    fn test_duplicate_key_is_an_error() {
        let result: Result<FixtureTree, _> = serde_json::from_str(r#"{"1":1,"1":2}"#);
        let error = result.expect_err("duplicate key");
        assert!(error.to_string().contains("key already exists"));
    }

    #[rstest]
    fn test_deserialize_uses_default_comparator() {
        let tree: PersistentAvlTree<i32, char, Reversed<NaturalOrder>> =
            serde_json::from_str(r#"{"1":"a","2":"b","3":"c"}"#).expect("valid map");
        let keys: Vec<i32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![3, 2, 1]);
    }
}

//! The mapping abstraction consumed by the combiner.
//!
//! A [`Mapping`] is any container of string keys and JSON values that can
//! report whether its iteration order follows insertion order. The combiner
//! reads through this trait only, so the two inputs of a call never need to
//! share a concrete type.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde_json::Value;

/// A key/value container the combiner can read.
///
/// All implementations must satisfy these invariants:
/// - `keys` yields every key exactly once, in the mapping's iteration order.
/// - `get(k)` returns `Some` exactly for the keys that `keys` yields.
/// - `is_order_preserving` returns `true` only when iteration order matches
///   insertion order. Sorted containers such as `BTreeMap` are not
///   order-preserving: their order is derived from the keys, not from
///   insertion. The flag is an explicit capability of the type, never
///   inferred from what the concrete type happens to be.
pub trait Mapping {
    /// Whether iteration order matches insertion order.
    fn is_order_preserving(&self) -> bool;

    /// Look up a value by key.
    ///
    /// `None` means the key is absent. Absence is distinct from a stored
    /// `Value::Null`, which is a present value like any other.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Keys in this mapping's iteration order.
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the mapping has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the key exists, regardless of the stored value.
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl Mapping for IndexMap<String, Value> {
    fn is_order_preserving(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Option<&Value> {
        IndexMap::get(self, key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(IndexMap::keys(self).map(String::as_str))
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }
}

impl Mapping for BTreeMap<String, Value> {
    fn is_order_preserving(&self) -> bool {
        false
    }

    fn get(&self, key: &str) -> Option<&Value> {
        BTreeMap::get(self, key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(BTreeMap::keys(self).map(String::as_str))
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}

impl Mapping for HashMap<String, Value> {
    fn is_order_preserving(&self) -> bool {
        false
    }

    fn get(&self, key: &str) -> Option<&Value> {
        HashMap::get(self, key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(HashMap::keys(self).map(String::as_str))
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pairs() -> Vec<(String, Value)> {
        vec![
            ("zebra".to_string(), json!(1)),
            ("apple".to_string(), json!(2)),
            ("mango".to_string(), json!(3)),
        ]
    }

    #[test]
    fn index_map_preserves_insertion_order() {
        let map: IndexMap<String, Value> = pairs().into_iter().collect();
        assert!(map.is_order_preserving());

        let keys: Vec<&str> = Mapping::keys(&map).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn btree_map_is_not_order_preserving() {
        let map: BTreeMap<String, Value> = pairs().into_iter().collect();
        assert!(!map.is_order_preserving());

        // Iteration is sorted, which is exactly why the capability is off.
        let keys: Vec<&str> = Mapping::keys(&map).collect();
        assert_eq!(keys, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn hash_map_is_not_order_preserving() {
        let map: HashMap<String, Value> = pairs().into_iter().collect();
        assert!(!map.is_order_preserving());
        assert_eq!(Mapping::len(&map), 3);
    }

    #[test]
    fn stored_null_is_present() {
        let mut map: BTreeMap<String, Value> = BTreeMap::new();
        map.insert("k".to_string(), Value::Null);

        assert!(Mapping::contains_key(&map, "k"));
        assert_eq!(Mapping::get(&map, "k"), Some(&Value::Null));
        assert!(!Mapping::contains_key(&map, "missing"));
    }

    #[test]
    fn empty_mapping_reports_empty() {
        let map: IndexMap<String, Value> = IndexMap::new();
        assert!(Mapping::is_empty(&map));
        assert_eq!(Mapping::keys(&map).count(), 0);
    }
}

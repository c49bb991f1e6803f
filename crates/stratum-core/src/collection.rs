//! Name-keyed collection with a pluggable iteration order.
//!
//! Every collection a profile owns (saved queries, bags, templates, history)
//! shares the same contract: names are unique, `put` is an unconditional
//! upsert, `remove` is idempotent, and iteration order is well defined. The
//! only thing that varies is the ordering policy, so it is a constructor
//! parameter rather than a separate type per collection.

use std::collections::HashMap;

/// Iteration order of a [`NamedCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderPolicy {
    /// Entries iterate sorted by name, ascending.
    NameAscending,
    /// Entries iterate in the order their names were first inserted.
    Insertion,
}

/// A name-keyed collection with unique keys and a defined iteration order.
///
/// Upserting an existing name replaces its value but keeps its ordering
/// slot; removing and re-inserting a name under [`OrderPolicy::Insertion`]
/// moves it to the end, which is the behavior query history relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCollection<V> {
    policy: OrderPolicy,
    order: Vec<String>,
    entries: HashMap<String, V>,
}

impl<V> NamedCollection<V> {
    /// Creates an empty collection with the given ordering policy.
    pub fn new(policy: OrderPolicy) -> Self {
        Self {
            policy,
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Creates an empty name-ascending collection.
    pub fn sorted() -> Self {
        Self::new(OrderPolicy::NameAscending)
    }

    /// Creates an empty insertion-ordered collection.
    pub fn insertion_ordered() -> Self {
        Self::new(OrderPolicy::Insertion)
    }

    /// Builds a collection from `(name, value)` pairs.
    ///
    /// Later pairs with a duplicate name replace earlier ones, exactly as a
    /// sequence of [`put`](Self::put) calls would.
    pub fn from_pairs<I>(policy: OrderPolicy, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, V)>,
    {
        let mut collection = Self::new(policy);
        for (name, value) in pairs {
            collection.put(name, value);
        }
        collection
    }

    /// Returns the ordering policy of this collection.
    pub fn policy(&self) -> OrderPolicy {
        self.policy
    }

    /// Looks up a value by name.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Returns true if the collection contains the given name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Unconditional upsert. Never fails.
    ///
    /// A new name is placed according to the ordering policy; an existing
    /// name keeps its slot and only its value is replaced.
    pub fn put(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        if self.entries.insert(name.clone(), value).is_some() {
            return;
        }
        match self.policy {
            OrderPolicy::NameAscending => {
                let slot = self.order.binary_search(&name).unwrap_or_else(|slot| slot);
                self.order.insert(slot, name);
            }
            OrderPolicy::Insertion => self.order.push(name),
        }
    }

    /// Removes an entry by name, returning it if present. No-op on absent
    /// names.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        let removed = self.entries.remove(name)?;
        if let Some(position) = self.order.iter().position(|n| n == name) {
            self.order.remove(position);
        }
        Some(removed)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates entry names in policy order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Iterates `(name, value)` pairs in policy order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.order
            .iter()
            .filter_map(|name| self.entries.get(name).map(|value| (name.as_str(), value)))
    }

    /// Iterates values in policy order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<V: Clone> NamedCollection<V> {
    /// Clones the collection out into `(name, value)` pairs in policy order.
    pub fn to_pairs(&self) -> Vec<(String, V)> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<V>(collection: &NamedCollection<V>) -> Vec<&str> {
        collection.names().collect()
    }

    #[test]
    fn test_sorted_iteration_ignores_insertion_order() {
        let mut collection = NamedCollection::sorted();
        collection.put("c", 3);
        collection.put("a", 1);
        collection.put("b", 2);
        assert_eq!(names(&collection), ["a", "b", "c"]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut collection = NamedCollection::insertion_ordered();
        collection.put("c", 3);
        collection.put("a", 1);
        collection.put("b", 2);
        assert_eq!(names(&collection), ["c", "a", "b"]);
    }

    #[test]
    fn test_upsert_replaces_value_and_keeps_slot() {
        let mut collection = NamedCollection::insertion_ordered();
        collection.put("a", 1);
        collection.put("b", 2);
        collection.put("a", 10);
        assert_eq!(collection.len(), 2);
        assert_eq!(names(&collection), ["a", "b"]);
        assert_eq!(collection.get("a"), Some(&10));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut collection = NamedCollection::sorted();
        collection.put("a", 1);
        assert_eq!(collection.remove("a"), Some(1));
        assert_eq!(collection.remove("a"), None);
        assert_eq!(collection.remove("missing"), None);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_insertion_order_robust_to_interleaved_deletes() {
        let mut collection = NamedCollection::insertion_ordered();
        collection.put("a", 1);
        collection.put("b", 2);
        collection.put("c", 3);
        collection.remove("b");
        collection.put("d", 4);
        assert_eq!(names(&collection), ["a", "c", "d"]);
    }

    #[test]
    fn test_from_pairs_deduplicates_like_put() {
        let collection = NamedCollection::from_pairs(
            OrderPolicy::NameAscending,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 1),
                ("b".to_string(), 20),
            ],
        );
        assert_eq!(collection.len(), 2);
        assert_eq!(names(&collection), ["a", "b"]);
        assert_eq!(collection.get("b"), Some(&20));
        assert_eq!(collection.policy(), OrderPolicy::NameAscending);
        assert_eq!(
            collection.to_pairs(),
            vec![("a".to_string(), 1), ("b".to_string(), 20)]
        );
    }
}

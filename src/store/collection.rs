//! Insertion-ordered record collection

use std::collections::HashMap;

use super::records::Record;

/// Records keyed by id, listed back in the order they were inserted
#[derive(Debug)]
pub struct Collection<T> {
    entries: HashMap<String, T>,
    order: Vec<String>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: Record + Clone> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own id.
    ///
    /// Ids are never reused, so an existing entry is left untouched and
    /// `false` is returned.
    pub fn insert(&mut self, record: T) -> bool {
        let id = record.id().to_string();
        if self.entries.contains_key(&id) {
            return false;
        }
        self.order.push(id.clone());
        self.entries.insert(id, record);
        true
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Snapshot of every record in insertion order
    pub fn values(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::records::Store;

    fn store(id: &str, name: &str) -> Store {
        Store {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn values_keep_insertion_order() {
        let mut stores = Collection::new();
        for (id, name) in [("c", "Third"), ("a", "First"), ("b", "Second")] {
            assert!(stores.insert(store(id, name)));
        }

        let ids: Vec<String> = stores.values().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        assert_eq!(stores.len(), 3);
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let mut stores = Collection::new();
        assert!(stores.insert(store("a", "Original")));
        assert!(!stores.insert(store("a", "Impostor")));

        assert_eq!(stores.len(), 1);
        assert_eq!(stores.get("a").map(|s| s.name.as_str()), Some("Original"));
    }

    #[test]
    fn empty_collection_lookups() {
        let stores: Collection<Store> = Collection::new();
        assert!(stores.is_empty());
        assert!(!stores.contains("missing"));
        assert!(stores.get("missing").is_none());
        assert!(stores.values().is_empty());
    }
}

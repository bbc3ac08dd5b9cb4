//! Catalog service - owns the store and item collections

use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::collection::Collection;
use super::records::{Item, NewItem, NewStore, Store};

/// The two kinds of record the catalog holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Store,
    Item,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Store => f.write_str("Store"),
            ResourceKind::Item => f.write_str("Item"),
        }
    }
}

/// Catalog errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A required field was absent or malformed
    #[error("{0}")]
    Validation(String),

    /// No record with the requested id
    #[error("{0} not found")]
    NotFound(ResourceKind),

    /// An item referenced a store that does not exist
    #[error("Store not found")]
    UnknownStore(String),
}

/// In-memory catalog of stores and items.
///
/// Each collection sits behind its own lock. Stores are never removed, so an
/// item's store reference stays valid once checked.
#[derive(Debug, Default)]
pub struct Catalog {
    stores: RwLock<Collection<Store>>,
    items: RwLock<Collection<Item>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Stores
    // ------------------------------------------------------------------

    /// All stores in creation order
    pub fn list_stores(&self) -> Vec<Store> {
        self.stores.read().values()
    }

    /// Create a store with a fresh id
    pub fn create_store(&self, new: NewStore) -> Store {
        // Lock order is always stores, then items
        let mut stores = self.stores.write();
        let items = self.items.read();

        let store = Store {
            id: fresh_id(&stores, &items),
            name: new.name,
        };
        let inserted = stores.insert(store.clone());
        debug_assert!(inserted, "fresh id already present");
        drop(items);
        drop(stores);

        info!(store_id = %store.id, name = %store.name, "Store created");

        store
    }

    /// Look up a single store
    pub fn get_store(&self, id: &str) -> Result<Store, CatalogError> {
        self.stores.read().get(id).cloned().ok_or_else(|| {
            debug!(store_id = %id, "Store lookup missed");
            CatalogError::NotFound(ResourceKind::Store)
        })
    }

    pub fn store_count(&self) -> usize {
        self.stores.read().len()
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    /// All items in creation order
    pub fn list_items(&self) -> Vec<Item> {
        self.items.read().values()
    }

    /// Create an item under an existing store
    pub fn create_item(&self, new: NewItem) -> Result<Item, CatalogError> {
        let stores = self.stores.read();
        if !stores.contains(&new.store_id) {
            warn!(store_id = %new.store_id, "Rejected item for unknown store");
            return Err(CatalogError::UnknownStore(new.store_id));
        }

        let mut items = self.items.write();
        let item = Item {
            id: fresh_id(&stores, &items),
            name: new.name,
            price: new.price,
            store_id: new.store_id,
        };
        let inserted = items.insert(item.clone());
        debug_assert!(inserted, "fresh id already present");
        drop(items);
        drop(stores);

        info!(
            item_id = %item.id,
            store_id = %item.store_id,
            price = item.price,
            "Item created"
        );

        Ok(item)
    }

    /// Look up a single item
    pub fn get_item(&self, id: &str) -> Result<Item, CatalogError> {
        self.items.read().get(id).cloned().ok_or_else(|| {
            debug!(item_id = %id, "Item lookup missed");
            CatalogError::NotFound(ResourceKind::Item)
        })
    }

    pub fn item_count(&self) -> usize {
        self.items.read().len()
    }
}

/// Generate an id not used by any store or item.
///
/// Callers hold both collections locked so the id stays free until inserted.
fn fresh_id(stores: &Collection<Store>, items: &Collection<Item>) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if !stores.contains(&id) && !items.contains(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn new_store(name: &str) -> NewStore {
        NewStore { name: name.into() }
    }

    fn new_item(name: &str, price: f64, store_id: &str) -> NewItem {
        NewItem {
            name: name.into(),
            price,
            store_id: store_id.into(),
        }
    }

    #[test]
    fn created_store_can_be_fetched() {
        let catalog = Catalog::new();
        let store = catalog.create_store(new_store("Electronics"));

        assert_eq!(store.id.len(), 32);
        assert!(store.id.chars().all(|c| c.is_ascii_hexdigit()));

        let fetched = assert_ok!(catalog.get_store(&store.id));
        assert_eq!(fetched, store);
        assert_eq!(catalog.list_stores(), vec![store]);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let catalog = Catalog::new();

        let err = assert_err!(catalog.get_store("nope"));
        assert!(matches!(err, CatalogError::NotFound(ResourceKind::Store)));
        assert_eq!(err.to_string(), "Store not found");

        let err = assert_err!(catalog.get_item("nope"));
        assert!(matches!(err, CatalogError::NotFound(ResourceKind::Item)));
        assert_eq!(err.to_string(), "Item not found");
    }

    #[test]
    fn item_for_unknown_store_is_rejected_without_mutation() {
        let catalog = Catalog::new();
        catalog.create_store(new_store("Real"));

        let err = assert_err!(catalog.create_item(new_item("Ghost", 1.0, "missing")));
        assert!(matches!(err, CatalogError::UnknownStore(ref id) if id == "missing"));
        assert_eq!(err.to_string(), "Store not found");
        assert_eq!(catalog.item_count(), 0);
        assert!(catalog.list_items().is_empty());
    }

    #[test]
    fn item_under_existing_store() {
        let catalog = Catalog::new();
        let store = catalog.create_store(new_store("Electronics"));

        let item = assert_ok!(catalog.create_item(new_item("Laptop", 999.99, &store.id)));
        assert_eq!(item.store_id, store.id);
        assert_eq!(item.price, 999.99);

        let fetched = assert_ok!(catalog.get_item(&item.id));
        assert_eq!(fetched, item);
    }

    #[test]
    fn ids_are_unique_across_collections() {
        let catalog = Catalog::new();
        let mut seen = HashSet::new();

        for n in 0..25 {
            let store = catalog.create_store(new_store(&format!("Store {n}")));
            assert!(seen.insert(store.id.clone()));
            let item = assert_ok!(catalog.create_item(new_item("Thing", n as f64, &store.id)));
            assert!(seen.insert(item.id));
        }

        assert_eq!(catalog.store_count(), 25);
        assert_eq!(catalog.item_count(), 25);
    }

    #[test]
    fn lists_follow_creation_order() {
        let catalog = Catalog::new();
        let names = ["Books", "Games", "Garden"];
        for name in names {
            catalog.create_store(new_store(name));
        }

        let listed: Vec<String> = catalog.list_stores().into_iter().map(|s| s.name).collect();
        assert_eq!(listed, names);
    }

    #[test]
    fn reads_do_not_mutate() {
        let catalog = Catalog::new();
        let store = catalog.create_store(new_store("Stable"));

        let first = catalog.get_store(&store.id).unwrap();
        let second = catalog.get_store(&store.id).unwrap();
        assert_eq!(first, second);
        let _ = catalog.get_store("missing");
        assert_eq!(catalog.store_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn interleaved_store_and_item_creates_are_all_stored() {
        let catalog = Arc::new(Catalog::new());
        let root = catalog.create_store(new_store("Root"));

        let mut handles = Vec::new();
        for n in 0..4 {
            let catalog = catalog.clone();
            let root_id = root.id.clone();
            handles.push(tokio::spawn(async move {
                let mut returned = Vec::new();
                for i in 0..50 {
                    let store = catalog.create_store(new_store(&format!("s{n}-{i}")));
                    let item = catalog
                        .create_item(new_item("Thing", 1.0, &root_id))
                        .unwrap();
                    returned.push(store.id);
                    returned.push(item.id);
                }
                returned
            }));
        }

        let mut returned = Vec::new();
        for handle in handles {
            returned.extend(handle.await.unwrap());
        }

        // Every id handed back is retrievable and none repeats
        let unique: HashSet<&String> = returned.iter().collect();
        assert_eq!(unique.len(), returned.len());
        for id in &returned {
            assert!(catalog.get_store(id).is_ok() || catalog.get_item(id).is_ok());
        }
        assert_eq!(catalog.store_count(), 201);
        assert_eq!(catalog.item_count(), 200);
    }

    #[tokio::test]
    async fn concurrent_writers_lose_nothing() {
        let catalog = Arc::new(Catalog::new());
        let store = catalog.create_store(new_store("Busy"));

        let mut handles = Vec::new();
        for n in 0..8 {
            let catalog = catalog.clone();
            let store_id = store.id.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    catalog
                        .create_item(new_item(&format!("w{n}-{i}"), 1.0, &store_id))
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(catalog.item_count(), 400);
        let ids: HashSet<String> = catalog.list_items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 400);
    }
}

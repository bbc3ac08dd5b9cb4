//! In-memory data store for stores and items

pub mod catalog;
pub mod collection;
pub mod records;

pub use catalog::{Catalog, CatalogError, ResourceKind};
pub use collection::Collection;
pub use records::{
    from_json_object, CreateItemRequest, CreateStoreRequest, Item, NewItem, NewStore, Record, Store,
};

//! Store and item records, plus the request payloads that create them

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::catalog::CatalogError;

/// Anything kept in a [`Collection`](super::Collection) is addressed by its id
pub trait Record {
    fn id(&self) -> &str;
}

/// A named store owning zero or more items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
}

impl Record for Store {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A priced item belonging to exactly one store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub store_id: String,
}

impl Record for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Validated input for a new store
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub name: String,
}

/// Validated input for a new item
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub store_id: String,
}

/// `POST /store` body. Fields are optional so a missing one becomes a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStoreRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl CreateStoreRequest {
    pub fn validate(self) -> Result<NewStore, CatalogError> {
        Ok(NewStore {
            name: required_text("name", self.name)?,
        })
    }
}

/// `POST /item` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub store_id: Option<String>,
}

impl CreateItemRequest {
    pub fn validate(self) -> Result<NewItem, CatalogError> {
        let name = required_text("name", self.name)?;

        let price = self
            .price
            .ok_or_else(|| CatalogError::Validation("'price' is required".to_string()))?;
        if !price.is_finite() {
            return Err(CatalogError::Validation(
                "'price' must be a finite number".to_string(),
            ));
        }

        let store_id = required_text("store_id", self.store_id)?;

        Ok(NewItem {
            name,
            price,
            store_id,
        })
    }
}

/// Decode a request body into a typed payload.
///
/// Only JSON objects are accepted; derived `Deserialize` would otherwise take
/// positional arrays too.
pub fn from_json_object<T: DeserializeOwned>(body: Value) -> Result<T, CatalogError> {
    if !body.is_object() {
        return Err(CatalogError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(body)
        .map_err(|e| CatalogError::Validation(format!("invalid request body: {}", e)))
}

fn required_text(field: &str, value: Option<String>) -> Result<String, CatalogError> {
    match value {
        None => Err(CatalogError::Validation(format!("'{}' is required", field))),
        Some(v) if v.trim().is_empty() => Err(CatalogError::Validation(format!(
            "'{}' must not be empty",
            field
        ))),
        Some(v) => Ok(v),
    }
}

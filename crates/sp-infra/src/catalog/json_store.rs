use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use sp_core::ports::{ItemRecord, ItemStorePort, PostalCodeDirectoryPort, RemoteStoreError};
use sp_core::{Coordinates, PostalCode, PostalCodeDetail, StoreLocation};
use tokio::fs;
use tracing::{debug, info};

use crate::records::item_record;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    #[serde(default)]
    postal_codes: BTreeMap<String, CatalogPostalCode>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPostalCode {
    #[serde(default)]
    stores: BTreeMap<String, CatalogStore>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogStore {
    #[serde(default)]
    location: Option<Value>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    items: Vec<Map<String, Value>>,
}

impl CatalogStore {
    fn location(&self) -> StoreLocation {
        StoreLocation {
            coordinates: self.location.as_ref().and_then(Coordinates::from_value),
            address: self.address.clone(),
        }
    }
}

/// Item data read from a local JSON file with the same hierarchy as the
/// document database:
///
/// ```json
/// { "postalCodes": { "22030": { "stores": { "Target": {
///     "location": { "lat": 38.85, "lng": -77.30 },
///     "items": [ { "id": "a1", "name": "Whole Milk", "price": 3.99 } ]
/// } } } } }
/// ```
///
/// The file is re-read on every call. Items without an `id` are numbered by
/// position within their store.
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<CatalogFile, RemoteStoreError> {
        let content = fs::read_to_string(&self.path).await.map_err(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                RemoteStoreError::Unavailable(format!(
                    "catalog file not found: {}",
                    self.path.display()
                ))
            } else {
                RemoteStoreError::Unavailable(format!(
                    "read catalog failed: {}: {}",
                    self.path.display(),
                    err
                ))
            }
        })?;

        serde_json::from_str(&content).map_err(|err| {
            RemoteStoreError::Decode(format!("parse catalog {}: {}", self.path.display(), err))
        })
    }
}

#[async_trait]
impl ItemStorePort for JsonCatalogStore {
    async fn get_all_items_across_stores(&self) -> Result<Vec<ItemRecord>, RemoteStoreError> {
        let catalog = self.read().await?;

        let mut records = Vec::new();
        for (postal_code, entry) in &catalog.postal_codes {
            for (store, store_entry) in &entry.stores {
                for (position, fields) in store_entry.items.iter().enumerate() {
                    let id = fields
                        .get("id")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| position.to_string());
                    records.push(item_record(id, store.as_str(), postal_code.as_str(), fields));
                }
            }
        }

        info!(count = records.len(), path = %self.path.display(), "Read catalog items");
        Ok(records)
    }
}

#[async_trait]
impl PostalCodeDirectoryPort for JsonCatalogStore {
    async fn list_postal_codes(&self) -> Result<Vec<PostalCode>, RemoteStoreError> {
        let catalog = self.read().await?;
        Ok(catalog
            .postal_codes
            .keys()
            .map(|code| PostalCode::new(code.as_str()))
            .collect())
    }

    async fn get_postal_code_detail(
        &self,
        code: &PostalCode,
    ) -> Result<Option<PostalCodeDetail>, RemoteStoreError> {
        let catalog = self.read().await?;
        let Some(entry) = catalog.postal_codes.get(code.as_str()) else {
            debug!(code = %code, "Postal code not in catalog");
            return Ok(None);
        };

        let stores = entry
            .stores
            .iter()
            .map(|(name, store)| (name.clone(), store.location()))
            .collect();
        Ok(Some(PostalCodeDetail { stores }))
    }
}

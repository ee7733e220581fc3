use async_trait::async_trait;

use crate::item::{Item, Price};
use crate::ports::errors::RemoteStoreError;

/// One item document as returned by the item store, already annotated with
/// its owning store and postal code.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// Backend document id; not carried into [`Item`]
    pub id: String,
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image_url: Option<String>,
    pub store: String,
    pub postal_code: String,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Item {
            name: record.name,
            price: record.price,
            image_url: record.image_url.unwrap_or_default(),
            store: record.store,
            postal_code: record.postal_code,
        }
    }
}

/// Read access to the item documents of every store under every postal code.
#[async_trait]
pub trait ItemStorePort: Send + Sync {
    /// Full scan of all item documents.
    ///
    /// No paging: one call returns everything. Errors are returned as-is;
    /// callers decide how to degrade.
    async fn get_all_items_across_stores(&self) -> Result<Vec<ItemRecord>, RemoteStoreError>;
}

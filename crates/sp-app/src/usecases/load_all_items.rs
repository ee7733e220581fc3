use std::sync::Arc;

use sp_core::ports::ItemStorePort;
use sp_core::Item;
use tracing::{info, info_span, warn, Instrument};

/// Use case for fetching every item of every store.
///
/// ## Behavior
/// - Fetch failures are absorbed: returns `None` and logs at `warn`
/// - `Some(vec![])` means the backend answered with no items
///
/// Exactly one full scan per call; there is no paging or caching here.
pub struct LoadAllItems {
    item_store: Arc<dyn ItemStorePort>,
}

impl LoadAllItems {
    pub fn new(item_store: Arc<dyn ItemStorePort>) -> Self {
        Self { item_store }
    }

    pub async fn execute(&self) -> Option<Vec<Item>> {
        let span = info_span!("usecase.load_all_items.execute");

        async move {
            match self.item_store.get_all_items_across_stores().await {
                Ok(records) => {
                    let items: Vec<Item> = records.into_iter().map(Item::from).collect();
                    info!(count = items.len(), "Loaded items across stores");
                    Some(items)
                }
                Err(err) => {
                    warn!(error = %err, "Failed to fetch items across stores");
                    None
                }
            }
        }
        .instrument(span)
        .await
    }
}

//! Exercises the item store port contract end to end through pure core logic:
//! records → items → search → shopping list entries → grouped view.

use async_trait::async_trait;
use sp_core::ports::{ItemRecord, ItemStorePort, RemoteStoreError};
use sp_core::{filter_items, group_by_store, Item, Price, ShoppingListEntry};

/// Fixed in-memory store returning the same records on every scan
struct FixedItemStore {
    records: Vec<ItemRecord>,
}

#[async_trait]
impl ItemStorePort for FixedItemStore {
    async fn get_all_items_across_stores(&self) -> Result<Vec<ItemRecord>, RemoteStoreError> {
        Ok(self.records.clone())
    }
}

fn record(id: &str, name: Option<&str>, price: f64, store: &str, postal_code: &str) -> ItemRecord {
    ItemRecord {
        id: id.to_string(),
        name: name.map(str::to_string),
        price: Some(Price::Amount(price)),
        image_url: None,
        store: store.to_string(),
        postal_code: postal_code.to_string(),
    }
}

#[tokio::test]
async fn records_flow_into_grouped_shopping_list() {
    let store = FixedItemStore {
        records: vec![
            record("1", Some("Whole Milk"), 3.99, "Target", "22030"),
            record("2", Some("Wheat Bread"), 2.49, "Aldi", "22030"),
            record("3", None, 1.00, "Aldi", "22030"),
            record("4", Some("Oat Milk"), 4.49, "Aldi", "20151"),
            record("5", Some("Skim Milk"), 3.49, "Aldi", "22030"),
        ],
    };

    let items: Vec<Item> = store
        .get_all_items_across_stores()
        .await
        .unwrap()
        .into_iter()
        .map(Item::from)
        .collect();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|i| i.image_url.is_empty()));

    let milk = filter_items(&items, "MILK", Some("22030"));
    let entries: Vec<ShoppingListEntry> = milk
        .iter()
        .filter_map(ShoppingListEntry::from_item)
        .collect();
    assert_eq!(entries.len(), 2);

    let groups = group_by_store(&entries);
    assert_eq!(groups[0].store, "Aldi");
    assert_eq!(groups[0].entries[0].entry.name, "Skim Milk");
    assert_eq!(groups[1].store, "Target");
    assert_eq!(groups[1].entries[0].entry.name, "Whole Milk");

    // Regrouping is a permutation of the insertion-ordered list
    let mut indices: Vec<usize> = groups
        .iter()
        .flat_map(|g| g.entries.iter().map(|e| e.index))
        .collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..entries.len()).collect::<Vec<_>>());
}

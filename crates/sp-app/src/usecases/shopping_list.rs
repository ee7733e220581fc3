use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sp_core::ports::{KeyValueStoreError, KeyValueStorePort};
use sp_core::shopping_list::{decode_entries, encode_entries, SHOPPING_LIST_KEY};
use sp_core::{group_by_store, Item, ShoppingListEntry, StoreGroup};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ShoppingListError {
    #[error("failed to serialize shopping list: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to persist shopping list: {0}")]
    Persist(#[from] KeyValueStoreError),
}

/// The user's shopping list, persisted as one JSON array under
/// [`SHOPPING_LIST_KEY`].
///
/// ## Behavior
/// - Starts uninitialized; the first operation reads persisted state
/// - Unreadable persisted state is treated as an empty list (logged)
/// - Every mutation rewrites the whole list while holding the lock, so
///   writes from this process land in mutation order
/// - In-memory state is updated before the write; a failed write is
///   reported but not rolled back
pub struct ShoppingListStore {
    storage: Arc<dyn KeyValueStorePort>,
    entries: Mutex<Option<Vec<ShoppingListEntry>>>,
}

impl ShoppingListStore {
    pub fn new(storage: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            storage,
            entries: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<ShoppingListEntry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Re-reads persisted state, replacing whatever is in memory.
    pub fn load(&self) -> Vec<ShoppingListEntry> {
        let entries = self.read_persisted();
        *self.lock() = Some(entries.clone());
        entries
    }

    fn read_persisted(&self) -> Vec<ShoppingListEntry> {
        let raw = match self.storage.get(SHOPPING_LIST_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "Failed to read shopping list, starting empty");
                return Vec::new();
            }
        };

        match decode_entries(&raw) {
            Ok(entries) => {
                debug!(count = entries.len(), "Loaded shopping list");
                entries
            }
            Err(err) => {
                warn!(error = %err, "Persisted shopping list is malformed, starting empty");
                Vec::new()
            }
        }
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut Vec<ShoppingListEntry>) -> R) -> R {
        let mut guard = self.lock();
        let entries = guard.get_or_insert_with(|| self.read_persisted());
        f(entries)
    }

    fn persist(&self, entries: &[ShoppingListEntry]) -> Result<(), ShoppingListError> {
        let raw = encode_entries(entries)?;
        self.storage.set(SHOPPING_LIST_KEY, &raw)?;
        Ok(())
    }

    #[tracing::instrument(name = "usecase.shopping_list.add", skip(self, entry), fields(store = %entry.store))]
    pub fn add(&self, entry: ShoppingListEntry) -> Result<(), ShoppingListError> {
        self.with_entries(|entries| {
            entries.push(entry);
            info!(count = entries.len(), "Added shopping list entry");
            self.persist(entries)
        })
    }

    /// Adds a search result. Returns the recorded entry, or `None` when the
    /// item has no name or no price.
    pub fn add_item(&self, item: &Item) -> Result<Option<ShoppingListEntry>, ShoppingListError> {
        let Some(entry) = ShoppingListEntry::from_item(item) else {
            debug!(store = %item.store, "Skipping item without name or price");
            return Ok(None);
        };
        self.add(entry.clone())?;
        Ok(Some(entry))
    }

    /// Removes the entry at an insertion-order position.
    ///
    /// Out-of-range positions are a no-op and do not touch storage.
    #[tracing::instrument(name = "usecase.shopping_list.remove_at", skip(self))]
    pub fn remove_at(&self, index: usize) -> Result<Option<ShoppingListEntry>, ShoppingListError> {
        self.with_entries(|entries| -> Result<_, ShoppingListError> {
            if index >= entries.len() {
                debug!(len = entries.len(), "Index out of range, nothing removed");
                return Ok(None);
            }
            let removed = entries.remove(index);
            info!(count = entries.len(), "Removed shopping list entry");
            self.persist(entries)?;
            Ok(Some(removed))
        })
    }

    #[tracing::instrument(name = "usecase.shopping_list.clear", skip(self))]
    pub fn clear(&self) -> Result<(), ShoppingListError> {
        self.with_entries(|entries| -> Result<(), ShoppingListError> {
            entries.clear();
            self.storage.remove(SHOPPING_LIST_KEY)?;
            Ok(())
        })
    }

    pub fn entries(&self) -> Vec<ShoppingListEntry> {
        self.with_entries(|entries| entries.clone())
    }

    /// Entries grouped by store name, ascending.
    pub fn grouped_view(&self) -> Vec<StoreGroup> {
        self.with_entries(|entries| group_by_store(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{io_error, MockKeyValueStore, RecordingKeyValueStore};

    fn entry(name: &str, price: &str, store: &str) -> ShoppingListEntry {
        ShoppingListEntry {
            name: name.to_string(),
            price: price.to_string(),
            store: store.to_string(),
            postal_code: "22030".to_string(),
            image: String::new(),
        }
    }

    fn store_over(storage: &Arc<RecordingKeyValueStore>) -> ShoppingListStore {
        ShoppingListStore::new(storage.clone())
    }

    #[test]
    fn test_add_groups_by_store_and_persists() {
        let storage = Arc::new(RecordingKeyValueStore::default());
        let list = store_over(&storage);

        list.add(entry("Milk", "3.99", "Target")).unwrap();
        list.add(entry("Bread", "2.49", "Aldi")).unwrap();

        let groups = list.grouped_view();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].store, "Aldi");
        assert_eq!(groups[0].entries[0].entry.name, "Bread");
        assert_eq!(groups[1].store, "Target");
        assert_eq!(groups[1].entries[0].entry.name, "Milk");

        let persisted = decode_entries(&storage.raw(SHOPPING_LIST_KEY).unwrap()).unwrap();
        let names: Vec<&str> = persisted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Bread"]);
    }

    #[test]
    fn test_remove_at_uses_insertion_order() {
        let storage = Arc::new(RecordingKeyValueStore::default());
        let list = store_over(&storage);
        list.add(entry("Milk", "3.99", "Target")).unwrap();
        list.add(entry("Bread", "2.49", "Aldi")).unwrap();

        let removed = list.remove_at(0).unwrap();

        assert_eq!(removed.map(|e| e.name), Some("Milk".to_string()));
        let groups = list.grouped_view();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].store, "Aldi");
        assert_eq!(groups[0].entries[0].index, 0);

        let persisted = decode_entries(&storage.raw(SHOPPING_LIST_KEY).unwrap()).unwrap();
        assert_eq!(persisted, vec![entry("Bread", "2.49", "Aldi")]);
    }

    #[test]
    fn test_load_ignores_malformed_state() {
        let storage = Arc::new(RecordingKeyValueStore::with_value(
            SHOPPING_LIST_KEY,
            "not json",
        ));
        let list = store_over(&storage);

        assert!(list.load().is_empty());
        assert!(list.grouped_view().is_empty());
        assert!(list.is_loaded());
    }

    #[test]
    fn test_load_reads_legacy_entries() {
        let raw = r#"[{"name":"Eggs","price":3.49,"store":"Giant","zip":"22030","image":""}]"#;
        let storage = Arc::new(RecordingKeyValueStore::with_value(SHOPPING_LIST_KEY, raw));
        let list = store_over(&storage);

        let entries = list.load();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].price, "3.49");
        assert_eq!(entries[0].postal_code, "22030");
    }

    #[test]
    fn test_entry_without_price_keeps_rest_of_list() {
        let raw = r#"[{"name":"Eggs","store":"Giant","zip":"22030","price":"3.49"},{"name":"Apples","store":"Giant","zip":"22030"}]"#;
        let storage = Arc::new(RecordingKeyValueStore::with_value(SHOPPING_LIST_KEY, raw));
        let list = store_over(&storage);

        assert_eq!(list.entries().len(), 2);
        list.add(entry("Milk", "3.99", "Target")).unwrap();

        let persisted = decode_entries(&storage.raw(SHOPPING_LIST_KEY).unwrap()).unwrap();
        let names: Vec<&str> = persisted.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Apples", "Milk"]);
    }

    #[test]
    fn test_round_trip_through_new_store() {
        let storage = Arc::new(RecordingKeyValueStore::default());
        let list = store_over(&storage);
        list.add(entry("Milk", "3.99", "Target")).unwrap();
        list.add(entry("Eggs", "3.49", "Giant")).unwrap();
        list.add(entry("Bananas", "0.59", "Aldi")).unwrap();
        list.remove_at(1).unwrap();

        let reopened = store_over(&storage);

        assert_eq!(reopened.entries(), list.entries());
    }

    #[test]
    fn test_operations_on_fresh_store_load_first() {
        let raw = encode_entries(&[entry("Milk", "3.99", "Target")]).unwrap();
        let storage = Arc::new(RecordingKeyValueStore::with_value(SHOPPING_LIST_KEY, &raw));
        let list = store_over(&storage);
        assert!(!list.is_loaded());

        list.add(entry("Bread", "2.49", "Aldi")).unwrap();

        assert_eq!(list.entries().len(), 2);
    }

    #[test]
    fn test_out_of_range_remove_does_not_write() {
        let storage = Arc::new(RecordingKeyValueStore::default());
        let list = store_over(&storage);
        list.add(entry("Milk", "3.99", "Target")).unwrap();
        let writes = storage.write_count();

        assert!(list.remove_at(5).unwrap().is_none());
        assert_eq!(storage.write_count(), writes);
        assert_eq!(list.entries().len(), 1);
    }

    #[test]
    fn test_grouped_view_is_idempotent() {
        let storage = Arc::new(RecordingKeyValueStore::default());
        let list = store_over(&storage);
        list.add(entry("Milk", "3.99", "Target")).unwrap();
        list.add(entry("Bread", "2.49", "Aldi")).unwrap();
        list.add(entry("Eggs", "3.49", "Aldi")).unwrap();

        assert_eq!(list.grouped_view(), list.grouped_view());
        assert_eq!(list.grouped_view()[0].entries.len(), 2);
    }

    #[test]
    fn test_add_keeps_entry_when_write_fails() {
        let mut storage = MockKeyValueStore::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .times(1)
            .returning(|key, _| Err(io_error(key)));
        let list = ShoppingListStore::new(Arc::new(storage));

        let result = list.add(entry("Milk", "3.99", "Target"));

        assert!(matches!(result, Err(ShoppingListError::Persist(_))));
        assert_eq!(list.grouped_view()[0].entries[0].entry.name, "Milk");
    }

    #[test]
    fn test_unreadable_storage_starts_empty() {
        let mut storage = MockKeyValueStore::new();
        storage
            .expect_get()
            .returning(|key| Err(io_error(key)));
        storage.expect_set().never();
        let list = ShoppingListStore::new(Arc::new(storage));

        assert!(list.entries().is_empty());
        assert!(list.remove_at(0).unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_persisted_key() {
        let storage = Arc::new(RecordingKeyValueStore::default());
        let list = store_over(&storage);
        list.add(entry("Milk", "3.99", "Target")).unwrap();

        list.clear().unwrap();

        assert!(list.entries().is_empty());
        assert!(storage.raw(SHOPPING_LIST_KEY).is_none());
    }

    #[test]
    fn test_add_item_skips_undisplayable_items() {
        let storage = Arc::new(RecordingKeyValueStore::default());
        let list = store_over(&storage);
        let mut nameless = Item::new("x", 1.0, "Aldi", "22030");
        nameless.name = None;

        assert!(list.add_item(&nameless).unwrap().is_none());
        assert_eq!(storage.write_count(), 0);

        let added = list
            .add_item(&Item::new("Whole Milk", 3.99, "Target", "22030"))
            .unwrap()
            .unwrap();
        assert_eq!(added.price, "3.99");
        assert_eq!(list.entries(), vec![added]);
    }
}

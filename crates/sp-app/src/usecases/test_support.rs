//! Mocks and fixtures shared by use case tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mockall::mock;
use sp_core::location::{PostalCode, PostalCodeDetail};
use sp_core::ports::{
    ItemRecord, ItemStorePort, KeyValueStoreError, KeyValueStorePort, PostalCodeDirectoryPort,
    RemoteStoreError,
};
use sp_core::Price;

mock! {
    pub ItemStore {}

    #[async_trait]
    impl ItemStorePort for ItemStore {
        async fn get_all_items_across_stores(&self) -> Result<Vec<ItemRecord>, RemoteStoreError>;
    }
}

mock! {
    pub PostalCodeDirectory {}

    #[async_trait]
    impl PostalCodeDirectoryPort for PostalCodeDirectory {
        async fn list_postal_codes(&self) -> Result<Vec<PostalCode>, RemoteStoreError>;
        async fn get_postal_code_detail(
            &self,
            code: &PostalCode,
        ) -> Result<Option<PostalCodeDetail>, RemoteStoreError>;
    }
}

mock! {
    pub KeyValueStore {}

    impl KeyValueStorePort for KeyValueStore {
        fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;
        fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;
        fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
    }
}

/// Map-backed storage that records every write.
#[derive(Default)]
pub struct RecordingKeyValueStore {
    values: Mutex<HashMap<String, String>>,
    pub writes: Mutex<Vec<String>>,
}

impl RecordingKeyValueStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

impl KeyValueStorePort for RecordingKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.writes.lock().unwrap().push(value.to_string());
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

pub fn record(name: &str, price: f64, store: &str, postal_code: &str) -> ItemRecord {
    ItemRecord {
        id: format!("{}-{}", store, name),
        name: Some(name.to_string()),
        price: Some(Price::Amount(price)),
        image_url: None,
        store: store.to_string(),
        postal_code: postal_code.to_string(),
    }
}

pub fn io_error(key: &str) -> KeyValueStoreError {
    KeyValueStoreError::Io {
        key: key.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
    }
}

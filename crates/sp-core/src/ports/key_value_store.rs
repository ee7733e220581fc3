use crate::ports::errors::KeyValueStoreError;

/// Synchronous string key-value storage (single origin, single device).
///
/// Writes overwrite the whole value; there is no cross-writer coordination.
pub trait KeyValueStorePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}

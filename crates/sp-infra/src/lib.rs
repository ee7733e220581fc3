pub mod app_dirs;
pub mod catalog;
pub mod firestore;
pub mod kv;

mod records;

pub use app_dirs::DirsAppDirsAdapter;
pub use catalog::JsonCatalogStore;
pub use firestore::{FirestoreClient, FirestoreConfig};
pub use kv::{FileKeyValueStore, InMemoryKeyValueStore};

//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! the document database and of where the shopping list is persisted.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `sp-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `sp-core/ports`.
//! Otherwise, place it in the relevant domain module.

pub mod app_dirs;
pub mod errors;
pub mod item_store;
pub mod key_value_store;
pub mod postal_code_directory;

pub use app_dirs::AppDirsPort;
pub use errors::{AppDirsError, KeyValueStoreError, RemoteStoreError};
pub use item_store::{ItemRecord, ItemStorePort};
pub use key_value_store::KeyValueStorePort;
pub use postal_code_directory::PostalCodeDirectoryPort;

//! # Application Dependencies
//!
//! This module defines the dependency grouping for App construction.
//!
//! **Note**: This is NOT a Builder pattern.
//! - No build steps
//! - No default values
//! - Just parameter grouping

use std::sync::Arc;

use sp_core::ports::{ItemStorePort, KeyValueStorePort, PostalCodeDirectoryPort};

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no optional fields.
pub struct AppDeps {
    // Item data
    pub item_store: Arc<dyn ItemStorePort>,
    pub postal_codes: Arc<dyn PostalCodeDirectoryPort>,

    // Local persistence
    pub key_value_store: Arc<dyn KeyValueStorePort>,
}

//! # sp-core
//!
//! Core domain models and business logic for Spark.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod item;
pub mod location;
pub mod ports;
pub mod search;
pub mod shopping_list;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use item::{Item, Price};
pub use location::{Coordinates, PostalCode, PostalCodeDetail, StoreLocation};
pub use search::{
    filter_items, filter_loaded, CatalogSnapshot, FallbackReason, SearchQuery, SearchView,
    SortOrder,
};
pub use shopping_list::{group_by_store, GroupedEntry, ShoppingListEntry, StoreGroup};

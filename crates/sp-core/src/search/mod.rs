//! Item search
//!
//! - [`filter`] narrows a loaded item set by name and postal code
//! - [`view`] turns the catalog state plus a query into what the user sees

pub mod filter;
pub mod view;

pub use filter::{filter_items, filter_loaded, sort_by_price, suggest_names, SearchQuery, SortOrder};
pub use view::{CatalogSnapshot, FallbackReason, SearchView};

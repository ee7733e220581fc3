//! Business logic use cases
//!
//! [ItemStorePort]
//         ↓
// LoadAllItems        → Option<Vec<Item>> (None = fetch failed)
//         ↓
// ItemCatalog         → cached snapshot, stale loads dropped
//         ↓
// SearchSession       → SearchView recomputed on every input change
// ---------------------------------
// ShoppingListStore   → add / remove_at / grouped_view over KeyValueStorePort
// ListPostalCodes / GetPostalCodeDetail → store locations

pub mod catalog;
pub mod load_all_items;
pub mod postal_codes;
pub mod search_session;
pub mod shopping_list;

pub use catalog::{ItemCatalog, LoadTicket};
pub use load_all_items::LoadAllItems;
pub use postal_codes::{GetPostalCodeDetail, ListPostalCodes};
pub use search_session::SearchSession;
pub use shopping_list::{ShoppingListError, ShoppingListStore};

#[cfg(test)]
pub(crate) mod test_support;

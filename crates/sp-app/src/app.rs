use std::sync::Arc;

use crate::deps::AppDeps;
use crate::usecases::{
    GetPostalCodeDetail, ItemCatalog, ListPostalCodes, LoadAllItems, SearchSession,
    ShoppingListStore,
};

/// Wired application: one shared item catalog and one shopping list.
///
/// Use case accessors are cheap; each returns a fresh use case over the
/// same ports.
pub struct App {
    deps: AppDeps,
    catalog: Arc<ItemCatalog>,
    shopping_list: Arc<ShoppingListStore>,
}

impl App {
    pub fn new(deps: AppDeps) -> Self {
        let shopping_list = Arc::new(ShoppingListStore::new(deps.key_value_store.clone()));
        Self {
            deps,
            catalog: Arc::new(ItemCatalog::new()),
            shopping_list,
        }
    }

    pub fn load_all_items(&self) -> LoadAllItems {
        LoadAllItems::new(self.deps.item_store.clone())
    }

    /// New search view over the shared catalog.
    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(self.catalog.clone(), self.load_all_items())
    }

    pub fn shopping_list(&self) -> Arc<ShoppingListStore> {
        self.shopping_list.clone()
    }

    pub fn list_postal_codes(&self) -> ListPostalCodes {
        ListPostalCodes::new(self.deps.postal_codes.clone())
    }

    pub fn get_postal_code_detail(&self) -> GetPostalCodeDetail {
        GetPostalCodeDetail::new(self.deps.postal_codes.clone())
    }

    /// Stops in-flight catalog loads from landing.
    pub fn shutdown(&self) {
        self.catalog.dispose();
    }
}

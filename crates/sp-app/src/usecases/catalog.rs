//! In-memory item cache shared by every search view.

use std::sync::{Mutex, MutexGuard, PoisonError};

use sp_core::{CatalogSnapshot, Item};
use tracing::debug;

use super::load_all_items::LoadAllItems;

/// Generation number handed out when a load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Default)]
struct CatalogState {
    snapshot: CatalogSnapshot,
    generation: u64,
    disposed: bool,
}

/// Cached result of the most recent item load.
///
/// Loads may overlap. A completed load is applied only if no newer load has
/// started since and the catalog was not disposed in the meantime.
#[derive(Default)]
pub struct ItemCatalog {
    state: Mutex<CatalogState>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.lock().snapshot.clone()
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self.lock().snapshot, CatalogSnapshot::NotLoaded)
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }

    pub fn begin_load(&self) -> LoadTicket {
        let mut state = self.lock();
        state.generation += 1;
        LoadTicket(state.generation)
    }

    /// Applies a load result. Returns `false` when the result was stale.
    pub fn complete_load(&self, ticket: LoadTicket, result: Option<Vec<Item>>) -> bool {
        let mut state = self.lock();
        if state.disposed || ticket.0 != state.generation {
            debug!(
                ticket = ticket.0,
                current = state.generation,
                disposed = state.disposed,
                "Dropping stale item load"
            );
            return false;
        }
        state.snapshot = CatalogSnapshot::from_load_result(result);
        true
    }

    /// Loads only if nothing has been loaded yet.
    pub async fn ensure_loaded(&self, loader: &LoadAllItems) -> CatalogSnapshot {
        if self.is_loaded() {
            return self.snapshot();
        }
        self.refresh(loader).await
    }

    pub async fn refresh(&self, loader: &LoadAllItems) -> CatalogSnapshot {
        let ticket = self.begin_load();
        let result = loader.execute().await;
        self.complete_load(ticket, result);
        self.snapshot()
    }

    pub fn dispose(&self) {
        self.lock().disposed = true;
    }
}

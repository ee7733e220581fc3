use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sp_core::search::suggest_names;
use sp_core::{SearchQuery, SearchView, SortOrder};
use tokio::sync::watch;
use tracing::{debug, info_span, Instrument};

use super::catalog::ItemCatalog;
use super::load_all_items::LoadAllItems;

/// Search state for one view: the current query over the shared catalog.
///
/// Every input change recomputes the [`SearchView`] and publishes it to
/// subscribers. Filtering is synchronous; only loads suspend.
pub struct SearchSession {
    catalog: Arc<ItemCatalog>,
    loader: LoadAllItems,
    query: Mutex<SearchQuery>,
    view_tx: watch::Sender<SearchView>,
}

impl SearchSession {
    pub fn new(catalog: Arc<ItemCatalog>, loader: LoadAllItems) -> Self {
        let (view_tx, _) = watch::channel(SearchView::Loading);
        Self {
            catalog,
            loader,
            query: Mutex::new(SearchQuery::default()),
            view_tx,
        }
    }

    fn lock_query(&self) -> MutexGuard<'_, SearchQuery> {
        self.query.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> SearchView {
        self.view_tx.borrow().clone()
    }

    pub fn query(&self) -> SearchQuery {
        self.lock_query().clone()
    }

    /// Loads the catalog if needed, then publishes the first view.
    pub async fn start(&self) -> SearchView {
        let span = info_span!("usecase.search_session.start");
        async {
            self.catalog.ensure_loaded(&self.loader).await;
            self.recompute()
        }
        .instrument(span)
        .await
    }

    /// Forces a fresh load, then recomputes.
    pub async fn reload(&self) -> SearchView {
        let span = info_span!("usecase.search_session.reload");
        async {
            self.catalog.refresh(&self.loader).await;
            self.recompute()
        }
        .instrument(span)
        .await
    }

    pub fn set_term(&self, term: impl Into<String>) -> SearchView {
        let term = term.into();
        self.update(|query| query.term = term)
    }

    /// `None` or a blank code removes the postal-code constraint.
    pub fn set_postal_code(&self, postal_code: Option<String>) -> SearchView {
        self.update(|query| query.postal_code = postal_code)
    }

    pub fn set_sort(&self, sort: SortOrder) -> SearchView {
        self.update(|query| query.sort = sort)
    }

    /// Distinct item names in the loaded catalog, for autocomplete.
    pub fn suggestions(&self) -> Vec<String> {
        self.catalog
            .snapshot()
            .items()
            .map(suggest_names)
            .unwrap_or_default()
    }

    fn update(&self, change: impl FnOnce(&mut SearchQuery)) -> SearchView {
        {
            let mut query = self.lock_query();
            change(&mut *query);
        }
        self.recompute()
    }

    fn recompute(&self) -> SearchView {
        let query = self.query();
        let view = SearchView::resolve(&self.catalog.snapshot(), &query);
        debug!(
            term = %query.term,
            postal_code = ?query.postal_code,
            shown = view.items().len(),
            "Recomputed search view"
        );
        self.view_tx.send_replace(view.clone());
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::{record, MockItemStore};
    use sp_core::ports::{ItemRecord, RemoteStoreError};
    use sp_core::FallbackReason;

    fn session_with(records: Result<Vec<ItemRecord>, ()>) -> SearchSession {
        let mut store = MockItemStore::new();
        store
            .expect_get_all_items_across_stores()
            .returning(move || {
                records
                    .clone()
                    .map_err(|_| RemoteStoreError::Transport("offline".to_string()))
            });
        SearchSession::new(
            Arc::new(ItemCatalog::new()),
            LoadAllItems::new(Arc::new(store)),
        )
    }

    fn sample_records() -> Vec<ItemRecord> {
        vec![
            record("Whole Milk", 3.99, "Target", "22030"),
            record("Wheat Bread", 2.49, "Aldi", "22030"),
            record("Oat Milk", 4.49, "Aldi", "20151"),
            record("Skim Milk", 3.49, "Aldi", "22030"),
        ]
    }

    fn names(view: &SearchView) -> Vec<&str> {
        view.items()
            .iter()
            .filter_map(|item| item.name.as_deref())
            .collect()
    }

    #[tokio::test]
    async fn test_view_is_loading_before_start() {
        let session = session_with(Ok(sample_records()));
        assert_eq!(session.view(), SearchView::Loading);
    }

    #[tokio::test]
    async fn test_term_and_postal_code_recompute_results() {
        let session = session_with(Ok(sample_records()));
        let all = session.start().await;
        assert_eq!(all.items().len(), 4);

        session.set_postal_code(Some("22030".to_string()));
        let view = session.set_term("milk");

        assert_eq!(names(&view), vec!["Whole Milk", "Skim Milk"]);
        assert_eq!(session.view(), view);
    }

    #[tokio::test]
    async fn test_price_sort_orders_cheapest_first() {
        let session = session_with(Ok(sample_records()));
        session.start().await;
        session.set_term("milk");

        let view = session.set_sort(SortOrder::PriceAscending);

        assert_eq!(names(&view), vec!["Skim Milk", "Whole Milk", "Oat Milk"]);
    }

    #[tokio::test]
    async fn test_no_match_is_distinct_from_fallback() {
        let session = session_with(Ok(sample_records()));
        session.start().await;

        let view = session.set_term("caviar");

        assert_eq!(
            view,
            SearchView::NoResults {
                term: "caviar".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_failed_load_shows_placeholders_for_any_term() {
        let session = session_with(Err(()));
        session.start().await;

        let view = session.set_term("caviar");

        match view {
            SearchView::Fallback { reason, items } => {
                assert_eq!(reason, FallbackReason::FetchFailed);
                assert_eq!(items.len(), 4);
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_shows_placeholders() {
        let session = session_with(Ok(Vec::new()));

        let view = session.start().await;

        assert!(matches!(
            view,
            SearchView::Fallback {
                reason: FallbackReason::CatalogEmpty,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_subscribers_observe_every_recompute() {
        let session = session_with(Ok(sample_records()));
        let mut rx = session.subscribe();
        session.start().await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().items().len(), 4);

        session.set_term("bread");
        assert!(rx.has_changed().unwrap());
        assert_eq!(names(&rx.borrow_and_update()), vec!["Wheat Bread"]);
    }

    #[tokio::test]
    async fn test_suggestions_come_from_loaded_catalog() {
        let session = session_with(Ok(sample_records()));
        assert!(session.suggestions().is_empty());

        session.start().await;

        assert_eq!(
            session.suggestions(),
            vec!["Whole Milk", "Wheat Bread", "Oat Milk", "Skim Milk"]
        );
    }
}

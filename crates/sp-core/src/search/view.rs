use std::sync::Arc;

use serde::Serialize;

use crate::catalog::placeholder_items;
use crate::item::Item;
use crate::search::filter::SearchQuery;

/// What the item catalog currently holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogSnapshot {
    /// No load has completed yet
    #[default]
    NotLoaded,
    /// The last load could not reach the item store
    FetchFailed,
    /// The last load succeeded; the list may be empty
    Loaded(Arc<Vec<Item>>),
}

impl CatalogSnapshot {
    pub fn from_load_result(result: Option<Vec<Item>>) -> Self {
        match result {
            Some(items) => CatalogSnapshot::Loaded(Arc::new(items)),
            None => CatalogSnapshot::FetchFailed,
        }
    }

    pub fn items(&self) -> Option<&[Item]> {
        match self {
            CatalogSnapshot::Loaded(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// Why placeholder products are shown instead of real results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    FetchFailed,
    CatalogEmpty,
}

/// The item list presented for a query.
///
/// "No data" (fallback) and "no match for this query" are distinct states,
/// decided by the catalog rather than by whether the term is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchView {
    #[default]
    Loading,
    Fallback {
        reason: FallbackReason,
        items: Vec<Item>,
    },
    Results(Vec<Item>),
    NoResults {
        term: String,
    },
}

impl SearchView {
    pub fn resolve(catalog: &CatalogSnapshot, query: &SearchQuery) -> Self {
        match catalog {
            CatalogSnapshot::NotLoaded => SearchView::Loading,
            CatalogSnapshot::FetchFailed => SearchView::fallback(FallbackReason::FetchFailed),
            CatalogSnapshot::Loaded(items) if items.is_empty() => {
                SearchView::fallback(FallbackReason::CatalogEmpty)
            }
            CatalogSnapshot::Loaded(items) => {
                let matched = query.apply(items);
                if matched.is_empty() {
                    SearchView::NoResults {
                        term: query.term.clone(),
                    }
                } else {
                    SearchView::Results(matched)
                }
            }
        }
    }

    fn fallback(reason: FallbackReason) -> Self {
        SearchView::Fallback {
            reason,
            items: placeholder_items(),
        }
    }

    /// Items to display; empty while loading or when nothing matched.
    pub fn items(&self) -> &[Item] {
        match self {
            SearchView::Fallback { items, .. } | SearchView::Results(items) => items,
            SearchView::Loading | SearchView::NoResults { .. } => &[],
        }
    }
}

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::item::Item;

/// Narrows `items` to those matching `search_term`, optionally within one postal code.
///
/// - An empty or whitespace-only term matches every item.
/// - Otherwise the term is matched as a case-insensitive substring of the
///   item name; items without a name never match.
/// - A non-empty `postal_code` keeps only items listed under exactly that code.
///
/// Input order is preserved.
pub fn filter_items(items: &[Item], search_term: &str, postal_code: Option<&str>) -> Vec<Item> {
    let needle = normalized_term(search_term);
    let postal_code = postal_code.map(str::trim).filter(|code| !code.is_empty());

    let matched: Vec<Item> = items
        .iter()
        .filter(|item| matches_postal_code(item, postal_code))
        .filter(|item| matches_term(item, needle.as_deref()))
        .cloned()
        .collect();

    #[cfg(feature = "tracing")]
    tracing::trace!(
        total = items.len(),
        matched = matched.len(),
        "Filtered items"
    );

    matched
}

/// Same as [`filter_items`] for a load result that may have failed.
///
/// A failed load (`None`) filters as an empty list.
pub fn filter_loaded(
    items: Option<&[Item]>,
    search_term: &str,
    postal_code: Option<&str>,
) -> Vec<Item> {
    items
        .map(|items| filter_items(items, search_term, postal_code))
        .unwrap_or_default()
}

fn normalized_term(search_term: &str) -> Option<String> {
    if search_term.trim().is_empty() {
        None
    } else {
        Some(search_term.to_lowercase())
    }
}

fn matches_term(item: &Item, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => item
            .display_name()
            .is_some_and(|name| name.to_lowercase().contains(needle)),
    }
}

fn matches_postal_code(item: &Item, postal_code: Option<&str>) -> bool {
    postal_code.map_or(true, |code| item.postal_code == code)
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the order the items were loaded in
    #[default]
    AsLoaded,
    /// Cheapest first; items without a readable price go last
    PriceAscending,
}

/// Search inputs, recomputed into a result whenever any of them changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub postal_code: Option<String>,
    pub sort: SortOrder,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        let mut matched = filter_items(items, &self.term, self.postal_code.as_deref());
        if self.sort == SortOrder::PriceAscending {
            sort_by_price(&mut matched);
        }
        matched
    }
}

/// Stable sort by numeric price, cheapest first.
pub fn sort_by_price(items: &mut [Item]) {
    items.sort_by(|a, b| {
        let a = a.price.as_ref().and_then(|p| p.amount());
        let b = b.price.as_ref().and_then(|p| p.amount());
        match (a, b) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Distinct item names in first-seen order, for autocomplete.
pub fn suggest_names(items: &[Item]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(Item::display_name)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

//! Shopping list domain model
//!
//! The list itself is an insertion-ordered `Vec<ShoppingListEntry>`. Grouping
//! by store is a derived view and never replaces insertion order, which is
//! what removal positions refer to.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::item::{Item, Price};

/// Storage key under which the whole list is persisted.
pub const SHOPPING_LIST_KEY: &str = "shoppingList";

/// An item the user added to the shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    pub name: String,

    /// Older clients omitted missing prices and stores entirely.
    #[serde(default, deserialize_with = "price_as_text")]
    pub price: String,

    #[serde(default)]
    pub store: String,

    /// Lists written by older clients used the `zip` key.
    #[serde(default, alias = "zip")]
    pub postal_code: String,

    #[serde(default)]
    pub image: String,
}

impl ShoppingListEntry {
    /// Builds the entry recorded by an "add to list" action.
    ///
    /// Returns `None` for items that cannot be displayed (no name or no price).
    pub fn from_item(item: &Item) -> Option<Self> {
        let name = item.display_name()?;
        let price = item.price.as_ref()?;

        Some(Self {
            name: name.to_string(),
            price: price.to_string(),
            store: item.store.clone(),
            postal_code: item.postal_code.clone(),
            image: item.image_url.clone(),
        })
    }
}

fn price_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let price = Option::<Price>::deserialize(deserializer)?;
    Ok(price.map(|price| price.to_string()).unwrap_or_default())
}

/// An entry in the grouped view, with its insertion-order position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedEntry {
    /// Position in the insertion-ordered list; valid for `remove_at`.
    pub index: usize,
    pub entry: ShoppingListEntry,
}

/// All entries of one store, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreGroup {
    pub store: String,
    pub entries: Vec<GroupedEntry>,
}

impl StoreGroup {
    /// Sum of the entries' prices that parse as numbers.
    pub fn subtotal(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(|grouped| Price::Text(grouped.entry.price.clone()).amount())
            .sum()
    }
}

/// Groups entries by store.
///
/// Groups are ordered by store name (case-sensitive, byte-lexicographic);
/// entries keep their insertion order within a group.
pub fn group_by_store(entries: &[ShoppingListEntry]) -> Vec<StoreGroup> {
    let mut groups: BTreeMap<&str, Vec<GroupedEntry>> = BTreeMap::new();

    for (index, entry) in entries.iter().enumerate() {
        groups
            .entry(entry.store.as_str())
            .or_default()
            .push(GroupedEntry {
                index,
                entry: entry.clone(),
            });
    }

    groups
        .into_iter()
        .map(|(store, entries)| StoreGroup {
            store: store.to_string(),
            entries,
        })
        .collect()
}

/// Decodes a persisted list.
///
/// Fails only when `raw` is not a JSON array. Elements that do not decode as
/// entries are skipped so one bad record cannot take the rest of the list
/// with it.
pub fn decode_entries(raw: &str) -> serde_json::Result<Vec<ShoppingListEntry>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;

    Ok(values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| {
            match serde_json::from_value::<ShoppingListEntry>(value) {
                Ok(entry) => Some(entry),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(position, error = %_err, "Skipping unreadable shopping list entry");
                    #[cfg(not(feature = "tracing"))]
                    let _ = position;
                    None
                }
            }
        })
        .collect())
}

pub fn encode_entries(entries: &[ShoppingListEntry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}

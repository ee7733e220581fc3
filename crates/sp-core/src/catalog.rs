//! Placeholder products shown when there is no item data to search.

use crate::item::Item;

pub const PLACEHOLDER_POSTAL_CODE: &str = "22030";

const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

/// Fixed products displayed when the catalog failed to load or is empty.
pub fn placeholder_items() -> Vec<Item> {
    [
        ("Large Eggs (12 ct)", "3.49", "Giant"),
        ("Whole Milk (1 gal)", "3.99", "Target"),
        ("White Bread", "2.49", "Aldi"),
        ("Bananas (1 lb)", "0.59", "Aldi"),
    ]
    .into_iter()
    .map(|(name, price, store)| {
        Item::new(name, price, store, PLACEHOLDER_POSTAL_CODE).with_image_url(PLACEHOLDER_IMAGE)
    })
    .collect()
}

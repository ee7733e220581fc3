//! Plain-text rendering of views for the terminal.

use std::fmt::Write;

use sp_core::{
    FallbackReason, Item, PostalCode, PostalCodeDetail, Price, SearchView, ShoppingListEntry,
    StoreGroup,
};

pub const EMPTY_LIST_MESSAGE: &str = "No items added yet.";

fn price_label(price: &Price) -> String {
    match price.amount() {
        Some(amount) => format!("${amount:.2}"),
        None => price.to_string(),
    }
}

fn entry_price(entry: &ShoppingListEntry) -> String {
    price_label(&Price::Text(entry.price.clone()))
}

fn item_line(position: usize, item: &Item) -> String {
    format!(
        "[{}] {}  {}  {} ({})",
        position,
        item.display_name().unwrap_or("(unnamed)"),
        item.price.as_ref().map(price_label).unwrap_or_else(|| "-".to_string()),
        item.store,
        item.postal_code
    )
}

pub fn search_view(view: &SearchView) -> String {
    let mut out = String::new();
    match view {
        SearchView::Loading => out.push_str("Loading items...\n"),
        SearchView::NoResults { term } => {
            let _ = writeln!(out, "No items match \"{}\".", term);
        }
        SearchView::Fallback { reason, items } => {
            let why = match reason {
                FallbackReason::FetchFailed => "items could not be loaded",
                FallbackReason::CatalogEmpty => "no items are available",
            };
            let _ = writeln!(out, "Showing sample products ({why}):");
            for (position, item) in items.iter().enumerate() {
                let _ = writeln!(out, "{}", item_line(position, item));
            }
        }
        SearchView::Results(items) => {
            for (position, item) in items.iter().enumerate() {
                let _ = writeln!(out, "{}", item_line(position, item));
            }
        }
    }
    out
}

pub fn grouped_list(groups: &[StoreGroup]) -> String {
    if groups.is_empty() {
        return format!("{EMPTY_LIST_MESSAGE}\n");
    }

    let mut out = String::new();
    let mut total = 0.0;
    for group in groups {
        let _ = writeln!(out, "{}", group.store);
        for grouped in &group.entries {
            let _ = writeln!(
                out,
                "  [{}] {}  {}",
                grouped.index,
                grouped.entry.name,
                entry_price(&grouped.entry)
            );
        }
        let subtotal = group.subtotal();
        total += subtotal;
        let _ = writeln!(out, "  subtotal ${subtotal:.2}");
    }
    let _ = writeln!(out, "Total ${total:.2}");
    out
}

pub fn flat_list(entries: &[ShoppingListEntry]) -> String {
    if entries.is_empty() {
        return format!("{EMPTY_LIST_MESSAGE}\n");
    }

    let mut out = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "[{}] {}  {}  {} ({})",
            index,
            entry.name,
            entry_price(entry),
            entry.store,
            entry.postal_code
        );
    }
    out
}

pub fn store_detail(code: &PostalCode, detail: Option<&PostalCodeDetail>) -> String {
    let Some(detail) = detail.filter(|d| !d.stores.is_empty()) else {
        return format!("No stores found for {code}.\n");
    };

    let mut out = String::new();
    for (name, location) in &detail.stores {
        let coordinates = location
            .coordinates
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(out, "{name}  {coordinates}");
        if let Some(address) = &location.address {
            let _ = write!(out, "  {address}");
        }
        let _ = writeln!(out, "  {}", location.map_link());
    }
    out
}

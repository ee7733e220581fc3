//! Item document fields → [`ItemRecord`], shared by every item backend.

use serde_json::{Map, Value};
use sp_core::ports::ItemRecord;
use sp_core::Price;

/// Builds a record from a plain item document body.
///
/// Fields with an unexpected type are treated as absent.
pub(crate) fn item_record(
    id: impl Into<String>,
    store: impl Into<String>,
    postal_code: impl Into<String>,
    fields: &Map<String, Value>,
) -> ItemRecord {
    let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

    ItemRecord {
        id: id.into(),
        name: text("name"),
        price: fields.get("price").and_then(price_from_value),
        image_url: text("imageUrl"),
        store: store.into(),
        postal_code: postal_code.into(),
    }
}

fn price_from_value(value: &Value) -> Option<Price> {
    match value {
        Value::Number(number) => number.as_f64().map(Price::Amount),
        Value::String(text) => Some(Price::Text(text.clone())),
        _ => None,
    }
}

//! Firestore REST typed values → plain JSON.
//!
//! `{"stringValue": "x"}` becomes `"x"`, `{"mapValue": {"fields": {..}}}`
//! becomes an object, and so on. Geo points keep their
//! `latitude`/`longitude` keys.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// One stored document as returned by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Document {
    /// `projects/{p}/databases/(default)/documents/{path}`
    pub name: String,

    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Document body with typed values unwrapped.
    pub fn plain_fields(&self) -> Map<String, Value> {
        decode_fields(&self.fields)
    }
}

pub(crate) fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), decode_value(value)))
        .collect()
}

pub(crate) fn decode_value(value: &Value) -> Value {
    let Some((kind, inner)) = value.as_object().and_then(|map| map.iter().next()) else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "booleanValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            inner.clone()
        }
        "nullValue" => Value::Null,
        // 64-bit integers travel as strings
        "integerValue" => match inner {
            Value::String(text) => text
                .parse::<i64>()
                .map(|n| Value::Number(Number::from(n)))
                .unwrap_or(Value::Null),
            Value::Number(_) => inner.clone(),
            _ => Value::Null,
        },
        "doubleValue" => match inner {
            Value::Number(_) => inner.clone(),
            // NaN and the infinities arrive as strings
            _ => Value::Null,
        },
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default();
            Value::Object(fields)
        }
        "arrayValue" => {
            let values = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default();
            Value::Array(values)
        }
        "geoPointValue" => {
            let mut point = Map::new();
            for key in ["latitude", "longitude"] {
                point.insert(
                    key.to_string(),
                    inner.get(key).cloned().unwrap_or(Value::from(0.0)),
                );
            }
            Value::Object(point)
        }
        _ => Value::Null,
    }
}

//! Postal codes and the store locations registered under them.

mod geo;

pub use geo::{map_link, Coordinates, MAPS_BASE_URL};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographic filter key used to scope item and store results.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostalCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for PostalCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a store sits; both parts are optional in stored documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl StoreLocation {
    /// Reads a store entry as stored under a postal-code document.
    ///
    /// Accepts a bare coordinate value (`{lat, lng}`, a geo point, a
    /// `"38.85° N, 77.30° W"` string) or an object carrying `location` /
    /// `coordinates` and `address` fields.
    pub fn from_value(value: &Value) -> Self {
        let address = value
            .get("address")
            .and_then(Value::as_str)
            .map(str::to_string);

        let coordinates = Coordinates::from_value(value).or_else(|| {
            ["location", "coordinates"]
                .iter()
                .filter_map(|key| value.get(*key))
                .find_map(Coordinates::from_value)
        });

        Self {
            coordinates,
            address,
        }
    }

    pub fn map_link(&self) -> String {
        map_link(self.coordinates.as_ref())
    }
}

/// The stores registered under one postal code, keyed by store name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostalCodeDetail {
    pub stores: BTreeMap<String, StoreLocation>,
}

impl PostalCodeDetail {
    /// Reads a postal-code document body.
    ///
    /// `stores` may be a map of store name to location, or an array of
    /// objects named by `name` or `id`. Unnamed array entries are skipped.
    pub fn from_value(value: &Value) -> Self {
        let stores = match value.get("stores") {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(name, location)| (name.clone(), StoreLocation::from_value(location)))
                .collect(),
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| {
                    let name = entry
                        .get("name")
                        .or_else(|| entry.get("id"))
                        .and_then(Value::as_str)?;
                    Some((name.to_string(), StoreLocation::from_value(entry)))
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        Self { stores }
    }
}

//! Item domain model
//!
//! An [`Item`] is one price listing of a product at a store. Items are always
//! annotated with the store and postal code they were listed under; the
//! backend document id is not part of the model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Listed price of an item.
///
/// The backend stores prices either as JSON numbers or as numeric strings
/// (`"3.99"`, `"$3.99"`), so both shapes are accepted and kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    /// Numeric value of the price, if it can be read as one.
    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Amount(value) => Some(*value).filter(|v| v.is_finite()),
            Price::Text(text) => text
                .trim()
                .trim_start_matches('$')
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(value) => write!(f, "{}", value),
            Price::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Price::Amount(value)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Price::Text(value.to_string())
    }
}

/// A product listing annotated with its owning store and postal code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Display name; listings without one are never matched by search.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub price: Option<Price>,

    #[serde(default)]
    pub image_url: String,

    /// Immediate parent store id in the document hierarchy
    pub store: String,

    /// Postal-code ancestor id in the document hierarchy
    pub postal_code: String,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        price: impl Into<Price>,
        store: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
            image_url: String::new(),
            store: store.into(),
            postal_code: postal_code.into(),
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// The name, when present and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Whether the item carries both a name and a price.
    pub fn is_displayable(&self) -> bool {
        self.display_name().is_some() && self.price.is_some()
    }
}

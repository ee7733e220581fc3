use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAPS_BASE_URL: &str = "https://www.google.com/maps";

/// Field-name pairs seen on stored coordinate objects.
const KEY_PAIRS: [(&str, &str); 4] = [
    ("lat", "lng"),
    ("latitude", "longitude"),
    ("_lat", "_long"),
    ("lat", "lon"),
];

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Reads coordinates from an object (`{lat, lng}`, `{latitude, longitude}`,
    /// `{_lat, _long}`) or from a string (see [`Coordinates::parse`]).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => KEY_PAIRS.iter().find_map(|(lat_key, lng_key)| {
                let lat = map.get(*lat_key)?.as_f64()?;
                let lng = map.get(*lng_key)?.as_f64()?;
                Some(Self::new(lat, lng))
            }),
            Value::String(text) => Self::parse(text),
            _ => None,
        }
    }

    /// Parses `"38.8462° N, 77.3064° W"` style text (S and W are negative),
    /// or a plain signed `"38.8462, -77.3064"` pair.
    pub fn parse(text: &str) -> Option<Self> {
        let numbers = number_runs(text);
        let directions: Vec<char> = text
            .chars()
            .filter(|c| matches!(c, 'N' | 'S' | 'E' | 'W'))
            .collect();

        if numbers.len() >= 2 && directions.len() >= 2 {
            let lat: f64 = numbers[0].parse().ok()?;
            let lng: f64 = numbers[1].parse().ok()?;
            let lat = if directions[0] == 'S' { -lat } else { lat };
            let lng = if directions[1] == 'W' { -lng } else { lng };
            return Some(Self::new(lat, lng));
        }

        let (lat, lng) = text.split_once(',')?;
        Some(Self::new(lat.trim().parse().ok()?, lng.trim().parse().ok()?))
    }

    pub fn map_link(&self) -> String {
        format!("{}?q={},{}", MAPS_BASE_URL, self.lat, self.lng)
    }
}

/// Map link for a location that may have no coordinates.
pub fn map_link(coordinates: Option<&Coordinates>) -> String {
    coordinates
        .map(Coordinates::map_link)
        .unwrap_or_else(|| MAPS_BASE_URL.to_string())
}

impl TryFrom<Value> for Coordinates {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Coordinates::from_value(&value).ok_or_else(|| format!("unrecognized coordinates: {}", value))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_dir = if self.lat >= 0.0 { 'N' } else { 'S' };
        let lng_dir = if self.lng >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "[{:.4}° {}, {:.4}° {}]",
            self.lat.abs(),
            lat_dir,
            self.lng.abs(),
            lng_dir
        )
    }
}

fn number_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = None;

    for (idx, c) in text.char_indices() {
        let numeric = c.is_ascii_digit() || c == '.';
        match (numeric, start) {
            (true, None) => start = Some(idx),
            (false, Some(s)) => {
                runs.push(&text[s..idx]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(&text[s..]);
    }

    runs
}

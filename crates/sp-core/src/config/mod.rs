//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! - No business logic or policies
//! - No validation logic
//! - No default value calculation (empty values are facts; wiring decides)

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Item backend name, e.g. `firestore` or `json` (may be empty)
    pub backend: String,

    /// Firestore project id
    pub firestore_project_id: String,

    /// Firestore Web API key (may be empty for open rules)
    pub firestore_api_key: String,

    /// Firestore REST root override (empty means the public endpoint)
    pub firestore_base_url: String,

    /// Collection holding one document per postal code
    pub postal_code_collection: String,

    /// Local JSON catalog file (path info only, no existence check)
    pub catalog_path: PathBuf,

    /// Directory for the key-value store backing the shopping list
    pub storage_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// **Prohibited**: This method must NOT contain any validation
    /// or default value logic. Empty strings are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            backend: str_at("backend", "kind"),
            firestore_project_id: str_at("firestore", "project_id"),
            firestore_api_key: str_at("firestore", "api_key"),
            firestore_base_url: str_at("firestore", "base_url"),
            postal_code_collection: str_at("firestore", "postal_code_collection"),
            catalog_path: PathBuf::from(str_at("catalog", "path")),
            storage_dir: PathBuf::from(str_at("storage", "dir")),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            backend: String::new(),
            firestore_project_id: String::new(),
            firestore_api_key: String::new(),
            firestore_base_url: String::new(),
            postal_code_collection: String::new(),
            catalog_path: PathBuf::new(),
            storage_dir: PathBuf::new(),
        }
    }

    /// Create AppConfig with system-default paths for production use
    ///
    /// The base directory should be computed by the caller using
    /// platform-specific logic (e.g., `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            backend: "json".to_string(),
            catalog_path: data_dir.join("catalog.json"),
            storage_dir: data_dir.join("storage"),
            ..Self::empty()
        }
    }
}

//! Turns configuration into concrete adapters and an [`App`].
//!
//! Empty configuration values are resolved here: an empty backend means the
//! local JSON catalog and empty paths fall back to [`AppPaths`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use sp_app::app_paths::AppPaths;
use sp_app::{App, AppDeps};
use sp_core::config::AppConfig;
use sp_core::ports::AppDirsPort;
use sp_infra::firestore::{FirestoreClient, FirestoreConfig};
use sp_infra::{DirsAppDirsAdapter, FileKeyValueStore, JsonCatalogStore};
use tracing::info;

use super::config::{load_or_default, resolve_config_path, CONFIG_ENV_VAR};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Firestore,
    Json,
}

impl Backend {
    pub fn from_kind(kind: &str) -> anyhow::Result<Self> {
        match kind.trim() {
            "" | "json" => Ok(Backend::Json),
            "firestore" => Ok(Backend::Firestore),
            other => bail!("Unknown backend kind {other:?} (expected \"firestore\" or \"json\")"),
        }
    }
}

fn or_default_path(configured: &Path, fallback: &Path) -> PathBuf {
    if configured.as_os_str().is_empty() {
        fallback.to_path_buf()
    } else {
        configured.to_path_buf()
    }
}

fn firestore_config(config: &AppConfig) -> anyhow::Result<FirestoreConfig> {
    if config.firestore_project_id.trim().is_empty() {
        bail!("[firestore] project_id is required when [backend] kind = \"firestore\"");
    }

    let mut firestore = FirestoreConfig::new(config.firestore_project_id.trim());
    if !config.firestore_api_key.is_empty() {
        firestore.api_key = Some(config.firestore_api_key.clone());
    }
    if !config.firestore_base_url.is_empty() {
        firestore.base_url = config.firestore_base_url.clone();
    }
    if !config.postal_code_collection.is_empty() {
        firestore.postal_code_collection = config.postal_code_collection.clone();
    }
    firestore.timeout = HTTP_TIMEOUT;
    Ok(firestore)
}

/// Builds adapters for the configured backend.
pub fn build_deps(config: &AppConfig, paths: &AppPaths) -> anyhow::Result<AppDeps> {
    let storage_dir = or_default_path(&config.storage_dir, &paths.storage_dir);
    let key_value_store = Arc::new(FileKeyValueStore::new(storage_dir));

    match Backend::from_kind(&config.backend)? {
        Backend::Firestore => {
            let client = Arc::new(
                FirestoreClient::new(firestore_config(config)?)
                    .context("Failed to create Firestore client")?,
            );
            info!(project = %config.firestore_project_id, "Using Firestore backend");
            Ok(AppDeps {
                item_store: client.clone(),
                postal_codes: client,
                key_value_store,
            })
        }
        Backend::Json => {
            let catalog_path = or_default_path(&config.catalog_path, &paths.catalog_path);
            info!(path = %catalog_path.display(), "Using local catalog backend");
            let catalog = Arc::new(JsonCatalogStore::new(catalog_path));
            Ok(AppDeps {
                item_store: catalog.clone(),
                postal_codes: catalog,
                key_value_store,
            })
        }
    }
}

/// Resolves directories and configuration, then wires the application.
pub fn build_app(config_flag: Option<&Path>) -> anyhow::Result<App> {
    let app_dirs = DirsAppDirsAdapter::from_env()
        .get_app_dirs()
        .context("Failed to resolve application directories")?;
    let paths = AppPaths::from_app_dirs(&app_dirs);

    let config_path = resolve_config_path(
        config_flag,
        std::env::var(CONFIG_ENV_VAR).ok(),
        &paths.config_path,
    );
    let explicit = config_flag.is_some() || config_path != paths.config_path;
    let config = load_or_default(&config_path, explicit, &app_dirs.app_data_root)?;
    info!(config = %config_path.display(), backend = %config.backend, "Configuration loaded");

    Ok(App::new(build_deps(&config, &paths)?))
}

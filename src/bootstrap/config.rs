//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Locate the configuration file
//! - Read TOML and map it onto the `AppConfig` DTO
//! - Report I/O and parsing errors with context
//!
//! ## Prohibited
//!
//! - No validation logic (wiring decides what an empty value means)

use anyhow::Context;
use std::path::{Path, PathBuf};
use sp_core::config::AppConfig;

pub const CONFIG_ENV_VAR: &str = "SPARK_CONFIG";

/// Load configuration from a TOML file
///
/// Pure data loading: empty strings and unknown backend kinds are accepted
/// as they are.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// `--config` wins over `SPARK_CONFIG`, which wins over the default path.
pub fn resolve_config_path(
    flag: Option<&Path>,
    env_value: Option<String>,
    default_path: &Path,
) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => default_path.to_path_buf(),
    }
}

/// Loads the file when it exists, otherwise falls back to system defaults
/// rooted at `data_dir`.
///
/// An explicitly requested file that is missing is an error.
pub fn load_or_default(
    config_path: &Path,
    explicit: bool,
    data_dir: &Path,
) -> anyhow::Result<AppConfig> {
    if config_path.exists() || explicit {
        return load_config(config_path.to_path_buf());
    }
    Ok(AppConfig::with_system_defaults(data_dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [backend]
            kind = "firestore"

            [firestore]
            project_id = "spark-demo"
            api_key = "key-123"

            [storage]
            dir = "/data/storage"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.backend, "firestore");
        assert_eq!(config.firestore_project_id, "spark-demo");
        assert_eq!(config.firestore_api_key, "key-123");
        assert_eq!(config.storage_dir, PathBuf::from("/data/storage"));
        assert_eq!(config.catalog_path, PathBuf::new());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[backend\nkind = ").unwrap();

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(PathBuf::from("/nonexistent/spark/config.toml")).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_resolve_config_path_precedence() {
        let default_path = Path::new("/data/spark/config.toml");
        let flag = Path::new("/etc/spark.toml");

        assert_eq!(
            resolve_config_path(Some(flag), Some("/env.toml".to_string()), default_path),
            PathBuf::from("/etc/spark.toml")
        );
        assert_eq!(
            resolve_config_path(None, Some("/env.toml".to_string()), default_path),
            PathBuf::from("/env.toml")
        );
        assert_eq!(
            resolve_config_path(None, Some("  ".to_string()), default_path),
            PathBuf::from("/data/spark/config.toml")
        );
        assert_eq!(
            resolve_config_path(None, None, default_path),
            PathBuf::from("/data/spark/config.toml")
        );
    }

    #[test]
    fn test_missing_default_config_uses_system_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config =
            load_or_default(&dir.path().join("config.toml"), false, dir.path()).unwrap();

        assert_eq!(config, AppConfig::with_system_defaults(dir.path().to_path_buf()));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(load_or_default(&dir.path().join("config.toml"), true, dir.path()).is_err());
    }
}

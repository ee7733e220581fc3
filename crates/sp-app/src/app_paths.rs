use std::path::PathBuf;

use sp_core::app_dirs::AppDirs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_path: PathBuf,
    pub catalog_path: PathBuf,
    pub storage_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            config_path: dirs.app_data_root.join("config.toml"),
            catalog_path: dirs.app_data_root.join("catalog.json"),
            storage_dir: dirs.app_data_root.join("storage"),
            logs_dir: dirs.app_data_root.join("logs"),
        }
    }
}

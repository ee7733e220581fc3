use std::path::PathBuf;

use sp_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "spark";

/// Environment variable selecting a separate data directory (`spark-<profile>`).
pub const PROFILE_ENV_VAR: &str = "SPARK_PROFILE";

/// Resolves the data root under the platform data-local directory.
///
/// The profile is captured at construction, so resolution never reads the
/// environment again.
#[derive(Debug, Clone, Default)]
pub struct DirsAppDirsAdapter {
    base: Option<PathBuf>,
    profile: Option<String>,
}

impl DirsAppDirsAdapter {
    /// Profile from [`PROFILE_ENV_VAR`], base from `dirs::data_local_dir()`.
    pub fn from_env() -> Self {
        Self::default().with_profile(std::env::var(PROFILE_ENV_VAR).ok())
    }

    pub fn with_base_data_local_dir(mut self, base: PathBuf) -> Self {
        self.base = Some(base);
        self
    }

    /// Blank profiles select the default directory. Characters outside
    /// `[A-Za-z0-9_-]` are replaced so a profile can never leave the base.
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.chars()
                    .map(|c| {
                        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                            c
                        } else {
                            '_'
                        }
                    })
                    .collect()
            });
        self
    }

    fn dir_name(&self) -> String {
        match &self.profile {
            Some(profile) => format!("{APP_DIR_NAME}-{profile}"),
            None => APP_DIR_NAME.to_string(),
        }
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base = match &self.base {
            Some(base) => base.clone(),
            None => dirs::data_local_dir().ok_or(AppDirsError::DataLocalDirUnavailable)?,
        };

        Ok(AppDirs {
            app_data_root: base.join(self.dir_name()),
        })
    }
}

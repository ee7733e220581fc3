use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sp_core::ports::{KeyValueStoreError, KeyValueStorePort};
use tracing::debug;

/// Key-value storage with one JSON file per key under a directory.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a reader sees either the previous or the new value.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys map to file names, so only `[A-Za-z0-9_-]` is accepted.
    fn path_for(&self, key: &str) -> Result<PathBuf, KeyValueStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KeyValueStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn atomic_write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, path)
    }
}

fn io_error(key: &str, source: io::Error) -> KeyValueStoreError {
    KeyValueStoreError::Io {
        key: key.to_string(),
        source,
    }
}

impl KeyValueStorePort for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(err) => Err(io_error(key, err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let path = self.path_for(key)?;
        self.atomic_write(&path, value)
            .map_err(|err| io_error(key, err))?;
        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(key, err)),
        }
    }
}

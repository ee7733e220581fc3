use thiserror::Error;

/// Failure talking to a remote (or file-backed) document store.
#[derive(Debug, Error)]
pub enum RemoteStoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum KeyValueStoreError {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    #[error("storage I/O failed for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

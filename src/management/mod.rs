//! Local persistence for user data and cached records.
//!
//! Every record lives as a JSON file under the platform data directory
//! (`djsportscli/`). Each manager owns one record: load it, mutate it in
//! memory, persist it back. Corrupted or missing files are never fatal;
//! callers fall back to empty defaults via `load_or_default`.

mod auth;
mod device;
mod library;
mod prefs;
mod roles;
mod start_times;
mod sync_meta;

pub use auth::TokenManager;
pub use device::{CachedDevice, DEVICE_FRESHNESS_WINDOW, DeviceCacheManager, select_device};
pub use library::LibraryManager;
pub use prefs::{DEFAULT_POLLING_INTERVAL_MS, POLLING_INTERVALS, PrefsManager};
pub use roles::RoleManager;
pub use start_times::StartTimeManager;
pub use sync_meta::SyncMetaManager;

use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    IoError(std::io::Error),
    SerdeError(serde_json::Error),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeError(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "io error: {}", e),
            StoreError::SerdeError(e) => write!(f, "serde error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// Resolves a record path below the application data directory.
fn data_path(relative: &str) -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(format!("djsportscli/{}", relative));
    path
}

/// Reads and deserializes a JSON record.
async fn read_json<T: serde::de::DeserializeOwned>(relative: &str) -> Result<T, StoreError> {
    let content = async_fs::read_to_string(data_path(relative)).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Serializes and writes a JSON record, creating parent directories.
async fn write_json<T: serde::Serialize>(relative: &str, value: &T) -> Result<(), StoreError> {
    let path = data_path(relative);
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(value)?;
    async_fs::write(path, json).await.map_err(StoreError::from)
}

/// Removes a record file. Missing files are fine.
async fn remove_record(relative: &str) -> Result<(), StoreError> {
    match async_fs::remove_file(data_path(relative)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::IoError(e)),
    }
}

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::management::{self, StoreError};

const SYNC_META_PATH: &str = "settings/sync-meta.json";

const DEFAULT_DEVICE_NAME: &str = "Unknown Device";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SyncMeta {
    device_name: String,
    /// ISO-8601 timestamp of the last local edit, compared against the
    /// cloud row's `last_synced_at` to pick a sync direction.
    last_modified: String,
}

/// Device name and last-local-modification timestamp used by cloud sync.
pub struct SyncMetaManager {
    meta: SyncMeta,
}

impl SyncMetaManager {
    pub fn new() -> Self {
        Self {
            meta: SyncMeta {
                device_name: DEFAULT_DEVICE_NAME.to_string(),
                last_modified: Utc::now().to_rfc3339(),
            },
        }
    }

    pub async fn load() -> Result<Self, StoreError> {
        let meta = management::read_json(SYNC_META_PATH).await?;
        Ok(Self { meta })
    }

    /// Loads the record, degrading to defaults (device "Unknown Device",
    /// last-modified now) when the file is missing or corrupted.
    pub async fn load_or_default() -> Self {
        Self::load().await.unwrap_or_else(|_| Self::new())
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        management::write_json(SYNC_META_PATH, &self.meta).await
    }

    pub fn device_name(&self) -> &str {
        &self.meta.device_name
    }

    pub fn set_device_name(&mut self, name: String) {
        self.meta.device_name = name;
    }

    pub fn last_modified(&self) -> &str {
        &self.meta.last_modified
    }

    /// Stamps the last-modified timestamp with the current time. Called
    /// after every start-time or role edit.
    pub fn touch(&mut self) {
        self.meta.last_modified = Utc::now().to_rfc3339();
    }

    /// Pins the last-modified timestamp to an explicit value, used after a
    /// cloud restore to match the row's sync time.
    pub fn set_last_modified(&mut self, timestamp: String) {
        self.meta.last_modified = timestamp;
    }
}

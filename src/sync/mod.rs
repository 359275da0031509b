//! Cloud backup/restore of local settings.
//!
//! One row per Spotify user id in a PostgREST-style table holds the same
//! data the local managers persist: track start offsets, playlist roles and
//! the device name. Upload replaces the row wholesale; download replaces all
//! local records wholesale. Direction is decided by comparing the local
//! last-modified timestamp against the row's `last_synced_at` through a
//! pluggable [`SyncComparator`]; last writer wins, with no merge.
//!
//! Sync is an optional convenience, so failures are reported as a
//! structured [`CloudSyncResponse`] instead of propagated errors.

mod compare;

pub use compare::{SecondPrecision, SyncComparator, classify};

use std::collections::HashMap;

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config,
    management::{RoleManager, StartTimeManager, SyncMetaManager},
    types::PlaylistRole,
};

const SYNC_TABLE: &str = "user_sync_data";

/// The cloud row for one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSyncRecord {
    pub spotify_user_id: String,
    pub track_start_times: HashMap<String, u64>,
    pub playlist_types: HashMap<String, PlaylistRole>,
    pub device_name: String,
    pub last_synced_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Cloud-vs-local comparison inputs for the status readout.
#[derive(Debug, Clone)]
pub struct SyncStatus {
    pub has_cloud_data: bool,
    pub last_cloud_sync: Option<String>,
    pub last_local_change: String,
    pub device_name: String,
    pub cloud_device_name: Option<String>,
}

/// Classification of the sync status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No row exists for this user yet.
    NoCloudData,
    /// Local data is newer than the cloud row.
    BackupNeeded,
    /// The cloud row is newer than local data.
    RestoreAvailable,
    /// Both sides carry the same timestamp (at comparator precision).
    InSync,
}

/// Structured sync outcome; never thrown.
#[derive(Debug, Clone)]
pub struct CloudSyncResponse {
    pub success: bool,
    pub error: Option<String>,
}

impl CloudSyncResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Client for the cloud-sync backend.
pub struct SyncService {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SyncService {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    /// Builds the service from `SYNC_API_URL`/`SYNC_API_KEY`, or `None`
    /// when no backend is configured.
    pub fn from_env() -> Option<Self> {
        let base_url = config::sync_api_url()?;
        let api_key = config::sync_api_key()?;
        Some(Self::new(base_url, api_key))
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), SYNC_TABLE)
    }

    async fn fetch_row(&self, spotify_user_id: &str) -> Result<Option<UserSyncRecord>, String> {
        let url = format!(
            "{}?spotify_user_id=eq.{}&select=*",
            self.table_url(),
            spotify_user_id
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("sync backend returned {}", response.status()));
        }

        let mut rows: Vec<UserSyncRecord> =
            response.json().await.map_err(|e| e.to_string())?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }

    /// Reads the cloud row and pairs it with local metadata for
    /// classification. Backend failures degrade to "no cloud data" so the
    /// status readout never hard-fails.
    pub async fn status(&self, spotify_user_id: &str, meta: &SyncMetaManager) -> SyncStatus {
        let row = self.fetch_row(spotify_user_id).await.unwrap_or(None);

        SyncStatus {
            has_cloud_data: row.is_some(),
            last_cloud_sync: row.as_ref().map(|r| r.last_synced_at.clone()),
            last_local_change: meta.last_modified().to_string(),
            device_name: meta.device_name().to_string(),
            cloud_device_name: row.map(|r| r.device_name),
        }
    }

    /// Uploads the local records, replacing the row wholesale, then pins the
    /// local last-modified timestamp to the same sync time so both sides
    /// classify as in-sync afterwards.
    pub async fn backup(&self, spotify_user_id: &str) -> CloudSyncResponse {
        let start_times = StartTimeManager::load_or_default().await;
        let roles = RoleManager::load_or_default().await;
        let mut meta = SyncMetaManager::load_or_default().await;

        let now = Utc::now().to_rfc3339();
        let record = UserSyncRecord {
            spotify_user_id: spotify_user_id.to_string(),
            track_start_times: start_times.all().clone(),
            playlist_types: roles.all().clone(),
            device_name: meta.device_name().to_string(),
            last_synced_at: now.clone(),
            created_at: None,
            updated_at: Some(now.clone()),
        };

        let exists = match self.fetch_row(spotify_user_id).await {
            Ok(row) => row.is_some(),
            Err(e) => return CloudSyncResponse::err(e),
        };

        let request = if exists {
            self.client
                .patch(format!(
                    "{}?spotify_user_id=eq.{}",
                    self.table_url(),
                    spotify_user_id
                ))
                .json(&record)
        } else {
            self.client.post(self.table_url()).json(&record)
        };

        let response = match request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => return CloudSyncResponse::err(e.to_string()),
        };

        if !response.status().is_success() {
            return CloudSyncResponse::err(format!(
                "sync backend returned {}",
                response.status()
            ));
        }

        meta.set_last_modified(now);
        if let Err(e) = meta.persist().await {
            return CloudSyncResponse::err(format!("uploaded, but failed to stamp local state: {}", e));
        }

        CloudSyncResponse::ok()
    }

    /// Downloads the cloud row and replaces all local records wholesale:
    /// start offsets, roles and device name. The local last-modified
    /// timestamp is pinned to the row's `last_synced_at`.
    pub async fn restore(&self, spotify_user_id: &str) -> CloudSyncResponse {
        let row = match self.fetch_row(spotify_user_id).await {
            Ok(Some(row)) => row,
            Ok(None) => return CloudSyncResponse::err("no data found in the cloud"),
            Err(e) => return CloudSyncResponse::err(e),
        };

        let mut start_times = StartTimeManager::load_or_default().await;
        start_times.replace_all(row.track_start_times);
        if let Err(e) = start_times.persist().await {
            return CloudSyncResponse::err(format!("failed to store start offsets: {}", e));
        }

        let mut roles = RoleManager::load_or_default().await;
        roles.replace_all(row.playlist_types);
        if let Err(e) = roles.persist().await {
            return CloudSyncResponse::err(format!("failed to store playlist roles: {}", e));
        }

        let mut meta = SyncMetaManager::load_or_default().await;
        if meta.device_name() != row.device_name {
            meta.set_device_name(row.device_name);
        }
        meta.set_last_modified(row.last_synced_at);
        if let Err(e) = meta.persist().await {
            return CloudSyncResponse::err(format!("failed to stamp local state: {}", e));
        }

        CloudSyncResponse::ok()
    }
}

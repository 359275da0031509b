use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    management::{self, StoreError},
    types::Device,
};

const DEVICE_CACHE_PATH: &str = "cache/device.json";

/// Age after which the cached device record is treated as absent.
pub const DEVICE_FRESHNESS_WINDOW: chrono::Duration = chrono::Duration::minutes(5);

/// Preferred-device record with the timestamp it was cached at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedDevice {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub is_active: bool,
    /// Unix milliseconds.
    pub cached_at: i64,
}

/// Persisted preferred-device cache, used to skip a device lookup before
/// issuing playback calls.
pub struct DeviceCacheManager {
    device: Option<CachedDevice>,
}

impl DeviceCacheManager {
    pub fn new() -> Self {
        Self { device: None }
    }

    pub async fn load() -> Result<Self, StoreError> {
        let device = management::read_json(DEVICE_CACHE_PATH).await?;
        Ok(Self {
            device: Some(device),
        })
    }

    /// Loads the cache, degrading to empty when the file is missing or
    /// corrupted.
    pub async fn load_or_default() -> Self {
        Self::load().await.unwrap_or_else(|_| Self::new())
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        match &self.device {
            Some(device) => management::write_json(DEVICE_CACHE_PATH, device).await,
            None => management::remove_record(DEVICE_CACHE_PATH).await,
        }
    }

    /// Returns the cached device if it is still within the freshness
    /// window; an expired record reads as absent.
    pub fn get_fresh(&self) -> Option<&CachedDevice> {
        let device = self.device.as_ref()?;
        let age = Utc::now().timestamp_millis() - device.cached_at;
        if age < DEVICE_FRESHNESS_WINDOW.num_milliseconds() {
            Some(device)
        } else {
            None
        }
    }

    /// Returns the cached device regardless of age. Freshness only gates
    /// skipping the device lookup; an expired record still marks the user's
    /// previous choice for selection purposes.
    pub fn get_any(&self) -> Option<&CachedDevice> {
        self.device.as_ref()
    }

    /// Caches a device, stamping it with the current time. Devices without
    /// an id cannot be targeted and are ignored.
    pub fn cache(&mut self, device: &Device) {
        if let Some(id) = &device.id {
            self.device = Some(CachedDevice {
                id: id.clone(),
                name: device.name.clone(),
                kind: device.kind.clone(),
                is_active: device.is_active,
                cached_at: Utc::now().timestamp_millis(),
            });
        }
    }

    pub fn clear(&mut self) {
        self.device = None;
    }
}

/// Picks the device to target from a device listing.
///
/// Preference order: the already-cached device when it still appears in the
/// list (never override a user's selection), then an active computer, any
/// computer, any active device, and finally the first listed device.
/// Devices without an id are skipped throughout.
pub fn select_device(devices: &[Device], cached: Option<&CachedDevice>) -> Option<Device> {
    let valid: Vec<&Device> = devices.iter().filter(|d| d.id.is_some()).collect();
    if valid.is_empty() {
        return None;
    }

    if let Some(cached) = cached {
        if let Some(existing) = valid.iter().find(|d| d.id.as_deref() == Some(&cached.id)) {
            return Some((*existing).clone());
        }
    }

    if let Some(d) = valid
        .iter()
        .find(|d| d.is_active && d.kind.eq_ignore_ascii_case("computer"))
    {
        return Some((*d).clone());
    }

    if let Some(d) = valid.iter().find(|d| d.kind.eq_ignore_ascii_case("computer")) {
        return Some((*d).clone());
    }

    if let Some(d) = valid.iter().find(|d| d.is_active) {
        return Some((*d).clone());
    }

    valid.first().map(|d| (*d).clone())
}

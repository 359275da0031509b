use std::collections::HashMap;

use crate::management::{self, StoreError};

const START_TIMES_PATH: &str = "settings/track-start-times.json";

/// Per-track start-offset overrides (track URI -> milliseconds).
pub struct StartTimeManager {
    times: HashMap<String, u64>,
}

impl StartTimeManager {
    pub fn new() -> Self {
        Self {
            times: HashMap::new(),
        }
    }

    pub async fn load() -> Result<Self, StoreError> {
        let times = management::read_json(START_TIMES_PATH).await?;
        Ok(Self { times })
    }

    /// Loads the record, degrading to an empty map when the file is missing
    /// or corrupted.
    pub async fn load_or_default() -> Self {
        Self::load().await.unwrap_or_else(|_| Self::new())
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        management::write_json(START_TIMES_PATH, &self.times).await
    }

    pub fn set(&mut self, track_uri: String, start_time_ms: u64) {
        self.times.insert(track_uri, start_time_ms);
    }

    /// Returns the stored offset, or 0 (track start) when none is stored.
    pub fn get(&self, track_uri: &str) -> u64 {
        self.times.get(track_uri).copied().unwrap_or(0)
    }

    pub fn remove(&mut self, track_uri: &str) {
        self.times.remove(track_uri);
    }

    pub fn all(&self) -> &HashMap<String, u64> {
        &self.times
    }

    /// Replaces the whole map, used by cloud restore.
    pub fn replace_all(&mut self, times: HashMap<String, u64>) {
        self.times = times;
    }

    pub fn clear(&mut self) {
        self.times.clear();
    }
}

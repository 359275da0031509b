use serde::{Deserialize, Serialize};

use crate::{
    management::{self, StoreError},
    types::Theme,
};

const PREFS_PATH: &str = "settings/prefs.json";

/// The closed set of accepted polling intervals in milliseconds.
/// 0 means polling is off and status must be refreshed manually.
pub const POLLING_INTERVALS: [u64; 7] = [0, 1000, 2000, 3000, 5000, 10000, 15000];

pub const DEFAULT_POLLING_INTERVAL_MS: u64 = 3000;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Prefs {
    polling_interval_ms: u64,
    theme: Theme,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            polling_interval_ms: DEFAULT_POLLING_INTERVAL_MS,
            theme: Theme::System,
        }
    }
}

/// UI preferences: now-playing polling interval and theme.
pub struct PrefsManager {
    prefs: Prefs,
}

impl PrefsManager {
    pub fn new() -> Self {
        Self {
            prefs: Prefs::default(),
        }
    }

    pub async fn load() -> Result<Self, StoreError> {
        let mut prefs: Prefs = management::read_json(PREFS_PATH).await?;
        // A value outside the closed set falls back to the default.
        if !POLLING_INTERVALS.contains(&prefs.polling_interval_ms) {
            prefs.polling_interval_ms = DEFAULT_POLLING_INTERVAL_MS;
        }
        Ok(Self { prefs })
    }

    /// Loads preferences, degrading to defaults when the file is missing or
    /// corrupted.
    pub async fn load_or_default() -> Self {
        Self::load().await.unwrap_or_else(|_| Self::new())
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        management::write_json(PREFS_PATH, &self.prefs).await
    }

    pub fn polling_interval_ms(&self) -> u64 {
        self.prefs.polling_interval_ms
    }

    /// Sets the polling interval; rejects values outside the closed set.
    pub fn set_polling_interval_ms(&mut self, interval_ms: u64) -> Result<(), String> {
        if !POLLING_INTERVALS.contains(&interval_ms) {
            return Err(format!(
                "invalid polling interval {}ms; accepted values: {:?}",
                interval_ms, POLLING_INTERVALS
            ));
        }
        self.prefs.polling_interval_ms = interval_ms;
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.prefs.theme = theme;
    }
}

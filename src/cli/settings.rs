use crate::{
    error, info,
    management::{PrefsManager, SyncMetaManager},
    success,
    types::Theme,
    warning,
};

pub async fn settings_show() {
    let prefs = PrefsManager::load_or_default().await;
    let meta = SyncMetaManager::load_or_default().await;

    let interval_ms = prefs.polling_interval_ms();
    if interval_ms == 0 {
        info!("Polling interval: off");
    } else {
        info!("Polling interval: {} ms", interval_ms);
    }
    info!("Theme: {}", prefs.theme());
    info!("Device name: {}", meta.device_name());
}

pub async fn set_interval(interval_ms: u64) {
    let mut prefs = PrefsManager::load_or_default().await;
    if let Err(e) = prefs.set_polling_interval_ms(interval_ms) {
        warning!("{}", e);
        return;
    }
    if let Err(e) = prefs.persist().await {
        error!("Failed to store preferences. Err: {}", e);
    }

    if interval_ms == 0 {
        success!("Polling turned off.");
    } else {
        success!("Polling interval set to {} ms.", interval_ms);
    }
}

pub async fn set_theme(theme: Theme) {
    let mut prefs = PrefsManager::load_or_default().await;
    prefs.set_theme(theme);
    if let Err(e) = prefs.persist().await {
        error!("Failed to store preferences. Err: {}", e);
    }
    success!("Theme set to {}.", theme);
}

/// Renames this device as it appears in the cloud sync row.
pub async fn set_device_name(name: String) {
    let mut meta = SyncMetaManager::load_or_default().await;
    meta.set_device_name(name.clone());
    meta.touch();
    if let Err(e) = meta.persist().await {
        error!("Failed to store the device name. Err: {}", e);
    }
    success!("Device name set to '{}'.", name);
}

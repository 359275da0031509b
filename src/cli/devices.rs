use tabled::Table;

use crate::{
    cli, error,
    management::DeviceCacheManager,
    spotify, success,
    types::DeviceTableRow,
    warning,
};

pub async fn list_devices() {
    let mut token_mgr = cli::load_token().await;
    let token = token_mgr.get_valid_token().await;

    let devices = match spotify::player::get_devices(&token).await {
        Ok(devices) => devices,
        Err(e) => {
            cli::report_api_error("Failed to fetch devices", e);
            return;
        }
    };

    if devices.is_empty() {
        warning!("No devices available. Open Spotify on a device first.");
        return;
    }

    let rows: Vec<DeviceTableRow> = devices
        .iter()
        .map(|d| DeviceTableRow {
            name: d.name.clone(),
            kind: d.kind.clone(),
            active: if d.is_active { "yes" } else { "no" }.to_string(),
            volume: d
                .volume_percent
                .map(|v| format!("{}%", v))
                .unwrap_or_else(|| "-".to_string()),
            id: d.id.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}

/// Pins a device as the preferred playback target.
pub async fn select_device(device_id: String) {
    let mut token_mgr = cli::load_token().await;
    let token = token_mgr.get_valid_token().await;

    let devices = match spotify::player::get_devices(&token).await {
        Ok(devices) => devices,
        Err(e) => {
            cli::report_api_error("Failed to fetch devices", e);
            return;
        }
    };

    let Some(device) = devices
        .iter()
        .find(|d| d.id.as_deref() == Some(device_id.as_str()))
    else {
        warning!("No device with id {} is currently available.", device_id);
        return;
    };

    let mut cache = DeviceCacheManager::load_or_default().await;
    cache.cache(device);
    if let Err(e) = cache.persist().await {
        error!("Failed to store the device cache. Err: {}", e);
    }

    success!("Preferred device set to '{}'.", device.name);
}

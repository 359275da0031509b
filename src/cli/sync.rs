use crate::{
    cli, info,
    management::SyncMetaManager,
    spotify, success,
    sync::{SecondPrecision, SyncService, SyncState, classify},
    warning,
};

pub async fn sync_status() {
    let Some((service, user_id)) = service_and_user().await else {
        return;
    };

    let meta = SyncMetaManager::load_or_default().await;
    let status = service.status(&user_id, &meta).await;

    info!("This device: {}", status.device_name);
    info!("Last local change: {}", status.last_local_change);
    match (&status.last_cloud_sync, &status.cloud_device_name) {
        (Some(synced_at), Some(device)) => {
            info!("Cloud copy: {} (from {})", synced_at, device);
        }
        (Some(synced_at), None) => info!("Cloud copy: {}", synced_at),
        _ => info!("Cloud copy: none"),
    }

    match classify(&status, &SecondPrecision) {
        SyncState::NoCloudData => {
            info!("No cloud backup yet. Run djsportscli sync backup to create one.");
        }
        SyncState::BackupNeeded => {
            info!("Local changes are newer. Run djsportscli sync backup.");
        }
        SyncState::RestoreAvailable => {
            info!("The cloud copy is newer. Run djsportscli sync restore.");
        }
        SyncState::InSync => success!("Everything is in sync."),
    }
}

pub async fn sync_backup() {
    let Some((service, user_id)) = service_and_user().await else {
        return;
    };

    let response = service.backup(&user_id).await;
    if response.success {
        success!("Settings backed up to the cloud.");
    } else {
        warning!(
            "Backup failed: {}",
            response.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }
}

pub async fn sync_restore() {
    let Some((service, user_id)) = service_and_user().await else {
        return;
    };

    let response = service.restore(&user_id).await;
    if response.success {
        success!("Settings restored from the cloud.");
    } else {
        warning!(
            "Restore failed: {}",
            response.error.unwrap_or_else(|| "unknown error".to_string())
        );
    }
}

/// Builds the sync service and resolves the Spotify user id the cloud row
/// is keyed by. Returns `None` (after a notice) when sync is unconfigured
/// or the profile lookup fails.
async fn service_and_user() -> Option<(SyncService, String)> {
    let Some(service) = SyncService::from_env() else {
        warning!("Cloud sync is not configured. Set SYNC_API_URL and SYNC_API_KEY.");
        return None;
    };

    let mut token_mgr = cli::load_token().await;
    let token = token_mgr.get_valid_token().await;

    match spotify::playlists::me(&token).await {
        Ok(profile) => Some((service, profile.id)),
        Err(e) => {
            cli::report_api_error("Failed to fetch the user profile", e);
            None
        }
    }
}

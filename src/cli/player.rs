use crate::{
    cache::TrackPositionCache,
    cli, info,
    management::{LibraryManager, StartTimeManager},
    playback, spotify, success,
    types::PlaybackOptions,
    utils, warning,
};

/// Plays a track, preferring its playlist context.
pub async fn play(track_uri: String) {
    let mut token_mgr = cli::load_token().await;
    let token = token_mgr.get_valid_token().await;

    let mut cache = TrackPositionCache::new();
    if let Ok(library) = LibraryManager::load().await {
        cache.rebuild(&library.snapshots());
    }

    let start_times = StartTimeManager::load_or_default().await;

    let device_id = match playback::resolve_device_id(&token).await {
        Ok(device_id) => device_id,
        Err(e) => {
            cli::report_api_error("Failed to resolve a playback device", e);
            return;
        }
    };
    if device_id.is_none() {
        warning!("No playback device available. Open Spotify on a device first.");
        return;
    }

    match playback::play_track(
        &token,
        &track_uri,
        &cache,
        &start_times,
        device_id.as_deref(),
    )
    .await
    {
        Ok(outcome) => {
            let where_ = if outcome.used_context {
                "inside its playlist queue"
            } else {
                "standalone"
            };
            if outcome.start_offset_ms > 0 {
                success!(
                    "Playing {} {} from {}.",
                    track_uri,
                    where_,
                    utils::format_ms(outcome.start_offset_ms)
                );
            } else {
                success!("Playing {} {}.", track_uri, where_);
            }
        }
        Err(e) => cli::report_api_error("Failed to start playback", e),
    }
}

/// One-shot now-playing readout.
pub async fn player_status() {
    let mut token_mgr = cli::load_token().await;
    let token = token_mgr.get_valid_token().await;

    match spotify::player::get_currently_playing(&token).await {
        Ok(Some(playing)) => {
            let state = if playing.is_playing {
                "Playing"
            } else {
                "Paused"
            };
            match playing.item {
                Some(track) => {
                    let progress = playing.progress_ms.map(utils::format_ms);
                    let duration = track.duration_ms.map(utils::format_ms);
                    let position = match (progress, duration) {
                        (Some(p), Some(d)) => format!(" [{}/{}]", p, d),
                        (Some(p), None) => format!(" [{}]", p),
                        _ => String::new(),
                    };
                    info!(
                        "{}: {} - {}{}",
                        state,
                        utils::format_artists(&track.artists),
                        track.name,
                        position
                    );
                }
                None => info!("{}: (unknown track)", state),
            }
            if let Some(device) = playing.device {
                info!("Device: {} ({})", device.name, device.kind);
            }
        }
        Ok(None) => info!("Nothing is playing."),
        Err(e) => cli::report_api_error("Failed to fetch playback state", e),
    }
}

pub async fn pause() {
    let (token, device_id) = token_and_device().await;
    match spotify::player::pause(&token, device_id.as_deref()).await {
        Ok(()) => success!("Playback paused."),
        Err(e) => cli::report_api_error("Failed to pause playback", e),
    }
}

/// Resumes the current context where it left off.
pub async fn resume() {
    let (token, device_id) = token_and_device().await;
    let options = PlaybackOptions::default();
    match spotify::player::start_resume(&token, device_id.as_deref(), &options).await {
        Ok(()) => success!("Playback resumed."),
        Err(e) => cli::report_api_error("Failed to resume playback", e),
    }
}

pub async fn next() {
    let (token, device_id) = token_and_device().await;
    match spotify::player::skip_to_next(&token, device_id.as_deref()).await {
        Ok(()) => success!("Skipped to the next track."),
        Err(e) => cli::report_api_error("Failed to skip forward", e),
    }
}

pub async fn previous() {
    let (token, device_id) = token_and_device().await;
    match spotify::player::skip_to_previous(&token, device_id.as_deref()).await {
        Ok(()) => success!("Skipped to the previous track."),
        Err(e) => cli::report_api_error("Failed to skip back", e),
    }
}

pub async fn seek(position_ms: u64) {
    let (token, device_id) = token_and_device().await;
    match spotify::player::seek(&token, position_ms, device_id.as_deref()).await {
        Ok(()) => success!("Seeked to {}.", utils::format_ms(position_ms)),
        Err(e) => cli::report_api_error("Failed to seek", e),
    }
}

pub async fn volume(volume_percent: u8) {
    let (token, device_id) = token_and_device().await;
    match spotify::player::set_volume(&token, volume_percent, device_id.as_deref()).await {
        Ok(()) => success!("Volume set to {}%.", volume_percent.min(100)),
        Err(e) => cli::report_api_error("Failed to set the volume", e),
    }
}

/// Fetches a valid token plus the preferred device id, if one resolves.
/// Controls still work without a device id by targeting the active device.
async fn token_and_device() -> (String, Option<String>) {
    let mut token_mgr = cli::load_token().await;
    let token = token_mgr.get_valid_token().await;
    let device_id = playback::resolve_device_id(&token).await.unwrap_or(None);
    (token, device_id)
}

//! Contextual playback orchestration.
//!
//! Starting a track during a match should land inside its playlist queue so
//! the next song follows naturally, begin at the track's configured start
//! offset, and hit the right device without a lookup round-trip on every
//! request. This module composes the track-position cache, the start-offset
//! records and the preferred-device cache into a single play call.

use crate::{
    cache::TrackPositionCache,
    management::{DeviceCacheManager, StartTimeManager, select_device},
    spotify::{self, ApiError},
    types::{PlaybackOffset, PlaybackOptions},
    warning,
};

/// How a play request was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackOutcome {
    /// True when the track started inside its playlist queue; false when the
    /// cache missed and the track played standalone.
    pub used_context: bool,
    /// Start offset applied, in milliseconds.
    pub start_offset_ms: u64,
}

/// Starts a track, preferring its playlist context.
///
/// A fresh cache hit starts playback inside the playlist at the track's
/// position, so the queue continues with the playlist. A miss (including a
/// stale cache) degrades to playing the track by URI without context rather
/// than guessing a position. Either way the track's start offset is applied
/// as the initial seek position.
pub async fn play_track(
    token: &str,
    track_uri: &str,
    cache: &TrackPositionCache,
    start_times: &StartTimeManager,
    device_id: Option<&str>,
) -> Result<PlaybackOutcome, ApiError> {
    let start_offset_ms = start_times.get(track_uri);
    let position_ms = (start_offset_ms > 0).then_some(start_offset_ms);

    let (options, used_context) = match cache.lookup(track_uri) {
        Some(position) => (
            PlaybackOptions {
                context_uri: Some(position.container_uri.clone()),
                offset: Some(PlaybackOffset {
                    position: position.position,
                }),
                position_ms,
                ..Default::default()
            },
            true,
        ),
        None => (
            PlaybackOptions {
                uris: Some(vec![track_uri.to_string()]),
                position_ms,
                ..Default::default()
            },
            false,
        ),
    };

    spotify::player::start_resume(token, device_id, &options).await?;

    Ok(PlaybackOutcome {
        used_context,
        start_offset_ms,
    })
}

/// Resolves the device id to target for playback.
///
/// Uses the cached preferred device while it is fresh; otherwise fetches the
/// device list, picks one by preference and re-caches it. Returns `None`
/// when no usable device is available.
pub async fn resolve_device_id(token: &str) -> Result<Option<String>, ApiError> {
    let mut cache = DeviceCacheManager::load_or_default().await;

    if let Some(device) = cache.get_fresh() {
        return Ok(Some(device.id.clone()));
    }

    // Even an expired record still names the user's previous choice, so it
    // feeds the selection preference; only the lookup shortcut needs it fresh.
    let devices = spotify::player::get_devices(token).await?;
    let Some(selected) = select_device(&devices, cache.get_any()) else {
        return Ok(None);
    };

    cache.cache(&selected);
    if let Err(e) = cache.persist().await {
        warning!("Failed to store the device cache. Err: {}", e);
    }

    Ok(selected.id)
}

use reqwest::{Client, StatusCode};

use crate::{
    config,
    spotify::{ApiError, check_status},
    types::{CurrentlyPlaying, Device, DevicesResponse, PlaybackOptions},
};

/// Retrieves the user's current playback state.
///
/// Maps the API's benign-absence responses onto `Ok(None)`: a 204 means
/// nothing is playing, and an empty body is treated the same way. A 401
/// surfaces as [`ApiError::Unauthorized`] so callers can prompt
/// re-authentication instead of retrying.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// - `Ok(Some(CurrentlyPlaying))` - a track is playing or paused
/// - `Ok(None)` - no active playback
/// - `Err(ApiError)` - auth, rate-limit, API or network failure
pub async fn get_currently_playing(token: &str) -> Result<Option<CurrentlyPlaying>, ApiError> {
    let api_url = format!(
        "{uri}/me/player/currently-playing",
        uri = &config::spotify_apiurl()
    );

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;

    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let response = check_status(response).await?;

    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<CurrentlyPlaying>(&text) {
        Ok(playing) => Ok(Some(playing)),
        Err(_) => Ok(None),
    }
}

/// Pauses playback, optionally on a specific device.
pub async fn pause(token: &str, device_id: Option<&str>) -> Result<(), ApiError> {
    let mut api_url = format!("{uri}/me/player/pause", uri = &config::spotify_apiurl());
    if let Some(device_id) = device_id {
        api_url.push_str(&format!("?device_id={}", device_id));
    }

    let client = Client::new();
    let response = client.put(&api_url).bearer_auth(token).send().await?;
    check_status(response).await?;
    Ok(())
}

/// Starts or resumes playback.
///
/// With an empty [`PlaybackOptions`] the current context resumes where it
/// left off. With `context_uri` plus an offset position, playback starts
/// inside that playlist's queue at the given track; with `uris`, the listed
/// tracks play without playlist context. `position_ms` seeks within the
/// first track either way.
pub async fn start_resume(
    token: &str,
    device_id: Option<&str>,
    options: &PlaybackOptions,
) -> Result<(), ApiError> {
    let mut api_url = format!("{uri}/me/player/play", uri = &config::spotify_apiurl());
    if let Some(device_id) = device_id {
        api_url.push_str(&format!("?device_id={}", device_id));
    }

    let client = Client::new();
    let response = client
        .put(&api_url)
        .bearer_auth(token)
        .json(options)
        .send()
        .await?;
    check_status(response).await?;
    Ok(())
}

/// Skips to the next track in the queue.
pub async fn skip_to_next(token: &str, device_id: Option<&str>) -> Result<(), ApiError> {
    let mut api_url = format!("{uri}/me/player/next", uri = &config::spotify_apiurl());
    if let Some(device_id) = device_id {
        api_url.push_str(&format!("?device_id={}", device_id));
    }

    let client = Client::new();
    let response = client.post(&api_url).bearer_auth(token).send().await?;
    check_status(response).await?;
    Ok(())
}

/// Skips back to the previous track in the queue.
pub async fn skip_to_previous(token: &str, device_id: Option<&str>) -> Result<(), ApiError> {
    let mut api_url = format!("{uri}/me/player/previous", uri = &config::spotify_apiurl());
    if let Some(device_id) = device_id {
        api_url.push_str(&format!("?device_id={}", device_id));
    }

    let client = Client::new();
    let response = client.post(&api_url).bearer_auth(token).send().await?;
    check_status(response).await?;
    Ok(())
}

/// Seeks to a position within the currently playing track.
pub async fn seek(token: &str, position_ms: u64, device_id: Option<&str>) -> Result<(), ApiError> {
    let mut api_url = format!(
        "{uri}/me/player/seek?position_ms={position_ms}",
        uri = &config::spotify_apiurl(),
        position_ms = position_ms
    );
    if let Some(device_id) = device_id {
        api_url.push_str(&format!("&device_id={}", device_id));
    }

    let client = Client::new();
    let response = client.put(&api_url).bearer_auth(token).send().await?;
    check_status(response).await?;
    Ok(())
}

/// Sets the playback volume (0-100).
pub async fn set_volume(
    token: &str,
    volume_percent: u8,
    device_id: Option<&str>,
) -> Result<(), ApiError> {
    let mut api_url = format!(
        "{uri}/me/player/volume?volume_percent={volume}",
        uri = &config::spotify_apiurl(),
        volume = volume_percent.min(100)
    );
    if let Some(device_id) = device_id {
        api_url.push_str(&format!("&device_id={}", device_id));
    }

    let client = Client::new();
    let response = client.put(&api_url).bearer_auth(token).send().await?;
    check_status(response).await?;
    Ok(())
}

/// Lists the user's available playback devices.
pub async fn get_devices(token: &str) -> Result<Vec<Device>, ApiError> {
    let api_url = format!("{uri}/me/player/devices", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;
    let response = check_status(response).await?;

    let res = response.json::<DevicesResponse>().await?;
    Ok(res.devices)
}

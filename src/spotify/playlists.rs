use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    spotify::{ApiError, check_status},
    types::{GetMyPlaylistsResponse, PlaylistTracksResponse, SimplifiedPlaylist, Track, UserProfile},
};

/// Retrieves the authenticated user's profile.
///
/// The profile id keys the cloud-sync row for this user.
pub async fn me(token: &str) -> Result<UserProfile, ApiError> {
    let api_url = format!("{uri}/me", uri = &config::spotify_apiurl());

    let client = Client::new();
    let response = client.get(&api_url).bearer_auth(token).send().await?;
    let response = check_status(response).await?;

    Ok(response.json::<UserProfile>().await?)
}

/// Retrieves all of the user's playlists, following offset pagination until
/// the listing is exhausted.
///
/// # Retry Logic
///
/// 502 Bad Gateway responses are retried after a 10-second delay; rate
/// limits wait out the server's `Retry-After` hint when it is at most 120
/// seconds. Other errors are propagated immediately.
pub async fn get_my_playlists(token: &str) -> Result<Vec<SimplifiedPlaylist>, ApiError> {
    let mut playlists = Vec::new();
    let mut offset: u64 = 0;
    let limit: u64 = 50;

    loop {
        let api_url = format!(
            "{uri}/me/playlists?limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            limit = limit,
            offset = offset
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::BAD_GATEWAY {
            sleep(Duration::from_secs(10)).await;
            continue; // retry
        }

        let response = match check_status(response).await {
            Ok(resp) => resp,
            Err(ApiError::RateLimited {
                retry_after_secs: Some(secs),
            }) if secs <= 120 => {
                sleep(Duration::from_secs(secs)).await;
                continue; // retry
            }
            Err(e) => return Err(e),
        };

        let page = response.json::<GetMyPlaylistsResponse>().await?;
        let page_len = page.items.len() as u64;
        playlists.extend(page.items);

        if page.next.is_none() || page_len == 0 {
            return Ok(playlists);
        }
        offset += page_len;
    }
}

/// Retrieves a playlist's full, ordered track list, following offset
/// pagination. Removed or unavailable entries (null tracks) are skipped.
///
/// Applies the same 502/429 retry logic as [`get_my_playlists`].
pub async fn get_playlist_tracks(token: &str, playlist_id: &str) -> Result<Vec<Track>, ApiError> {
    let mut tracks = Vec::new();
    let mut offset: u64 = 0;
    let limit: u64 = 100;

    loop {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}/tracks?limit={limit}&offset={offset}",
            uri = &config::spotify_apiurl(),
            playlist_id = playlist_id,
            limit = limit,
            offset = offset
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::BAD_GATEWAY {
            sleep(Duration::from_secs(10)).await;
            continue; // retry
        }

        let response = match check_status(response).await {
            Ok(resp) => resp,
            Err(ApiError::RateLimited {
                retry_after_secs: Some(secs),
            }) if secs <= 120 => {
                sleep(Duration::from_secs(secs)).await;
                continue; // retry
            }
            Err(e) => return Err(e),
        };

        let page = response.json::<PlaylistTracksResponse>().await?;
        let page_len = page.items.len() as u64;
        tracks.extend(page.items.into_iter().filter_map(|item| item.track));

        if page.next.is_none() || page_len == 0 {
            return Ok(tracks);
        }
        offset += page_len;
    }
}

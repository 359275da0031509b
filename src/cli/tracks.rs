use tabled::Table;

use crate::{
    error,
    management::{LibraryManager, StartTimeManager, SyncMetaManager},
    success,
    types::TrackTableRow,
    utils, warning,
};

pub async fn list_tracks(playlist_id: String) {
    let library = match LibraryManager::load().await {
        Ok(library) => library,
        Err(_) => {
            warning!("No playlist cache yet. Run djsportscli playlists update.");
            return;
        }
    };

    let Some(tracks) = library.get_tracks(&playlist_id) else {
        warning!(
            "Playlist {} is not in the cache. Run djsportscli playlists update.",
            playlist_id
        );
        return;
    };

    let start_times = StartTimeManager::load_or_default().await;

    let rows: Vec<TrackTableRow> = tracks
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let offset_ms = start_times.get(&track.uri);
            TrackTableRow {
                position: index + 1,
                name: track.name.clone(),
                artists: utils::format_artists(&track.artists),
                start_offset: if offset_ms > 0 {
                    utils::format_ms(offset_ms)
                } else {
                    "-".to_string()
                },
            }
        })
        .collect();

    if rows.is_empty() {
        warning!("Playlist is empty.");
        return;
    }

    let table = Table::new(rows);
    println!("{}", table);
}

pub async fn set_start(track_uri: String, offset_ms: u64) {
    let mut start_times = StartTimeManager::load_or_default().await;
    start_times.set(track_uri.clone(), offset_ms);
    if let Err(e) = start_times.persist().await {
        error!("Failed to store start offsets. Err: {}", e);
    }

    touch_sync_meta().await;

    success!(
        "Start offset for {} set to {} ({} ms).",
        track_uri,
        utils::format_ms(offset_ms),
        offset_ms
    );
}

pub async fn clear_start(track_uri: String) {
    let mut start_times = StartTimeManager::load_or_default().await;
    start_times.remove(&track_uri);
    if let Err(e) = start_times.persist().await {
        error!("Failed to store start offsets. Err: {}", e);
    }

    touch_sync_meta().await;

    success!("Start offset for {} cleared.", track_uri);
}

async fn touch_sync_meta() {
    let mut meta = SyncMetaManager::load_or_default().await;
    meta.touch();
    let _ = meta.persist().await;
}

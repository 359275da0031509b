use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli, error,
    management::{LibraryManager, RoleManager, SyncMetaManager},
    spotify, success,
    types::{PlaylistRole, PlaylistTableRow, PlaylistWithTracks},
    warning,
};

pub async fn list_playlists(role: Option<PlaylistRole>) {
    let library = match LibraryManager::load().await {
        Ok(library) => library,
        Err(_) => {
            warning!("No playlist cache yet. Run djsportscli playlists update.");
            return;
        }
    };

    let roles = RoleManager::load_or_default().await;

    let mut rows: Vec<PlaylistTableRow> = library
        .all()
        .iter()
        .map(|p| {
            let tag = roles.get(&p.playlist.id).unwrap_or(PlaylistRole::None);
            (p, tag)
        })
        .filter(|(_, tag)| role.is_none_or(|wanted| *tag == wanted))
        .map(|(p, tag)| PlaylistTableRow {
            name: p.playlist.name.clone(),
            role: tag.to_string(),
            tracks: p.tracks.len() as u64,
            id: p.playlist.id.clone(),
        })
        .collect();

    if rows.is_empty() {
        warning!("No playlists match.");
        return;
    }

    rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    let table = Table::new(rows);
    println!("{}", table);
}

pub async fn update_playlists() {
    let mut token_mgr = cli::load_token().await;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let token = token_mgr.get_valid_token().await;
    let playlists = match spotify::playlists::get_my_playlists(&token).await {
        Ok(playlists) => playlists,
        Err(e) => {
            pb.finish_and_clear();
            cli::report_api_error("Failed to fetch playlists", e);
            return;
        }
    };

    let total = playlists.len();
    let mut library: Vec<PlaylistWithTracks> = Vec::with_capacity(total);

    for (index, playlist) in playlists.into_iter().enumerate() {
        pb.set_message(format!(
            "Fetching tracks ({}/{}): {}",
            index + 1,
            total,
            playlist.name
        ));

        let token = token_mgr.get_valid_token().await;
        let tracks = match spotify::playlists::get_playlist_tracks(&token, &playlist.id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                pb.finish_and_clear();
                cli::report_api_error("Failed to fetch playlist tracks", e);
                return;
            }
        };

        library.push(PlaylistWithTracks { playlist, tracks });
    }

    pb.finish_and_clear();

    let manager = LibraryManager::new(Some(library));
    if let Err(e) = manager.persist().await {
        error!("Failed to cache playlists. Err: {}", e);
    }

    success!(
        "Cached {} playlists with {} tracks.",
        manager.count_playlists(),
        manager.count_tracks()
    );
}

pub async fn tag_playlist(playlist_id: String, role: PlaylistRole) {
    let name = match LibraryManager::load().await {
        Ok(library) => match library.get_playlist(&playlist_id) {
            Some(playlist) => playlist.name.clone(),
            None => {
                warning!(
                    "Playlist {} is not in the cache. Run djsportscli playlists update.",
                    playlist_id
                );
                return;
            }
        },
        Err(_) => {
            warning!("No playlist cache yet. Run djsportscli playlists update.");
            return;
        }
    };

    let mut roles = RoleManager::load_or_default().await;
    if role == PlaylistRole::None {
        roles.remove(&playlist_id);
    } else {
        roles.set(playlist_id, role);
    }
    if let Err(e) = roles.persist().await {
        error!("Failed to store playlist roles. Err: {}", e);
    }

    let mut meta = SyncMetaManager::load_or_default().await;
    meta.touch();
    let _ = meta.persist().await;

    success!("Tagged '{}' as {}.", name, role);
}

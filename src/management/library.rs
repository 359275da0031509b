use crate::{
    cache::ContainerSnapshot,
    management::{self, StoreError},
    types::{PlaylistWithTracks, SimplifiedPlaylist, Track},
};

const LIBRARY_PATH: &str = "cache/library.json";

/// Cached snapshot of the user's playlists and their ordered tracks, the
/// input the track-position cache is rebuilt from. Refreshed wholesale by
/// `playlists update`.
pub struct LibraryManager {
    playlists: Vec<PlaylistWithTracks>,
}

impl LibraryManager {
    pub fn new(playlists: Option<Vec<PlaylistWithTracks>>) -> Self {
        Self {
            playlists: playlists.unwrap_or_default(),
        }
    }

    pub async fn load() -> Result<Self, StoreError> {
        let playlists = management::read_json(LIBRARY_PATH).await?;
        Ok(Self { playlists })
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        management::write_json(LIBRARY_PATH, &self.playlists).await
    }

    pub fn set(&mut self, playlists: Vec<PlaylistWithTracks>) {
        self.playlists = playlists;
    }

    pub fn all(&self) -> &[PlaylistWithTracks] {
        &self.playlists
    }

    pub fn get_playlist(&self, playlist_id: &str) -> Option<&SimplifiedPlaylist> {
        self.playlists
            .iter()
            .find(|p| p.playlist.id == playlist_id)
            .map(|p| &p.playlist)
    }

    pub fn get_tracks(&self, playlist_id: &str) -> Option<&[Track]> {
        self.playlists
            .iter()
            .find(|p| p.playlist.id == playlist_id)
            .map(|p| p.tracks.as_slice())
    }

    /// Converts the snapshot into the shape the track-position cache
    /// rebuilds from. Tracks are keyed by URI.
    pub fn snapshots(&self) -> Vec<ContainerSnapshot> {
        self.playlists
            .iter()
            .map(|p| ContainerSnapshot {
                id: p.playlist.id.clone(),
                uri: p.playlist.uri.clone(),
                track_keys: p.tracks.iter().map(|t| t.uri.clone()).collect(),
            })
            .collect()
    }

    pub fn count_playlists(&self) -> usize {
        self.playlists.len()
    }

    pub fn count_tracks(&self) -> usize {
        self.playlists.iter().map(|p| p.tracks.len()).sum()
    }
}

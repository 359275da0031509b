use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMyPlaylistsResponse {
    pub items: Vec<SimplifiedPlaylist>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub tracks: PlaylistTracksRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

/// One entry of a playlist. `track` is `None` for removed or unavailable
/// items, which the library snapshot silently skips.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

/// One playlist and its resolved, ordered track list as cached locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistWithTracks {
    pub playlist: SimplifiedPlaylist,
    pub tracks: Vec<Track>,
}

/// Playback state as reported by the currently-playing endpoint. The
/// `device` field only appears on the full player-state payload, so it
/// defaults to absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentlyPlaying {
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: Option<Track>,
    #[serde(default)]
    pub device: Option<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_active: bool,
    pub volume_percent: Option<u8>,
}

/// Request body for the start/resume playback endpoint. Exactly one of
/// `context_uri` or `uris` is set per request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlaybackOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<PlaybackOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackOffset {
    pub position: u32,
}

/// Situational role a playlist can be tagged with. Closed set; anything the
/// user hasn't tagged reads back as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaylistRole {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "hotspot")]
    Hotspot,
    #[serde(rename = "match")]
    Match,
    #[serde(rename = "funStuff")]
    FunStuff,
    #[serde(rename = "preMatch")]
    PreMatch,
}

impl std::fmt::Display for PlaylistRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlaylistRole::None => "none",
            PlaylistRole::Hotspot => "hotspot",
            PlaylistRole::Match => "match",
            PlaylistRole::FunStuff => "fun-stuff",
            PlaylistRole::PreMatch => "pre-match",
        };
        write!(f, "{}", s)
    }
}

/// UI theme preference, carried for parity with the other clients that read
/// the same settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        write!(f, "{}", s)
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub role: String,
    pub tracks: u64,
    pub id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub position: usize,
    pub name: String,
    pub artists: String,
    pub start_offset: String,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub name: String,
    pub kind: String,
    pub active: String,
    pub volume: String,
    pub id: String,
}

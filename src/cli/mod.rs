//! # CLI Module
//!
//! Command-line interface layer for djsportscli, a Spotify playback control
//! surface for live sports events. It implements all user-facing commands
//! and coordinates between the Spotify API services, local data management
//! and the adaptive polling loop.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//! - [`logout`] - Removes the cached token, ending the session
//!
//! ### Playlist Operations
//!
//! - [`list_playlists`] - Displays the cached playlist library with role tags
//! - [`update_playlists`] - Refreshes the library snapshot from Spotify
//! - [`tag_playlist`] - Assigns a situational role to a playlist
//!
//! ### Track Operations
//!
//! - [`list_tracks`] - Lists a playlist's tracks with their start offsets
//! - [`set_start`] - Stores a per-track start offset
//! - [`clear_start`] - Removes a per-track start offset
//!
//! ### Playback
//!
//! - [`play`] - Contextual play: playlist queue when known, standalone otherwise
//! - [`player_status`] - One-shot now-playing readout
//! - [`pause`], [`resume`], [`next`], [`previous`], [`seek`], [`volume`] -
//!   direct pass-through controls
//! - [`watch`] - Foreground now-playing readout driven by the adaptive poller
//!
//! ### Devices
//!
//! - [`list_devices`] - Tables the available playback devices
//! - [`select_device`] - Pins a device as the preferred playback target
//!
//! ### Cloud Sync
//!
//! - [`sync_status`], [`sync_backup`], [`sync_restore`]
//!
//! ### Settings
//!
//! - [`settings_show`], [`set_interval`], [`set_theme`], [`set_device_name`]
//!
//! ## Error Presentation
//!
//! Commands distinguish three failure classes: a missing or rejected login
//! terminates with a pointer to `djsportscli auth`, user-initiated request
//! failures print explicit warnings, and background poll errors stay silent
//! apart from an at-most-once session-expiry notice.

mod auth;
mod devices;
mod player;
mod playlists;
mod settings;
mod sync;
mod tracks;
mod watch;

pub use auth::{auth, logout};
pub use devices::{list_devices, select_device};
pub use player::{next, pause, play, player_status, previous, resume, seek, volume};
pub use playlists::{list_playlists, tag_playlist, update_playlists};
pub use settings::{set_device_name, set_interval, set_theme, settings_show};
pub use sync::{sync_backup, sync_restore, sync_status};
pub use tracks::{clear_start, list_tracks, set_start};
pub use watch::watch;

use crate::{error, management::TokenManager, spotify::ApiError, warning};

/// Loads the saved login or terminates with a pointer to `auth`.
pub(crate) async fn load_token() -> TokenManager {
    match TokenManager::load().await {
        Ok(mgr) => mgr,
        Err(e) => {
            error!(
                "Failed to load token. Please run djsportscli auth\n Error: {}",
                e
            );
        }
    }
}

/// Presents an API failure from a user-initiated command. A 401 is treated
/// as unrecoverable and terminates; everything else warns and returns.
pub(crate) fn report_api_error(context: &str, err: ApiError) {
    match err {
        ApiError::Unauthorized => {
            error!("Spotify rejected the session. Please run djsportscli auth.");
        }
        ApiError::RateLimited { retry_after_secs } => match retry_after_secs {
            Some(secs) => warning!("{}: rate limited, retry in {}s.", context, secs),
            None => warning!("{}: rate limited.", context),
        },
        other => warning!("{}: {}", context, other),
    }
}

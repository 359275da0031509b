use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    management::POLLING_INTERVALS,
    types::{PlaylistRole, Theme, TrackArtist},
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Parses a playlist role name as used on the command line.
pub fn parse_playlist_role(value: &str) -> Result<PlaylistRole, String> {
    match value.to_ascii_lowercase().as_str() {
        "none" => Ok(PlaylistRole::None),
        "hotspot" => Ok(PlaylistRole::Hotspot),
        "match" => Ok(PlaylistRole::Match),
        "fun-stuff" | "funstuff" => Ok(PlaylistRole::FunStuff),
        "pre-match" | "prematch" => Ok(PlaylistRole::PreMatch),
        other => Err(format!(
            "Unknown role '{}'. Expected one of: none, hotspot, match, fun-stuff, pre-match.",
            other
        )),
    }
}

pub fn parse_theme(value: &str) -> Result<Theme, String> {
    match value.to_ascii_lowercase().as_str() {
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        "system" => Ok(Theme::System),
        other => Err(format!(
            "Unknown theme '{}'. Expected one of: light, dark, system.",
            other
        )),
    }
}

/// Parses a polling interval in milliseconds and validates it against the
/// supported set. `0` disables polling.
pub fn parse_polling_interval(value: &str) -> Result<u64, String> {
    let ms: u64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of milliseconds.", value))?;
    if POLLING_INTERVALS.contains(&ms) {
        Ok(ms)
    } else {
        Err(format!(
            "Unsupported interval {} ms. Supported: {}.",
            ms,
            POLLING_INTERVALS
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

/// Parses a track start offset: plain numbers are milliseconds, `mm:ss` is
/// accepted as a convenience. Returns milliseconds either way.
pub fn parse_start_offset(value: &str) -> Result<u64, String> {
    if let Some((minutes, seconds)) = value.split_once(':') {
        let minutes: u64 = minutes
            .parse()
            .map_err(|_| format!("Invalid minutes in '{}'.", value))?;
        let seconds: u64 = seconds
            .parse()
            .map_err(|_| format!("Invalid seconds in '{}'.", value))?;
        if seconds >= 60 {
            return Err(format!("Seconds must be below 60 in '{}'.", value));
        }
        Ok((minutes * 60 + seconds) * 1000)
    } else {
        value
            .parse()
            .map_err(|_| format!("'{}' is not a valid offset. Use milliseconds or mm:ss.", value))
    }
}

/// Formats a millisecond offset or progress value as `m:ss`.
pub fn format_ms(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

pub fn format_artists(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

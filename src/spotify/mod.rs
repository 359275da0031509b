//! # Spotify Integration Module
//!
//! Interface to the Spotify Web API: authentication, playback control and
//! playlist retrieval. This is the integration layer between the djsports
//! CLI and Spotify's services, handling HTTP communication, the OAuth flow,
//! error interpretation and rate limiting.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Playback, Management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Player Operations (status, pause, resume, skip, seek, volume, devices)
//!     └── Playlist Operations (profile, playlists, tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: verifier/challenge generation, browser
//!   launch, local callback server, token exchange and refresh.
//! - [`player`] - One stateless wrapper per player endpoint. A 204 response
//!   is "no content / no error"; the currently-playing wrapper maps it to
//!   `Ok(None)` (nothing is playing) rather than an error.
//! - [`playlists`] - Current-user profile, playlist listing and per-playlist
//!   track listing with offset pagination.
//!
//! ## Error Handling
//!
//! Every wrapper returns [`ApiError`], which classifies failures the way the
//! rest of the application reacts to them:
//!
//! - [`ApiError::Unauthorized`] - 401; the token must be refreshed or the
//!   user must re-run `djsportscli auth`. Surfaced distinctly so the CLI can
//!   prompt re-authentication instead of retrying blindly.
//! - [`ApiError::RateLimited`] - 429 with the `Retry-After` hint; retryable.
//! - [`ApiError::Api`] - other non-2xx; carries the human-readable message
//!   from the JSON error body. 5xx is retryable, the rest is not.
//! - [`ApiError::Network`] - fetch-level failure; retryable.
//!
//! ## API Coverage
//!
//! - `GET /me` - current user profile
//! - `GET /me/playlists` - playlist listing (paginated)
//! - `GET /playlists/{id}/tracks` - playlist tracks (paginated)
//! - `GET /me/player/currently-playing` - playback status
//! - `PUT /me/player/play` - start/resume, optionally with context and offset
//! - `PUT /me/player/pause`, `POST /me/player/next`, `POST /me/player/previous`
//! - `PUT /me/player/seek`, `PUT /me/player/volume`
//! - `GET /me/player/devices` - device listing
//! - `POST /api/token` - token exchange and refresh

pub mod auth;
pub mod player;
pub mod playlists;

use reqwest::StatusCode;

/// Classified failure of a Spotify Web API call.
#[derive(Debug)]
pub enum ApiError {
    /// 401: token expired or invalid; re-authentication required.
    Unauthorized,
    /// 429: too many requests; `retry_after_secs` carries the server hint.
    RateLimited { retry_after_secs: Option<u64> },
    /// Any other non-2xx status with the message from the JSON error body.
    Api { status: StatusCode, message: String },
    /// Network-level failure before a status was received.
    Network(reqwest::Error),
}

impl ApiError {
    /// Transient failures worth retrying: network errors, rate limits and
    /// server-side errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Unauthorized => false,
            ApiError::RateLimited { .. } => true,
            ApiError::Api { status, .. } => status.is_server_error(),
            ApiError::Network(_) => true,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "unauthorized; run djsportscli auth"),
            ApiError::RateLimited { retry_after_secs } => match retry_after_secs {
                Some(secs) => write!(f, "rate limited; retry after {}s", secs),
                None => write!(f, "rate limited"),
            },
            ApiError::Api { status, message } => write!(f, "api error {}: {}", status, message),
            ApiError::Network(e) => write!(f, "network error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err)
    }
}

/// Interprets a response's status, mapping non-2xx codes onto the error
/// taxonomy. The JSON error body's `error.message` becomes the displayed
/// message when present.
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            Err(ApiError::RateLimited { retry_after_secs })
        }
        _ => {
            let message = match response.json::<serde_json::Value>().await {
                Ok(body) => body["error"]["message"]
                    .as_str()
                    .unwrap_or("unknown error")
                    .to_string(),
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            Err(ApiError::Api { status, message })
        }
    }
}

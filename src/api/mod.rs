//! # API Module
//!
//! HTTP endpoints for the local callback server that backs the OAuth flow.
//!
//! - [`callback`] - Receives Spotify's OAuth redirect and completes the PKCE
//!   exchange, handing the resulting token back through shared state.
//! - [`health`] - Health check returning status and version, useful when
//!   verifying that the callback server came up before the browser redirect
//!   lands.
//!
//! Built on [Axum](https://docs.rs/axum); each endpoint is an async handler
//! wired into the router in [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;

//! djsports CLI Library
//!
//! This library provides a command-line control surface for Spotify playback
//! during live sports events: browse playlists, tag them with situational
//! roles, assign per-track start offsets, trigger contextual playback and
//! keep a now-playing readout fresh with adaptive polling.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `cache` - In-memory track-position lookup cache
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Local persistence for tokens, offsets, roles and settings
//! - `playback` - Contextual playback orchestration
//! - `polling` - Adaptive polling utility with bounded geometric backoff
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - Cloud backup/restore of local settings
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use djsportscli::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> djsportscli::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod management;
pub mod playback;
pub mod polling;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object, keeping Send + Sync bounds
/// for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlists...");
/// info!("Found {} devices", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playback started");
/// success!("Tagged {} playlists", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable errors: the process terminates with exit code 1
/// immediately after the message is printed.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// For recoverable issues or important notices that don't require program
/// termination.
///
/// # Example
///
/// ```
/// warning!("Device cache expired, falling back to active device");
/// warning!("Rate limited, retrying in {}s", secs);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

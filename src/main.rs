use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use djsportscli::{
    cli, config, error,
    types::{PkceToken, PlaylistRole, Theme},
    utils,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Sign out and remove the cached token
    Logout,

    /// Browse and tag playlists
    Playlists(PlaylistsOptions),

    /// List a playlist's tracks and manage start offsets
    Tracks(TracksOptions),

    /// Play a track, inside its playlist queue when known
    Play(PlayOptions),

    /// Playback controls and status
    Player(PlayerOptions),

    /// List playback devices or pin a preferred one
    Devices(DevicesOptions),

    /// Follow the now-playing state in the foreground
    Watch,

    /// Back up or restore settings via the cloud
    Sync(SyncOptions),

    /// Show or change settings
    Settings(SettingsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Browse and tag playlists",
    args_conflicts_with_subcommands = true // disallow mixing --role with subcommands
)]
pub struct PlaylistsOptions {
    /// Only show playlists tagged with this role
    #[clap(long, value_parser = utils::parse_playlist_role)]
    pub role: Option<PlaylistRole>,

    /// Subcommands under `playlists` (e.g., `update`, `tag`)
    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// Refresh the local playlist cache from Spotify
    Update,

    /// Tag a playlist with a situational role
    Tag(TagOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct TagOpts {
    /// Playlist id
    pub playlist_id: String,

    /// Role: none, hotspot, match, fun-stuff or pre-match
    #[clap(value_parser = utils::parse_playlist_role)]
    pub role: PlaylistRole,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "List a playlist's tracks and manage start offsets",
    args_conflicts_with_subcommands = true
)]
pub struct TracksOptions {
    /// Playlist id to list
    pub playlist_id: Option<String>,

    /// Subcommands under `tracks` (e.g., `set-start`)
    #[command(subcommand)]
    pub command: Option<TracksSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TracksSubcommand {
    /// Store a start offset for a track
    SetStart(SetStartOpts),

    /// Remove a track's start offset
    ClearStart(ClearStartOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct SetStartOpts {
    /// Track URI
    pub track_uri: String,

    /// Offset in milliseconds, or mm:ss
    #[clap(value_parser = utils::parse_start_offset)]
    pub offset_ms: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct ClearStartOpts {
    /// Track URI
    pub track_uri: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayOptions {
    /// Track URI to play
    pub track_uri: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlayerOptions {
    #[command(subcommand)]
    pub command: PlayerSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlayerSubcommand {
    /// Show the current playback state
    Status,

    /// Pause playback
    Pause,

    /// Resume the current context
    Resume,

    /// Skip to the next track
    Next,

    /// Skip to the previous track
    Previous,

    /// Seek within the current track
    Seek(SeekOpts),

    /// Set the playback volume
    Volume(VolumeOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct SeekOpts {
    /// Position in milliseconds
    pub position_ms: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct VolumeOpts {
    /// Volume percentage (0-100)
    pub volume_percent: u8,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "List playback devices or pin a preferred one",
    args_conflicts_with_subcommands = true
)]
pub struct DevicesOptions {
    /// Subcommands under `devices` (e.g., `select`)
    #[command(subcommand)]
    pub command: Option<DevicesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum DevicesSubcommand {
    /// Pin a device as the preferred playback target
    Select(SelectDeviceOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct SelectDeviceOpts {
    /// Device id
    pub device_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    #[command(subcommand)]
    pub command: SyncSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SyncSubcommand {
    /// Compare local settings against the cloud copy
    Status,

    /// Upload local settings to the cloud
    Backup,

    /// Replace local settings with the cloud copy
    Restore,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Show or change settings",
    args_conflicts_with_subcommands = true
)]
pub struct SettingsOptions {
    /// Subcommands under `settings`; none shows the current values
    #[command(subcommand)]
    pub command: Option<SettingsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsSubcommand {
    /// Set the now-playing polling interval (0 turns polling off)
    Interval(IntervalOpts),

    /// Set the theme preference
    Theme(ThemeOpts),

    /// Set this device's name as shown in cloud sync
    DeviceName(DeviceNameOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct IntervalOpts {
    /// Interval in milliseconds: 0, 1000, 2000, 3000, 5000, 10000 or 15000
    #[clap(value_parser = utils::parse_polling_interval)]
    pub interval_ms: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct ThemeOpts {
    /// Theme: light, dark or system
    #[clap(value_parser = utils::parse_theme)]
    pub theme: Theme,
}

#[derive(Parser, Debug, Clone)]
pub struct DeviceNameOpts {
    /// Device name
    pub name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }

        Command::Logout => cli::logout().await,

        Command::Playlists(opt) => match opt.command {
            Some(PlaylistsSubcommand::Update) => cli::update_playlists().await,
            Some(PlaylistsSubcommand::Tag(t)) => cli::tag_playlist(t.playlist_id, t.role).await,
            None => cli::list_playlists(opt.role).await,
        },

        Command::Tracks(opt) => match opt.command {
            Some(TracksSubcommand::SetStart(s)) => cli::set_start(s.track_uri, s.offset_ms).await,
            Some(TracksSubcommand::ClearStart(c)) => cli::clear_start(c.track_uri).await,
            None => match opt.playlist_id {
                Some(playlist_id) => cli::list_tracks(playlist_id).await,
                None => error!("Pass a playlist id or a subcommand. See djsportscli tracks --help."),
            },
        },

        Command::Play(opt) => cli::play(opt.track_uri).await,

        Command::Player(opt) => match opt.command {
            PlayerSubcommand::Status => cli::player_status().await,
            PlayerSubcommand::Pause => cli::pause().await,
            PlayerSubcommand::Resume => cli::resume().await,
            PlayerSubcommand::Next => cli::next().await,
            PlayerSubcommand::Previous => cli::previous().await,
            PlayerSubcommand::Seek(s) => cli::seek(s.position_ms).await,
            PlayerSubcommand::Volume(v) => cli::volume(v.volume_percent).await,
        },

        Command::Devices(opt) => match opt.command {
            Some(DevicesSubcommand::Select(s)) => cli::select_device(s.device_id).await,
            None => cli::list_devices().await,
        },

        Command::Watch => cli::watch().await,

        Command::Sync(opt) => match opt.command {
            SyncSubcommand::Status => cli::sync_status().await,
            SyncSubcommand::Backup => cli::sync_backup().await,
            SyncSubcommand::Restore => cli::sync_restore().await,
        },

        Command::Settings(opt) => match opt.command {
            Some(SettingsSubcommand::Interval(i)) => cli::set_interval(i.interval_ms).await,
            Some(SettingsSubcommand::Theme(t)) => cli::set_theme(t.theme).await,
            Some(SettingsSubcommand::DeviceName(d)) => cli::set_device_name(d.name).await,
            None => cli::settings_show().await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}

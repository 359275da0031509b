use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    cli, info,
    management::PrefsManager,
    polling::{Poller, PollerConfig, ProbeError},
    spotify::{self, ApiError},
    types::CurrentlyPlaying,
    utils, warning,
};

/// Foreground now-playing readout.
///
/// Polls the playback state at the configured interval and prints a line
/// whenever the track or play/pause state changes. Transient poll failures
/// are absorbed by the poller's backoff and stay silent; only a rejected
/// session gets a notice.
pub async fn watch() {
    let prefs = PrefsManager::load_or_default().await;
    let interval_ms = prefs.polling_interval_ms();
    if interval_ms == 0 {
        warning!(
            "Polling is off. Run djsportscli settings interval <ms> to enable it, e.g. 3000."
        );
        return;
    }

    let token_mgr = Arc::new(Mutex::new(cli::load_token().await));
    let last_line: Arc<Mutex<String>> = Arc::new(Mutex::new(String::new()));

    info!(
        "Watching playback every {} ms. Press Ctrl+C to stop.",
        interval_ms
    );

    let config = PollerConfig::new("now-playing", Duration::from_millis(interval_ms));

    let probe = {
        let token_mgr = Arc::clone(&token_mgr);
        let last_line = Arc::clone(&last_line);
        move || {
            let token_mgr = Arc::clone(&token_mgr);
            let last_line = Arc::clone(&last_line);
            async move {
                let token = token_mgr.lock().await.get_valid_token().await;
                let playing = spotify::player::get_currently_playing(&token).await?;

                let line = describe(playing.as_ref());
                let mut last = last_line.lock().await;
                if *last != line {
                    info!("{}", line);
                    *last = line;
                }

                Ok::<(), ProbeError>(())
            }
        }
    };

    let mut notified_unauthorized = false;
    let on_error: Box<dyn FnMut(ProbeError) + Send> = Box::new(move |e| {
        if !notified_unauthorized
            && matches!(e.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized))
        {
            notified_unauthorized = true;
            warning!("Session expired. Run djsportscli auth to sign in again.");
        }
    });

    let poller = Poller::spawn(config, probe, Some(on_error));

    let _ = tokio::signal::ctrl_c().await;
    poller.disable();
    println!();
    info!("Stopped watching.");
}

fn describe(playing: Option<&CurrentlyPlaying>) -> String {
    match playing {
        Some(playing) => {
            let state = if playing.is_playing {
                "Playing"
            } else {
                "Paused"
            };
            match &playing.item {
                Some(track) => format!(
                    "{}: {} - {}",
                    state,
                    utils::format_artists(&track.artists),
                    track.name
                ),
                None => format!("{}: (unknown track)", state),
            }
        }
        None => "Nothing is playing.".to_string(),
    }
}

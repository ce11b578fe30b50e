use colored::Colorize;

use crate::{
    error, info,
    spotify::{PlaybackAction, SpotifyClient},
    success,
    utils::{format_duration_ms, join_artists},
    warning,
};

pub async fn now_playing(client: &SpotifyClient) {
    let playing = match client.currently_playing().await {
        Ok(p) => p,
        Err(e) => error!("Failed to load currently playing track. Err: {}", e),
    };

    let Some(item) = playing.item else {
        info!(
            "{}",
            playing
                .message
                .unwrap_or_else(|| "No track currently playing".to_string())
        );
        return;
    };

    let state = if playing.is_playing {
        "playing".green()
    } else {
        "paused".yellow()
    };

    println!(
        "{} {} - {}",
        state.bold(),
        item.name.bold(),
        join_artists(&item.artists)
    );
    println!(
        "  {} [{} / {}]",
        item.album.name,
        format_duration_ms(playing.progress_ms.unwrap_or(0)),
        format_duration_ms(item.duration_ms)
    );
}

pub async fn player(client: &SpotifyClient, action: String, value: Option<String>) {
    let action = match PlaybackAction::parse(&action, value.as_deref()) {
        Ok(a) => a,
        Err(e) => error!("{}", e),
    };

    match client.control_playback(action).await {
        Ok(resp) if resp.success => success!("Playback: {}", action),
        Ok(_) => warning!("Server did not confirm {}", action),
        Err(e) => error!("Failed to {}. Err: {}", action, e),
    }
}

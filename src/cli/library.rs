use tabled::Table;

use crate::{
    error, info,
    spotify::SpotifyClient,
    types::TimeRange,
    utils::{history_rows, playlist_rows, track_rows},
};

pub async fn me(client: &SpotifyClient) {
    match client.current_user().await {
        Ok(user) => {
            println!(
                "{} ({})",
                user.display_name.as_deref().unwrap_or(&user.id),
                user.id
            );
            if let Some(product) = user.product {
                println!("  plan: {}", product);
            }
            println!("  uri:  {}", user.uri);
        }
        Err(e) => error!("Failed to load user profile. Err: {}", e),
    }
}

pub async fn recent(client: &SpotifyClient, limit: u32) {
    let recent = match client.recently_played(limit).await {
        Ok(r) => r,
        Err(e) => error!("Failed to load recently played tracks. Err: {}", e),
    };

    if recent.items.is_empty() {
        info!("No recently played tracks.");
        return;
    }

    println!("{}", Table::new(history_rows(&recent.items)));
}

pub async fn top(client: &SpotifyClient, time_range: TimeRange, limit: u32) {
    let top = match client.top_tracks(time_range, limit).await {
        Ok(t) => t,
        Err(e) => error!("Failed to load top tracks. Err: {}", e),
    };

    if top.items.is_empty() {
        info!("No top tracks for {}.", time_range);
        return;
    }

    println!("{}", Table::new(track_rows(&top.items)));
}

pub async fn playlists(client: &SpotifyClient, limit: u32) {
    let playlists = match client.playlists(limit).await {
        Ok(p) => p,
        Err(e) => error!("Failed to load playlists. Err: {}", e),
    };

    if playlists.items.is_empty() {
        info!("No playlists found.");
        return;
    }

    println!("{}", Table::new(playlist_rows(&playlists.items)));
}

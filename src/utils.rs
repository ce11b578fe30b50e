use chrono::{DateTime, Local};

use crate::types::{
    ArtistRef, HistoryTableRow, PlayHistory, PlaylistSummary, PlaylistTableRow, TrackSummary,
    TrackTableRow,
};

pub fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats milliseconds as `m:ss`, or `h:mm:ss` from one hour on.
pub fn format_duration_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Renders an RFC 3339 timestamp in local time. Unparseable input is
/// returned as is.
pub fn format_played_at(played_at: &str) -> String {
    match DateTime::parse_from_rfc3339(played_at) {
        Ok(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        Err(_) => played_at.to_string(),
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

pub fn track_rows(tracks: &[TrackSummary]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: join_artists(&t.artists),
            album: t.album.name.clone(),
        })
        .collect()
}

pub fn history_rows(items: &[PlayHistory]) -> Vec<HistoryTableRow> {
    items
        .iter()
        .map(|h| HistoryTableRow {
            played: format_played_at(&h.played_at),
            name: h.track.name.clone(),
            artists: join_artists(&h.track.artists),
        })
        .collect()
}

pub fn playlist_rows(playlists: &[PlaylistSummary]) -> Vec<PlaylistTableRow> {
    playlists
        .iter()
        .map(|p| PlaylistTableRow {
            name: p.name.clone(),
            tracks: p.tracks.total,
            description: truncate(p.description.as_deref().unwrap_or_default(), 50),
        })
        .collect()
}
